use std::collections::BTreeMap;

use contracts::shared::schema::{EditableEntity, EntityId, EntitySchema, FormField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(EntityId),
}

/// Create/edit form shared by every entity page
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState<S> {
    pub mode: EditorMode,
    pub form: S,
    /// Per-field parse errors, keyed by field key
    pub invalid: BTreeMap<String, String>,
    pub error: Option<String>,
    pub saving: bool,
}

impl<S: EntitySchema + EditableEntity> EditorState<S> {
    pub fn create(template: S) -> Self {
        Self {
            mode: EditorMode::Create,
            form: template,
            invalid: BTreeMap::new(),
            error: None,
            saving: false,
        }
    }

    pub fn edit(entity: S) -> Self {
        Self {
            mode: EditorMode::Edit(entity.id()),
            form: entity,
            invalid: BTreeMap::new(),
            error: None,
            saving: false,
        }
    }

    pub fn title(&self) -> String {
        match self.mode {
            EditorMode::Create => format!("Nuevo registro: {}", S::LABEL),
            EditorMode::Edit(_) => format!("Editar {}: {}", S::LABEL, self.form.display_name()),
        }
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.form.form_fields()
    }

    pub fn set_field(&mut self, key: &str, raw: &str) {
        match self.form.apply_field(key, raw) {
            Ok(()) => {
                self.invalid.remove(key);
            }
            Err(e) => {
                self.invalid.insert(key.to_string(), e.to_string());
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Closing is blocked while the save request is outstanding
    pub fn can_dismiss(&self) -> bool {
        !self.saving
    }
}
