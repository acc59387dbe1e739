use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::shared::schema::{
    DetailField, DetailProjection, EditableEntity, EntityId, EntitySchema, FieldKind, FormField,
};
use crate::shared::status::{self, EntityStatus};
use crate::shared::validation::ValidationError;
use crate::shared::wire::{WireMode, WireRecord};

// ============================================================================
// View shape
// ============================================================================

/// Категория товаров
///
/// Categories carry status as a boolean `activo` flag rather than `estado`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipoCategoria")]
    pub kind: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "activo", with = "status::as_flag")]
    pub status: EntityStatus,
}

// ============================================================================
// Backend mapping
// ============================================================================

const ID: &[&str] = &["id_categoria", "idCategoria", "id"];
const NAME: &[&str] = &["nombre_categoria", "nombreCategoria", "nombre"];
const KIND: &[&str] = &["tipo_categoria", "tipoCategoria", "tipo"];
const DESCRIPTION: &[&str] = &["descripcion", "descripcion_categoria"];
const STATUS: &[&str] = &["estado", "activo"];

impl EntitySchema for Category {
    const ENDPOINT: &'static str = "categorias";
    const LABEL: &'static str = "categoría";
    const ID_KEYS: &'static [&'static str] = ID;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn status(&self) -> EntityStatus {
        self.status
    }

    fn set_status(&mut self, status: EntityStatus) {
        self.status = status;
    }

    fn from_wire(record: &WireRecord<'_>) -> Self {
        Self {
            id: record.int(ID),
            name: record.text(NAME),
            kind: record.text(KIND),
            description: record.text(DESCRIPTION),
            status: record.status(STATUS),
        }
    }

    fn to_wire(&self, mode: WireMode) -> Value {
        let mut body = json!({
            "nombre_categoria": self.name,
            "tipo_categoria": self.kind,
            "descripcion": self.description,
            "estado": self.status.is_active(),
        });
        if mode == WireMode::Update {
            body["id_categoria"] = json!(self.id);
        }
        body
    }

    fn required_fields(&self) -> Vec<(&'static str, String)> {
        vec![("tipoCategoria", self.kind.clone()), ("nombre", self.name.clone())]
    }
}

impl DetailProjection for Category {
    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::new("Nombre", self.name.clone()),
            DetailField::new("Tipo", self.kind.clone()),
            DetailField::new("Descripción", self.description.clone()),
            DetailField::new("Estado", self.status.label()),
        ]
    }
}

impl EditableEntity for Category {
    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("nombre", "Nombre", FieldKind::Text, self.name.clone()).required(),
            FormField::new("tipoCategoria", "Tipo de categoría", FieldKind::Text, self.kind.clone())
                .required(),
            FormField::new("descripcion", "Descripción", FieldKind::Text, self.description.clone()),
        ]
    }

    fn apply_field(&mut self, key: &str, raw: &str) -> Result<(), ValidationError> {
        match key {
            "nombre" => self.name = raw.to_string(),
            "tipoCategoria" => self.kind = raw.to_string(),
            "descripcion" => self.description = raw.to_string(),
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_record_gets_defaults() {
        let category = Category::from_value(&json!({"id": 1, "nombre": "A"}));
        assert_eq!(
            serde_json::to_value(&category).unwrap(),
            json!({"id": 1, "nombre": "A", "tipoCategoria": "", "descripcion": "", "activo": true})
        );
    }

    #[test]
    fn test_backend_names_map_to_view_shape() {
        let category = Category::from_value(&json!({
            "id_categoria": 7,
            "nombre_categoria": "Lácteos",
            "tipo_categoria": "Producto",
            "descripcion": "Leche y derivados",
            "estado": "Inactivo"
        }));
        assert_eq!(category.id, 7);
        assert_eq!(category.name, "Lácteos");
        assert_eq!(category.kind, "Producto");
        assert_eq!(category.status, EntityStatus::Inactive);
    }

    #[test]
    fn test_remapping_view_shape_preserves_fields() {
        let original = Category {
            id: 3,
            name: "Limpieza".into(),
            kind: "Insumo".into(),
            description: "Detergentes".into(),
            status: EntityStatus::Inactive,
        };
        let view = serde_json::to_value(&original).unwrap();
        assert_eq!(Category::from_value(&view), original);
    }

    #[test]
    fn test_create_body_omits_id() {
        let category = Category {
            id: 99,
            name: "X".into(),
            ..Default::default()
        };
        let create = category.to_wire(WireMode::Create);
        assert!(create.get("id_categoria").is_none());
        assert_eq!(create["estado"], json!(true));
        let update = category.to_wire(WireMode::Update);
        assert_eq!(update["id_categoria"], json!(99));
    }
}
