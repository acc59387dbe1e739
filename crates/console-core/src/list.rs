//! Headless list view model
//!
//! The table component renders whatever this module decides: which row
//! actions are enabled and whether the body is the empty-state placeholder.

use contracts::shared::schema::{EntityId, EntitySchema};
use contracts::shared::status::EntityStatus;

/// Row action a user can trigger from the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    ToggleStatus,
    View,
    Edit,
    Delete,
}

/// Enabled state of each row control.
///
/// One policy for every entity type: an inactive record is read-only, so
/// edit and delete are disabled while view stays available. Toggling stays
/// enabled so the record can be reactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowActions {
    pub toggle_status: bool,
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

impl RowActions {
    pub fn for_status(status: EntityStatus) -> Self {
        let active = status.is_active();
        Self {
            toggle_status: true,
            view: true,
            edit: active,
            delete: active,
        }
    }

    pub fn allows(&self, action: RowAction) -> bool {
        match action {
            RowAction::ToggleStatus => self.toggle_status,
            RowAction::View => self.view,
            RowAction::Edit => self.edit,
            RowAction::Delete => self.delete,
        }
    }
}

/// User intent emitted by the list, consumed by the page controller
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent<S> {
    ToggleStatus(EntityId),
    View(S),
    Edit(S),
    Delete(S),
}

/// Body of the table
#[derive(Debug, Clone, PartialEq)]
pub enum ListBody<'a, S> {
    /// Explicit "no records" placeholder
    Empty,
    Rows(Vec<ListRow<'a, S>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListRow<'a, S> {
    pub entity: &'a S,
    pub actions: RowActions,
}

pub fn list_body<S: EntitySchema>(items: &[S]) -> ListBody<'_, S> {
    if items.is_empty() {
        return ListBody::Empty;
    }
    ListBody::Rows(
        items
            .iter()
            .map(|entity| ListRow {
                entity,
                actions: RowActions::for_status(entity.status()),
            })
            .collect(),
    )
}

/// Turn a click into a [`ListEvent`], refusing actions the row policy disables
pub fn dispatch_row_action<S: EntitySchema>(entity: &S, action: RowAction) -> Option<ListEvent<S>> {
    if !RowActions::for_status(entity.status()).allows(action) {
        log::debug!("{:?} ignored for inactive {} {}", action, S::LABEL, entity.id());
        return None;
    }
    Some(match action {
        RowAction::ToggleStatus => ListEvent::ToggleStatus(entity.id()),
        RowAction::View => ListEvent::View(entity.clone()),
        RowAction::Edit => ListEvent::Edit(entity.clone()),
        RowAction::Delete => ListEvent::Delete(entity.clone()),
    })
}
