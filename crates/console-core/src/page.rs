//! Page controller
//!
//! [`PageState`] owns the fetched collection and the open modal. User intents
//! turn into [`Command`]s, [`execute`] runs a command against the entity
//! client, and the resulting [`Outcome`] is folded back with
//! [`PageState::apply`]. The view keeps the state in a signal and drives this
//! loop; nothing here de-duplicates or cancels overlapping requests.

use contracts::shared::schema::{DetailField, DetailProjection, EditableEntity, EntityId, EntitySchema};

use crate::client::{Deleted, EntityClient};
use crate::delete_modal::{DeleteConfirmation, DeleteTarget, DismissReason};
use crate::editor::{EditorMode, EditorState};
use crate::error::ClientError;
use crate::list::ListEvent;
use crate::transport::Transport;

/// Which modal, if any, is open over the list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal<S> {
    #[default]
    None,
    Details(S),
    Editor(EditorState<S>),
    Delete(DeleteConfirmation),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command<S> {
    Load { active_only: Option<bool> },
    SetActive { id: EntityId, active: bool },
    Create(S),
    Update { id: EntityId, entity: S },
    Delete { id: EntityId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<S> {
    Loaded(Result<Vec<S>, ClientError>),
    StatusChanged(EntityId, Result<S, ClientError>),
    Saved(Result<S, ClientError>),
    Deleted(Result<Deleted, ClientError>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState<S> {
    pub items: Vec<S>,
    pub loading: bool,
    pub error: Option<String>,
    pub modal: Modal<S>,
    pub active_only: Option<bool>,
}

impl<S> Default for PageState<S> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            modal: Modal::None,
            active_only: None,
        }
    }
}

impl<S: EntitySchema + EditableEntity + DetailProjection> PageState<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a (re)load of the collection
    pub fn load(&mut self) -> Command<S> {
        self.loading = true;
        Command::Load {
            active_only: self.active_only,
        }
    }

    pub fn set_active_filter(&mut self, active_only: Option<bool>) -> Command<S> {
        self.active_only = active_only;
        self.load()
    }

    /// Route a list intent: open a modal, or return the mutation to run
    pub fn handle(&mut self, event: ListEvent<S>) -> Option<Command<S>> {
        match event {
            ListEvent::ToggleStatus(id) => {
                let current = self.items.iter().find(|e| e.id() == id)?;
                Some(Command::SetActive {
                    id,
                    active: !current.status().is_active(),
                })
            }
            ListEvent::View(entity) => {
                self.modal = Modal::Details(entity);
                None
            }
            ListEvent::Edit(entity) => {
                if entity.status().is_active() {
                    self.modal = Modal::Editor(EditorState::edit(entity));
                }
                None
            }
            ListEvent::Delete(entity) => {
                if entity.status().is_active() {
                    self.modal = Modal::Delete(DeleteConfirmation::opened(DeleteTarget {
                        id: entity.id(),
                        name: entity.display_name(),
                    }));
                }
                None
            }
        }
    }

    pub fn open_create(&mut self) {
        self.modal = Modal::Editor(EditorState::create(S::default()));
    }

    pub fn edit_field(&mut self, key: &str, raw: &str) {
        if let Modal::Editor(editor) = &mut self.modal {
            if !editor.saving {
                editor.set_field(key, raw);
            }
        }
    }

    /// Save the open editor. Nothing is returned while a save is already
    /// running or a field does not parse.
    pub fn submit_editor(&mut self) -> Option<Command<S>> {
        let Modal::Editor(editor) = &mut self.modal else {
            return None;
        };
        if editor.saving {
            return None;
        }
        if !editor.is_valid() {
            editor.error = Some("Corrija los campos marcados".to_string());
            return None;
        }
        editor.saving = true;
        editor.error = None;
        Some(match editor.mode {
            EditorMode::Create => Command::Create(editor.form.clone()),
            EditorMode::Edit(id) => Command::Update {
                id,
                entity: editor.form.clone(),
            },
        })
    }

    pub fn confirm_delete(&mut self) -> Option<Command<S>> {
        let Modal::Delete(confirmation) = &mut self.modal else {
            return None;
        };
        let mut command = None;
        confirmation.confirm(|target| command = Some(Command::Delete { id: target.id }));
        command
    }

    /// Close the open modal. Returns false when the modal refuses: a save or
    /// delete is in flight, or the editor got anything but its cancel button.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        let closes = match &mut self.modal {
            Modal::None => false,
            Modal::Details(_) => true,
            // only an explicit cancel closes the editor
            Modal::Editor(editor) => reason == DismissReason::CancelButton && editor.can_dismiss(),
            Modal::Delete(confirmation) => {
                let mut closed = false;
                confirmation.cancel(reason, || closed = true);
                closed
            }
        };
        if closes {
            self.modal = Modal::None;
        }
        closes
    }

    /// Detail lines of the entity shown in the details modal
    pub fn details(&self) -> Option<Vec<DetailField>> {
        match &self.modal {
            Modal::Details(entity) => Some(entity.detail_fields()),
            _ => None,
        }
    }

    /// Fold a finished command back in. May return a follow-up command
    /// (a reload after create, update or delete, or after a status change
    /// whose reply names another record).
    pub fn apply(&mut self, outcome: Outcome<S>) -> Option<Command<S>> {
        match outcome {
            Outcome::Loaded(Ok(items)) => {
                self.items = items;
                self.loading = false;
                self.error = None;
                None
            }
            Outcome::Loaded(Err(e)) => {
                self.loading = false;
                self.error = Some(e.message());
                None
            }
            Outcome::StatusChanged(id, Ok(updated)) => {
                self.error = None;
                if updated.id() != id {
                    log::warn!("status change of {} {} answered with id {}; reloading", S::LABEL, id, updated.id());
                    return Some(self.load());
                }
                if let Modal::Details(shown) = &mut self.modal {
                    if shown.id() == id {
                        *shown = updated.clone();
                    }
                }
                // a row that no longer matches the status filter leaves the list
                let filtered_out = self
                    .active_only
                    .is_some_and(|active| active != updated.status().is_active());
                if filtered_out {
                    self.items.retain(|e| e.id() != id);
                } else if let Some(slot) = self.items.iter_mut().find(|e| e.id() == id) {
                    *slot = updated;
                }
                None
            }
            Outcome::StatusChanged(_, Err(e)) => {
                self.error = Some(e.message());
                None
            }
            Outcome::Saved(Ok(_)) => {
                self.modal = Modal::None;
                Some(self.load())
            }
            Outcome::Saved(Err(e)) => {
                if let Modal::Editor(editor) = &mut self.modal {
                    editor.saving = false;
                    editor.error = Some(e.message());
                } else {
                    self.error = Some(e.message());
                }
                None
            }
            Outcome::Deleted(Ok(_)) => {
                if let Modal::Delete(confirmation) = &mut self.modal {
                    confirmation.complete();
                }
                self.modal = Modal::None;
                Some(self.load())
            }
            Outcome::Deleted(Err(e)) => {
                if let Modal::Delete(confirmation) = &mut self.modal {
                    confirmation.fail(e.message());
                } else {
                    self.error = Some(e.message());
                }
                None
            }
        }
    }
}

/// Run one command against the entity client
pub async fn execute<S, T>(client: &EntityClient<S, T>, command: Command<S>) -> Outcome<S>
where
    S: EntitySchema,
    T: Transport,
{
    match command {
        Command::Load { active_only } => Outcome::Loaded(client.list(active_only).await),
        Command::SetActive { id, active } => Outcome::StatusChanged(id, client.set_active(id, active).await),
        Command::Create(entity) => Outcome::Saved(client.create(&entity).await),
        Command::Update { id, entity } => Outcome::Saved(client.update(id, &entity).await),
        Command::Delete { id } => Outcome::Deleted(client.delete(id).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::list::{dispatch_row_action, RowAction};
    use crate::testing::MockTransport;
    use contracts::domain::a001_category::aggregate::Category;
    use contracts::shared::status::EntityStatus;
    use serde_json::json;
    use std::rc::Rc;

    type Client = EntityClient<Category, Rc<MockTransport>>;

    fn setup() -> (Rc<MockTransport>, Client) {
        let transport = Rc::new(MockTransport::new());
        transport.seed("categorias", json!({"id_categoria": 1, "nombre_categoria": "Bebidas", "tipo_categoria": "Producto", "estado": true}));
        transport.seed("categorias", json!({"id_categoria": 2, "nombre_categoria": "Snacks", "tipo_categoria": "Producto", "estado": false}));
        let config = load_config(None).unwrap();
        let client = EntityClient::new(transport.clone(), &config.api, None);
        (transport, client)
    }

    /// Run a command and every follow-up it triggers
    async fn drive(state: &mut PageState<Category>, client: &Client, command: Command<Category>) {
        let mut next = Some(command);
        while let Some(cmd) = next.take() {
            let outcome = execute(client, cmd).await;
            next = state.apply(outcome);
        }
    }

    #[tokio::test]
    async fn test_load_populates_items() {
        let (_, client) = setup();
        let mut state = PageState::new();
        let cmd = state.load();
        assert!(state.loading);
        drive(&mut state, &client, cmd).await;
        assert!(!state.loading);
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0].name, "Bebidas");
    }

    #[tokio::test]
    async fn test_toggle_patches_row_in_place() {
        let (transport, client) = setup();
        let mut state = PageState::new();
        let cmd = state.load();
        drive(&mut state, &client, cmd).await;
        let before = transport.requests().len();

        let cmd = state.handle(ListEvent::ToggleStatus(2)).unwrap();
        assert_eq!(cmd, Command::SetActive { id: 2, active: true });
        drive(&mut state, &client, cmd).await;

        assert_eq!(state.items[1].status, EntityStatus::Active);
        // get + put, no reload
        assert_eq!(transport.requests().len(), before + 2);
    }

    #[tokio::test]
    async fn test_toggle_against_acknowledgement_keeps_row() {
        let transport = Rc::new(MockTransport::new());
        let config = load_config(None).unwrap();
        let client: Client = EntityClient::new(transport.clone(), &config.api, None);
        transport.reply(200, json!([{"id_categoria": 7, "nombre_categoria": "Bebidas", "estado": true}]));
        let mut state = PageState::new();
        let cmd = state.load();
        drive(&mut state, &client, cmd).await;

        transport.reply(200, json!({"data": {"id_categoria": 7, "nombre_categoria": "Bebidas", "tipo_categoria": "Producto", "estado": true}}));
        transport.reply(200, json!({"message": "Categoría actualizada"}));
        let cmd = state.handle(ListEvent::ToggleStatus(7)).unwrap();
        drive(&mut state, &client, cmd).await;

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, 7);
        assert_eq!(state.items[0].name, "Bebidas");
        assert_eq!(state.items[0].status, EntityStatus::Inactive);
        assert_eq!(
            state.handle(ListEvent::ToggleStatus(7)),
            Some(Command::SetActive { id: 7, active: true })
        );
    }

    #[test]
    fn test_status_reply_for_another_id_reloads() {
        let mut state: PageState<Category> = PageState::new();
        state.items = vec![Category { id: 7, name: "Bebidas".into(), ..Default::default() }];
        let next = state.apply(Outcome::StatusChanged(7, Ok(Category::default())));
        assert_eq!(next, Some(Command::Load { active_only: None }));
        assert_eq!(state.items[0].name, "Bebidas");
    }

    #[tokio::test]
    async fn test_toggle_under_active_filter_drops_row() {
        let (transport, client) = setup();
        let mut state = PageState::new();
        let cmd = state.set_active_filter(Some(true));
        // the mock ignores the filter, so serve only the active row
        transport.reply(200, json!([{"id_categoria": 1, "nombre_categoria": "Bebidas", "tipo_categoria": "Producto", "estado": true}]));
        drive(&mut state, &client, cmd).await;
        assert_eq!(state.items.len(), 1);

        let cmd = state.handle(ListEvent::ToggleStatus(1)).unwrap();
        drive(&mut state, &client, cmd).await;
        assert!(state.items.is_empty());
    }

    #[tokio::test]
    async fn test_inactive_rows_cannot_open_editor_or_delete() {
        let (_, client) = setup();
        let mut state = PageState::new();
        let cmd = state.load();
        drive(&mut state, &client, cmd).await;

        let inactive = state.items[1].clone();
        assert!(dispatch_row_action(&inactive, RowAction::Edit).is_none());
        state.handle(ListEvent::Edit(inactive.clone()));
        assert_eq!(state.modal, Modal::None);
        state.handle(ListEvent::Delete(inactive.clone()));
        assert_eq!(state.modal, Modal::None);

        state.handle(ListEvent::View(inactive));
        assert!(state.details().is_some());
    }

    #[tokio::test]
    async fn test_delete_flow_reloads() {
        let (_, client) = setup();
        let mut state = PageState::new();
        let cmd = state.load();
        drive(&mut state, &client, cmd).await;

        state.handle(ListEvent::Delete(state.items[0].clone()));
        let cmd = state.confirm_delete().unwrap();
        assert_eq!(cmd, Command::Delete { id: 1 });
        assert!(!state.dismiss(DismissReason::Escape));
        assert!(state.confirm_delete().is_none());

        drive(&mut state, &client, cmd).await;
        assert_eq!(state.modal, Modal::None);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, 2);
    }

    #[tokio::test]
    async fn test_failed_delete_reopens_modal_with_message() {
        let (transport, client) = setup();
        let mut state = PageState::new();
        let cmd = state.load();
        drive(&mut state, &client, cmd).await;

        state.handle(ListEvent::Delete(state.items[0].clone()));
        let cmd = state.confirm_delete().unwrap();
        transport.reply(409, json!({"message": "Tiene productos asociados"}));
        drive(&mut state, &client, cmd).await;

        let Modal::Delete(confirmation) = &state.modal else {
            panic!("delete modal should stay open");
        };
        assert_eq!(confirmation.error(), Some("Tiene productos asociados"));
        assert!(state.dismiss(DismissReason::CancelButton));
        assert_eq!(state.modal, Modal::None);
    }

    #[tokio::test]
    async fn test_edit_validation_error_stays_in_editor_without_request() {
        let (transport, client) = setup();
        let mut state = PageState::new();
        let cmd = state.load();
        drive(&mut state, &client, cmd).await;
        let before = transport.requests().len();

        state.handle(ListEvent::Edit(state.items[0].clone()));
        state.edit_field("nombre", "");
        let cmd = state.submit_editor().unwrap();
        assert!(state.submit_editor().is_none());
        assert!(!state.dismiss(DismissReason::Overlay));
        drive(&mut state, &client, cmd).await;

        let Modal::Editor(editor) = &state.modal else {
            panic!("editor should stay open");
        };
        assert!(!editor.saving);
        assert!(editor.error.as_deref().unwrap_or_default().contains("nombre"));
        assert_eq!(transport.requests().len(), before);
    }

    #[test]
    fn test_editor_ignores_overlay_and_escape() {
        let mut state: PageState<Category> = PageState::new();
        state.open_create();
        assert!(!state.dismiss(DismissReason::Overlay));
        assert!(!state.dismiss(DismissReason::Escape));
        assert!(matches!(state.modal, Modal::Editor(_)));
        assert!(state.dismiss(DismissReason::CancelButton));
        assert_eq!(state.modal, Modal::None);
    }

    #[tokio::test]
    async fn test_create_closes_editor_and_reloads() {
        let (_, client) = setup();
        let mut state = PageState::new();
        state.open_create();
        state.edit_field("nombre", "Lácteos");
        state.edit_field("tipoCategoria", "Producto");
        let cmd = state.submit_editor().unwrap();
        assert!(matches!(cmd, Command::Create(_)));

        drive(&mut state, &client, cmd).await;
        assert_eq!(state.modal, Modal::None);
        assert!(state.items.iter().any(|c| c.name == "Lácteos"));
    }

    #[tokio::test]
    async fn test_load_error_keeps_previous_items() {
        let (transport, client) = setup();
        let mut state = PageState::new();
        let cmd = state.load();
        drive(&mut state, &client, cmd).await;

        transport.reply(500, json!({"message": "Base de datos no disponible"}));
        let cmd = state.load();
        drive(&mut state, &client, cmd).await;
        assert_eq!(state.error.as_deref(), Some("Base de datos no disponible"));
        assert_eq!(state.items.len(), 2);
    }
}
