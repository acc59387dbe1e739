//! Delete confirmation state machine
//!
//! `Closed -> Open -> Confirming`, with cancel returning to `Closed`.
//! Dismissal (cancel button, overlay click, Escape) is ignored while a delete
//! request is in flight. The owner moves `Confirming` back to `Closed` with
//! [`DeleteConfirmation::complete`] or re-opens it with an error through
//! [`DeleteConfirmation::fail`]; there is no retry here.

use contracts::shared::schema::EntityId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePhase {
    #[default]
    Closed,
    Open,
    Confirming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    CancelButton,
    Overlay,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteConfirmation {
    phase: DeletePhase,
    target: Option<DeleteTarget>,
    is_loading: bool,
    error: Option<String>,
}

impl DeleteConfirmation {
    pub fn open(&mut self, target: DeleteTarget) {
        self.phase = DeletePhase::Open;
        self.target = Some(target);
        self.is_loading = false;
        self.error = None;
    }

    pub fn opened(target: DeleteTarget) -> Self {
        let mut modal = Self::default();
        modal.open(target);
        modal
    }

    pub fn phase(&self) -> DeletePhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != DeletePhase::Closed
    }

    pub fn target(&self) -> Option<&DeleteTarget> {
        self.target.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Dismiss the modal. `on_close` runs once when the modal actually
    /// closes; nothing happens while loading or when already closed.
    pub fn cancel(&mut self, reason: DismissReason, on_close: impl FnOnce()) -> bool {
        if self.is_loading {
            log::debug!("delete modal: {:?} ignored while request is in flight", reason);
            return false;
        }
        if self.phase == DeletePhase::Closed {
            return false;
        }
        *self = Self::default();
        on_close();
        true
    }

    /// Confirm from `Open`. Marks the modal as loading and hands the target
    /// to `on_delete`.
    pub fn confirm(&mut self, on_delete: impl FnOnce(&DeleteTarget)) -> bool {
        if self.phase != DeletePhase::Open || self.is_loading {
            return false;
        }
        let Some(target) = self.target.as_ref() else {
            return false;
        };
        self.phase = DeletePhase::Confirming;
        self.is_loading = true;
        self.error = None;
        on_delete(target);
        true
    }

    /// The delete finished; close.
    pub fn complete(&mut self) {
        *self = Self::default();
    }

    /// The delete failed; back to `Open` with the message shown.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.target.is_some() {
            self.phase = DeletePhase::Open;
        }
        self.is_loading = false;
        self.error = Some(message.into());
    }
}
