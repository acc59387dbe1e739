//! Generic entity page
//!
//! One page component drives list → toggle → view → edit → delete for any
//! entity: it keeps a [`PageState`] in a signal, renders the table and the open
//! modal, and runs the commands the state hands back.

mod modals;
mod table;

use console_core::config::EndpointsConfig;
use console_core::delete_modal::DismissReason;
use console_core::list::{dispatch_row_action, RowAction};
use console_core::page::{execute, Command, Modal, PageState};
use contracts::shared::schema::{DetailProjection, EditableEntity, EntitySchema};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use modals::{DeleteConfirmModal, DetailsModal, EditorModal};
use table::EntityTable;

/// How an entity is shown in the list
pub trait ListColumns: EntitySchema + EditableEntity + DetailProjection {
    const TITLE: &'static str;
    /// DOM id of the page root, `"{entity}--list"`
    const PAGE_ID: &'static str;

    /// Configured endpoint for this entity
    fn endpoint(endpoints: &EndpointsConfig) -> &str;

    /// Column headers, status and actions excluded
    fn headers() -> Vec<&'static str>;

    /// Cell texts, in header order
    fn cells(&self) -> Vec<String>;
}

/// Additional row button next to the standard actions.
///
/// Enabled under the same rule as edit.
#[derive(Clone)]
pub struct RowExtra<S: 'static> {
    pub title: &'static str,
    pub icon: &'static str,
    pub on_click: Callback<S>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModalKind {
    None,
    Details,
    Editor,
    Delete,
}

impl ModalKind {
    fn of<S>(modal: &Modal<S>) -> Self {
        match modal {
            Modal::None => ModalKind::None,
            Modal::Details(_) => ModalKind::Details,
            Modal::Editor(_) => ModalKind::Editor,
            Modal::Delete(_) => ModalKind::Delete,
        }
    }
}

#[component]
pub fn EntityPage<S>(
    #[prop(optional)] row_extra: Option<RowExtra<S>>,
    /// Bumping this signal reloads the list
    #[prop(optional)]
    reload: Option<RwSignal<u32>>,
) -> impl IntoView
where
    S: ListColumns,
{
    let ctx = use_app_context();
    let client = StoredValue::new(ctx.entity_client::<S>(S::endpoint));
    let state = RwSignal::new(PageState::<S>::new());

    // Runs a command and the follow-ups its outcome asks for
    let run = move |command: Command<S>| {
        spawn_local(async move {
            let mut next = Some(command);
            while let Some(command) = next.take() {
                let client = client.get_value();
                let outcome = execute(&client, command).await;
                next = state.try_update(|s| s.apply(outcome)).flatten();
            }
        });
    };

    Effect::new(move |_| {
        if let Some(reload) = reload {
            reload.track();
        }
        if let Some(command) = state.try_update(|s| s.load()) {
            run(command);
        }
    });

    let on_row = Callback::new(move |(entity, action): (S, RowAction)| {
        let Some(event) = dispatch_row_action(&entity, action) else {
            return;
        };
        if let Some(command) = state.try_update(|s| s.handle(event)).flatten() {
            run(command);
        }
    });

    let on_dismiss = Callback::new(move |reason: DismissReason| {
        state.update(|s| {
            s.dismiss(reason);
        });
    });

    let on_submit = Callback::new(move |_: ()| {
        if let Some(command) = state.try_update(|s| s.submit_editor()).flatten() {
            run(command);
        }
    });

    let on_confirm_delete = Callback::new(move |_: ()| {
        if let Some(command) = state.try_update(|s| s.confirm_delete()).flatten() {
            run(command);
        }
    });

    let on_filter = move |ev: ev::Event| {
        let active_only = match event_target_value(&ev).as_str() {
            "activos" => Some(true),
            "inactivos" => Some(false),
            _ => None,
        };
        if let Some(command) = state.try_update(|s| s.set_active_filter(active_only)) {
            run(command);
        }
    };

    let refresh = move |_| {
        if let Some(command) = state.try_update(|s| s.load()) {
            run(command);
        }
    };

    let loading = Signal::derive(move || state.with(|s| s.loading));
    let items = Signal::derive(move || state.with(|s| s.items.clone()));
    let modal_kind = Memo::new(move |_| state.with(|s| ModalKind::of(&s.modal)));

    view! {
        <div class="page" id=S::PAGE_ID>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{S::TITLE}</h1>
                    <Badge>{move || state.with(|s| s.items.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <select class="form__select" on:change=on_filter>
                        <option value="todos">"Todos"</option>
                        <option value="activos">"Activos"</option>
                        <option value="inactivos">"Inactivos"</option>
                    </select>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| state.update(|s| s.open_create())
                    >
                        {icon("plus")}
                        " Nuevo"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=refresh
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Cargando..." } else { " Actualizar" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="alert alert--error">{e}</div> })}
                <EntityTable<S> items=items on_row=on_row row_extra=row_extra />
            </div>

            {move || match modal_kind.get() {
                ModalKind::None => ().into_any(),
                ModalKind::Details => view! {
                    <DetailsModal<S> state=state on_dismiss=on_dismiss />
                }.into_any(),
                ModalKind::Editor => view! {
                    <EditorModal<S> state=state on_dismiss=on_dismiss on_submit=on_submit />
                }.into_any(),
                ModalKind::Delete => view! {
                    <DeleteConfirmModal<S> state=state on_dismiss=on_dismiss on_confirm=on_confirm_delete />
                }.into_any(),
            }}
        </div>
    }
}
