use console_core::delete_modal::{DeleteConfirmation, DismissReason};
use console_core::editor::EditorState;
use console_core::page::{Modal, PageState};
use contracts::shared::schema::FieldKind;
use leptos::prelude::*;
use thaw::*;

use super::ListColumns;
use crate::shared::modal_frame::ModalFrame;

// ============================================================================
// Details
// ============================================================================

#[component]
pub fn DetailsModal<S>(state: RwSignal<PageState<S>>, on_dismiss: Callback<DismissReason>) -> impl IntoView
where
    S: ListColumns,
{
    let title = Signal::derive(move || {
        state.with(|s| match &s.modal {
            Modal::Details(entity) => format!("Detalle de {}: {}", S::LABEL, entity.display_name()),
            _ => String::new(),
        })
    });

    view! {
        <ModalFrame title=title on_dismiss=on_dismiss>
            <dl class="details">
                {move || {
                    state
                        .with(|s| s.details())
                        .unwrap_or_default()
                        .into_iter()
                        .map(|field| view! {
                            <div class="details__row" class:details__row--alert=field.alert>
                                <dt class="details__label">{field.label}</dt>
                                <dd class="details__value">{field.value}</dd>
                            </div>
                        })
                        .collect_view()
                }}
            </dl>
            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_dismiss.run(DismissReason::CancelButton)
                >
                    "Cerrar"
                </Button>
            </div>
        </ModalFrame>
    }
}

// ============================================================================
// Delete confirmation
// ============================================================================

fn confirmation<S>(state: &PageState<S>) -> Option<&DeleteConfirmation> {
    match &state.modal {
        Modal::Delete(c) => Some(c),
        _ => None,
    }
}

#[component]
pub fn DeleteConfirmModal<S>(
    state: RwSignal<PageState<S>>,
    on_dismiss: Callback<DismissReason>,
    on_confirm: Callback<()>,
) -> impl IntoView
where
    S: ListColumns,
{
    let is_loading = Signal::derive(move || {
        state.with(|s| confirmation(s).map(|c| c.is_loading()).unwrap_or(false))
    });
    let name = move || {
        state.with(|s| {
            confirmation(s)
                .and_then(|c| c.target())
                .map(|t| t.name.clone())
                .unwrap_or_default()
        })
    };
    let error = move || state.with(|s| confirmation(s).and_then(|c| c.error()).map(str::to_string));

    view! {
        <ModalFrame
            title=Signal::derive(|| "Confirmar eliminación".to_string())
            on_dismiss=on_dismiss
            modal_class="modal--confirm"
        >
            <p class="modal__message">
                "¿Está seguro de que desea eliminar "
                <strong>{name}</strong>
                "? Esta acción no se puede deshacer."
            </p>
            {move || error().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=is_loading
                    on_click=move |_| on_dismiss.run(DismissReason::CancelButton)
                >
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=is_loading
                    on_click=move |_| on_confirm.run(())
                >
                    {move || if is_loading.get() { "Eliminando..." } else { "Eliminar" }}
                </Button>
            </div>
        </ModalFrame>
    }
}

// ============================================================================
// Create / edit
// ============================================================================

fn editor<S>(state: &PageState<S>) -> Option<&EditorState<S>> {
    match &state.modal {
        Modal::Editor(e) => Some(e),
        _ => None,
    }
}

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Date => "date",
        FieldKind::Integer => "number",
        FieldKind::Text | FieldKind::Decimal | FieldKind::List => "text",
    }
}

#[component]
pub fn EditorModal<S>(
    state: RwSignal<PageState<S>>,
    on_dismiss: Callback<DismissReason>,
    on_submit: Callback<()>,
) -> impl IntoView
where
    S: ListColumns,
{
    // Inputs are uncontrolled: rendered once with the opening values, then
    // every keystroke is parsed into the form model.
    let fields = state.with_untracked(|s| editor(s).map(|e| e.fields()).unwrap_or_default());

    let title = Signal::derive(move || state.with(|s| editor(s).map(|e| e.title()).unwrap_or_default()));
    let saving = Signal::derive(move || state.with(|s| editor(s).map(|e| e.saving).unwrap_or(false)));
    let error = move || state.with(|s| editor(s).and_then(|e| e.error.clone()));

    view! {
        <ModalFrame title=title on_dismiss=on_dismiss>
            <div class="form">
                {fields
                    .into_iter()
                    .map(|field| {
                        let key = field.key;
                        let invalid = move || {
                            state.with(|s| editor(s).and_then(|e| e.invalid.get(key).cloned()))
                        };
                        view! {
                            <div class="form__group">
                                <label class="form__label">
                                    {field.label}
                                    {field.required.then_some(" *")}
                                </label>
                                <input
                                    class="form__input"
                                    type=input_type(field.kind)
                                    value=field.value
                                    disabled=move || saving.get()
                                    on:input=move |ev| {
                                        let raw = event_target_value(&ev);
                                        state.update(|s| s.edit_field(key, &raw));
                                    }
                                />
                                {move || invalid().map(|msg| view! { <span class="form__error">{msg}</span> })}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            {move || error().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=saving
                    on_click=move |_| on_dismiss.run(DismissReason::CancelButton)
                >
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=saving
                    on_click=move |_| on_submit.run(())
                >
                    {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                </Button>
            </div>
        </ModalFrame>
    }
}
