//! Permission assignment for one role

use console_core::delete_modal::DismissReason;
use console_core::roles::PermissionAssignment;
use contracts::system::roles::{Permission, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::use_app_context;
use crate::shared::modal_frame::ModalFrame;

#[component]
pub fn RolePermissionsModal(
    role: Role,
    on_close: Callback<()>,
    /// Called after the assignment was stored
    on_saved: Callback<()>,
) -> impl IntoView {
    let client = StoredValue::new(use_app_context().roles_client());
    let role_id = role.id;

    let available: RwSignal<Vec<Permission>> = RwSignal::new(Vec::new());
    let assignment = RwSignal::new(PermissionAssignment::new(role_id, &[]));
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        spawn_local(async move {
            let client = client.get_value();
            let all = client.permissions().await;
            let current = client.role_permissions(role_id).await;
            match (all, current) {
                (Ok(all), Ok(current)) => {
                    available.set(all);
                    assignment.set(PermissionAssignment::new(role_id, &current));
                }
                (Err(e), _) | (_, Err(e)) => set_error.set(Some(e.message())),
            }
            set_loading.set(false);
        });
    });

    let save = move |_| {
        if saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        set_error.set(None);
        let ids = assignment.with_untracked(|a| a.ids());
        spawn_local(async move {
            match client.get_value().assign(role_id, &ids).await {
                Ok(()) => on_saved.run(()),
                Err(e) => {
                    set_error.set(Some(e.message()));
                    set_saving.set(false);
                }
            }
        });
    };

    // no closing while the assignment is being stored
    let on_dismiss = Callback::new(move |_: DismissReason| {
        if !saving.get_untracked() {
            on_close.run(());
        }
    });

    let busy = Signal::derive(move || loading.get() || saving.get());
    let title = format!("Permisos del rol: {}", role.name);

    view! {
        <ModalFrame title=Signal::derive(move || title.clone()) on_dismiss=on_dismiss>
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="permissions__toolbar">
                <span>{move || format!("{} seleccionados", assignment.with(|a| a.count()))}</span>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=busy
                    on_click=move |_| {
                        available.with_untracked(|all| assignment.update(|a| a.select_all(all)))
                    }
                >
                    "Seleccionar todos"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=busy
                    on_click=move |_| assignment.update(|a| a.clear())
                >
                    "Ninguno"
                </Button>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="permissions__loading">"Cargando permisos..."</div> }
            >
                <ul class="permissions__list">
                    {move || {
                        available
                            .get()
                            .into_iter()
                            .map(|permission| {
                                let id = permission.id;
                                view! {
                                    <li class="permissions__item">
                                        <label>
                                            <input
                                                type="checkbox"
                                                prop:checked=move || assignment.with(|a| a.is_selected(id))
                                                disabled=move || saving.get()
                                                on:change=move |_| assignment.update(|a| a.toggle(id))
                                            />
                                            <span class="permissions__name">{permission.name}</span>
                                        </label>
                                        <small class="permissions__description">{permission.description}</small>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>

            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=saving
                    on_click=move |_| on_dismiss.run(DismissReason::CancelButton)
                >
                    "Cancelar"
                </Button>
                <Button appearance=ButtonAppearance::Primary disabled=busy on_click=save>
                    {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                </Button>
            </div>
        </ModalFrame>
    }
}
