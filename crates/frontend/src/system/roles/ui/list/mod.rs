use console_core::config::EndpointsConfig;
use contracts::system::roles::Role;
use leptos::prelude::*;

use super::permissions::RolePermissionsModal;
use crate::shared::entity_page::{EntityPage, ListColumns, RowExtra};

impl ListColumns for Role {
    const TITLE: &'static str = "Roles";
    const PAGE_ID: &'static str = "sys_roles--list";

    fn endpoint(endpoints: &EndpointsConfig) -> &str {
        &endpoints.roles
    }

    fn headers() -> Vec<&'static str> {
        vec!["Nombre", "Descripción", "Módulos", "Permisos"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone(),
            self.modules.len().to_string(),
            self.permission_count.to_string(),
        ]
    }
}

#[component]
pub fn RolesList() -> impl IntoView {
    let permissions_for: RwSignal<Option<Role>> = RwSignal::new(None);
    // permission counts change after an assignment
    let reload = RwSignal::new(0u32);

    let row_extra = RowExtra {
        title: "Permisos",
        icon: "key",
        on_click: Callback::new(move |role: Role| permissions_for.set(Some(role))),
    };

    view! {
        <EntityPage<Role> row_extra=row_extra reload=reload />
        {move || permissions_for.get().map(|role| view! {
            <RolePermissionsModal
                role=role
                on_close=Callback::new(move |_| permissions_for.set(None))
                on_saved=Callback::new(move |_| {
                    permissions_for.set(None);
                    reload.update(|n| *n += 1);
                })
            />
        })}
    }
}
