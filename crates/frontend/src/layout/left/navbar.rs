use contracts::system::menu::{menu_for_role, MenuGroup, MenuModuleId, MENU_MODULES};
use contracts::system::roles::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::layout::global_context::use_app_context;
use crate::shared::entity_page::ListColumns;
use crate::shared::icons;
use crate::system::auth::storage;

fn icon_for(id: MenuModuleId) -> AnyView {
    icons::icon(match id {
        MenuModuleId::Categories => "categories",
        MenuModuleId::Products => "products",
        MenuModuleId::Purchases => "purchases",
        MenuModuleId::Sales => "sales",
        MenuModuleId::Roles => "roles",
        MenuModuleId::Users => "users",
    })
}

/// Menu with every module, used when the session carries no role
fn full_menu() -> Vec<MenuGroup> {
    let everything = Role {
        modules: MENU_MODULES.iter().map(|m| m.legacy_key.to_string()).collect(),
        ..Default::default()
    };
    menu_for_role(&everything)
}

/// Side navigation built from the signed-in user's role.
///
/// Without a stored role (or when it cannot be fetched) every module is shown;
/// the backend remains the authority on access.
#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app_context();
    let groups: RwSignal<Vec<MenuGroup>> = RwSignal::new(full_menu());

    Effect::new(move |_| {
        let Some(role_id) = storage::get_role_id() else {
            return;
        };
        let client = ctx.entity_client::<Role>(Role::endpoint);
        spawn_local(async move {
            match client.get_by_id(role_id).await {
                Ok(role) => groups.set(menu_for_role(&role)),
                Err(e) => log::warn!("menu: role {} unavailable, showing all modules: {}", role_id, e),
            }
        });
    });

    view! {
        <nav class="main-nav-bar">
            {move || {
                groups
                    .get()
                    .into_iter()
                    .map(|group| view! {
                        <div class="main-nav-bar__section">
                            <div class="main-nav-bar__title">{group.section.label()}</div>
                            <ul>
                                {group
                                    .modules
                                    .into_iter()
                                    .map(|module| view! {
                                        <li>
                                            <A href=module.path>
                                                {icon_for(module.id)}
                                                <span>{module.label}</span>
                                            </A>
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                    })
                    .collect_view()
            }}
        </nav>
    }
}
