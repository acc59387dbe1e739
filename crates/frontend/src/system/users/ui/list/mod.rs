use console_core::config::EndpointsConfig;
use contracts::system::users::User;
use leptos::prelude::*;

use crate::shared::entity_page::{EntityPage, ListColumns};

impl ListColumns for User {
    const TITLE: &'static str = "Usuarios";
    const PAGE_ID: &'static str = "sys_users--list";

    fn endpoint(endpoints: &EndpointsConfig) -> &str {
        &endpoints.users
    }

    fn headers() -> Vec<&'static str> {
        vec!["Nombre", "Email", "Rol"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone(), self.role_name.clone()]
    }
}

#[component]
pub fn UsersList() -> impl IntoView {
    view! { <EntityPage<User> /> }
}
