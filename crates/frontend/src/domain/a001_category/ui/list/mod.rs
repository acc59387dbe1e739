use console_core::config::EndpointsConfig;
use contracts::domain::a001_category::aggregate::Category;
use leptos::prelude::*;

use crate::shared::entity_page::{EntityPage, ListColumns};

impl ListColumns for Category {
    const TITLE: &'static str = "Categorías";
    const PAGE_ID: &'static str = "a001_category--list";

    fn endpoint(endpoints: &EndpointsConfig) -> &str {
        &endpoints.categories
    }

    fn headers() -> Vec<&'static str> {
        vec!["Nombre", "Tipo", "Descripción"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.kind.clone(), self.description.clone()]
    }
}

#[component]
pub fn CategoryList() -> impl IntoView {
    view! { <EntityPage<Category> /> }
}
