use console_core::config::EndpointsConfig;
use contracts::domain::a002_product::aggregate::Product;
use contracts::shared::format::format_money;
use leptos::prelude::*;

use crate::shared::entity_page::{EntityPage, ListColumns};

impl ListColumns for Product {
    const TITLE: &'static str = "Productos";
    const PAGE_ID: &'static str = "a002_product--list";

    fn endpoint(endpoints: &EndpointsConfig) -> &str {
        &endpoints.products
    }

    fn headers() -> Vec<&'static str> {
        vec!["Código", "Nombre", "Categoría", "Precio", "Stock", "Stock mínimo"]
    }

    fn cells(&self) -> Vec<String> {
        let stock = if self.is_low_stock() {
            format!("{} (bajo)", self.stock)
        } else {
            self.stock.to_string()
        };
        vec![
            self.code.clone(),
            self.name.clone(),
            self.category_name.clone(),
            format_money(self.price),
            stock,
            self.min_stock.to_string(),
        ]
    }
}

#[component]
pub fn ProductList() -> impl IntoView {
    view! { <EntityPage<Product> /> }
}
