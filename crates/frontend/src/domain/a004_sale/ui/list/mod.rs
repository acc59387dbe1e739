use console_core::config::EndpointsConfig;
use contracts::domain::a004_sale::aggregate::Sale;
use contracts::shared::format::{format_date, format_money};
use leptos::prelude::*;

use crate::shared::entity_page::{EntityPage, ListColumns};

impl ListColumns for Sale {
    const TITLE: &'static str = "Ventas";
    const PAGE_ID: &'static str = "a004_sale--list";

    fn endpoint(endpoints: &EndpointsConfig) -> &str {
        &endpoints.sales
    }

    fn headers() -> Vec<&'static str> {
        vec!["Código", "Cliente", "Fecha", "Método de pago", "Total"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.customer.clone(),
            format_date(&self.date),
            self.payment_method.clone(),
            format_money(self.amount),
        ]
    }
}

#[component]
pub fn SaleList() -> impl IntoView {
    view! { <EntityPage<Sale> /> }
}
