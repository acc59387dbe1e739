use console_core::config::EndpointsConfig;
use contracts::domain::a003_purchase::aggregate::Purchase;
use contracts::shared::format::{format_date, format_money};
use leptos::prelude::*;

use crate::shared::entity_page::{EntityPage, ListColumns};

impl ListColumns for Purchase {
    const TITLE: &'static str = "Compras";
    const PAGE_ID: &'static str = "a003_purchase--list";

    fn endpoint(endpoints: &EndpointsConfig) -> &str {
        &endpoints.purchases
    }

    fn headers() -> Vec<&'static str> {
        vec!["Código", "Proveedor", "Fecha", "Método de pago", "Total"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.supplier.clone(),
            format_date(&self.date),
            self.payment_method.clone(),
            format_money(self.amount),
        ]
    }
}

#[component]
pub fn PurchaseList() -> impl IntoView {
    view! { <EntityPage<Purchase> /> }
}
