use console_core::config::ConsoleConfig;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;

#[component]
pub fn App(config: ConsoleConfig) -> impl IntoView {
    // Configuration, transport and clients for the whole app
    provide_context(AppGlobalContext::new(config));

    view! {
        <AppRoutes />
    }
}
