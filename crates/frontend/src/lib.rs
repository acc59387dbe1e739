pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;

use console_core::config::load_config;
use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

use shared::api_utils::host_config;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = load_config(host_config().as_deref()).or_else(|e| {
        log::error!("Invalid host configuration, using defaults: {:#}", e);
        load_config(None)
    });

    match config {
        Ok(config) => {
            leptos::mount::mount_to_body(move || view! { <app::App config=config /> });
        }
        Err(e) => log::error!("Console configuration unavailable: {:#}", e),
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
