pub mod global_context;
pub mod left;

use leptos::prelude::*;

/// Main application shell.
///
/// ```text
/// +----------------------------------+
/// |            Top bar               |
/// +----------------------------------+
/// |  Navbar   |       Content        |
/// +----------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <header class="top-header">
                <span class="top-header__title">"Consola de gestión"</span>
            </header>
            <div class="app-body">
                <div data-zone="left" class="left">
                    <left::Navbar />
                </div>
                <div class="app-main">{children()}</div>
            </div>
        </div>
    }
}
