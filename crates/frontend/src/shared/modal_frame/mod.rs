use console_core::delete_modal::DismissReason;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

/// Modal frame (overlay + surface + header with close button).
///
/// The frame never closes itself. Overlay clicks, the close button and Escape
/// are reported through `on_dismiss` with their [`DismissReason`]; the owner
/// decides whether the modal actually closes.
#[component]
pub fn ModalFrame(
    title: Signal<String>,
    on_dismiss: Callback<DismissReason>,
    /// Extra class for the modal surface (`div.modal`).
    #[prop(optional)]
    modal_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Only a press and release both on the overlay count, so selecting text
    // inside the modal and releasing outside does not dismiss it.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_dismiss = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_dismiss {
            // Defer to next tick: the overlay may be removed during its own click dispatch.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_dismiss.run(DismissReason::Overlay);
            });
        }
    };

    let escape = window_event_listener(ev::keydown, move |ev: ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            on_dismiss.run(DismissReason::Escape);
        }
    });
    on_cleanup(move || escape.remove());

    let modal_class = match modal_class {
        Some(cls) => format!("modal {}", cls),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=modal_class on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button
                        class="button button--icon modal__close"
                        on:click=move |_| on_dismiss.run(DismissReason::CancelButton)
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
