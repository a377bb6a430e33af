//! Toast Host Component
//!
//! Renders the toast queue in a corner; clicking a toast dismisses it.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::toast::ToastKind;

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_app_context().toasts;

    view! {
        <div class="toast-host" role="status">
            <For
                each=move || toasts.visible()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class="toast"
                            class:toast-error=toast.kind == ToastKind::Error
                            on:click=move |_| toasts.dismiss(id)
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
