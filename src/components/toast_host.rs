//! Toast Host Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::toast::ToastKind;

/// Stack of live toasts, newest last
#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_app_context();
    let toasts = ctx.toasts;

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.list()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        ToastKind::Success => "toast success",
                        ToastKind::Error => "toast error",
                    };
                    view! {
                        <div class=class role="status">
                            <span class="toast-message">{toast.message}</span>
                            <button class="toast-close" on:click=move |_| toasts.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
