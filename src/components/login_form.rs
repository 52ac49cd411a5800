//! Login Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::Credentials;
use crate::context::use_app_context;
use crate::form::{validate_draft, Draft, FieldKind, FieldSpec};
use crate::toast::Notifier;

const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("email", "Email", FieldKind::Email),
    FieldSpec::required("password", "Password", FieldKind::Password),
];

/// Sign-in screen shown while there is no session
#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let draft = Draft::new()
            .with("email", email.get_untracked())
            .with("password", password.get_untracked());
        if let Err(err) = validate_draft(LOGIN_FIELDS, &draft) {
            ctx.toasts.error(&err.to_string());
            return;
        }

        let credentials = Credentials { email: draft.text("email"), password: draft.raw("password").to_string() };
        let api = ctx.api();
        set_submitting.set(true);
        spawn_local(async move {
            match api.login(&credentials).await {
                Ok(reply) => {
                    ctx.toasts.success(&format!("Welcome back, {}", reply.user.name));
                    set_password.set(String::new());
                    ctx.session.sign_in(reply.token, reply.user);
                }
                Err(err) => ctx.report(&err, "Invalid email or password"),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"Office Desk"</h1>
                <p class="login-hint">"Sign in to continue"</p>
                <label class="form-field">
                    <span class="form-label">"Email"</span>
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    <span class="form-label">"Password"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
