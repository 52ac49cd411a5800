//! Office Desk App
//!
//! Root component: login gate, sidebar navigation and the active screen.

use leptos::prelude::*;

use crate::components::{LoginForm, Page, ProjectBoard, ResourcePage, Sidebar, ToastHost};
use crate::config::AppConfig;
use crate::context::{use_app_context, AppContext};
use crate::models::{Customer, Leave, Loan, Payroll, Project, RejoinRequest, Sale, Todo, User, Withdrawal};
use crate::store::Session;

/// Root component; `config` is built once at startup
#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    log::info!("[APP] Starting against {}", config.api_base);

    // Provide context to all children
    let ctx = AppContext::new(config, Session::restore());
    provide_context(ctx);

    let signed_in = move || ctx.session.is_signed_in();

    view! {
        <Show when=signed_in fallback=|| view! { <LoginForm /> }>
            <Dashboard />
        </Show>
        <ToastHost />
    }
}

/// Signed-in layout: sidebar on the left, active screen on the right
#[component]
fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();
    let (current_page, set_current_page) = signal(Page::Customers);

    let page_view = move || match current_page.get() {
        Page::Users => view! { <ResourcePage<User> /> }.into_any(),
        Page::Customers => view! { <ResourcePage<Customer> /> }.into_any(),
        Page::Projects => view! { <ResourcePage<Project> /> }.into_any(),
        Page::Board => view! { <ProjectBoard /> }.into_any(),
        Page::Leaves => view! { <ResourcePage<Leave> /> }.into_any(),
        Page::Payroll => view! { <ResourcePage<Payroll> /> }.into_any(),
        Page::Loans => view! { <ResourcePage<Loan> /> }.into_any(),
        Page::Todos => view! { <ResourcePage<Todo> /> }.into_any(),
        Page::Rejoining => view! { <ResourcePage<RejoinRequest> /> }.into_any(),
        Page::Withdrawals => view! { <ResourcePage<Withdrawal> /> }.into_any(),
        Page::Sales => view! { <ResourcePage<Sale> /> }.into_any(),
    };

    view! {
        <div class="app-layout">
            <Sidebar current_page=current_page set_current_page=set_current_page />
            <main class="app-main">
                <div class=move || if ctx.session.is_loading() { "nav-progress active" } else { "nav-progress" } />
                {page_view}
            </main>
        </div>
    }
}
