//! Sidebar Component
//!
//! Navigation between the dashboard screens, plus who is signed in.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::toast::Notifier;

/// Screen selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Users,
    Customers,
    Projects,
    Board,
    Leaves,
    Payroll,
    Loans,
    Todos,
    Rejoining,
    Withdrawals,
    Sales,
}

impl Page {
    pub const ALL: &'static [Page] = &[
        Page::Users,
        Page::Customers,
        Page::Projects,
        Page::Board,
        Page::Leaves,
        Page::Payroll,
        Page::Loans,
        Page::Todos,
        Page::Rejoining,
        Page::Withdrawals,
        Page::Sales,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Users => "Users",
            Page::Customers => "Customers",
            Page::Projects => "Projects",
            Page::Board => "Project Board",
            Page::Leaves => "Leaves",
            Page::Payroll => "Payroll",
            Page::Loans => "Loans",
            Page::Todos => "Todos",
            Page::Rejoining => "Rejoining Requests",
            Page::Withdrawals => "Withdrawals",
            Page::Sales => "Sales",
        }
    }
}

#[component]
pub fn Sidebar(current_page: ReadSignal<Page>, set_current_page: WriteSignal<Page>) -> impl IntoView {
    let ctx = use_app_context();

    let on_sign_out = move |_: web_sys::MouseEvent| {
        ctx.session.sign_out();
        ctx.toasts.success("Signed out");
    };

    view! {
        <nav class="sidebar">
            <div class="sidebar-brand">"Office Desk"</div>
            <ul class="sidebar-nav">
                {Page::ALL.iter().map(|&page| {
                    let is_active = move || current_page.get() == page;
                    view! {
                        <li>
                            <button
                                class=move || if is_active() { "nav-item active" } else { "nav-item" }
                                on:click=move |_| set_current_page.set(page)
                            >
                                {page.label()}
                            </button>
                        </li>
                    }
                }).collect_view()}
            </ul>
            <div class="sidebar-user">
                {move || ctx.session.user().map(|user| view! {
                    <div class="sidebar-user-name">{user.name}</div>
                    <div class="sidebar-user-role">{user.role.label()}</div>
                })}
                <button class="secondary-btn" on:click=on_sign_out>"Sign out"</button>
            </div>
        </nav>
    }
}
