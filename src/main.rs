//! Office Desk Frontend Entry Point

mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod form;
mod models;
mod paginate;
mod store;
mod toast;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = config::AppConfig::from_env();
    if let Err(err) = console_logger::init_logger(config.log_level) {
        web_sys::console::warn_1(&format!("logger already set: {}", err).into());
    }

    mount_to_body(move || view! { <App config=config.clone() /> });
}
