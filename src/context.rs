//! Application Context
//!
//! Shared handles provided via Leptos Context API. Every page reads the
//! session, the API client and the toast queue from here instead of globals.

use leptos::prelude::*;

use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;
use crate::store::Session;
use crate::toast::{Notifier, Toasts};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub session: Session,
    pub toasts: Toasts,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(config: AppConfig, session: Session) -> Self {
        let toasts = Toasts::new(config.toast_ms);
        Self {
            session,
            toasts,
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Client carrying the current bearer token
    pub fn api(&self) -> ApiClient {
        let base = self.config.with_value(|c| c.api_base.clone());
        ApiClient::new(base, self.session.token_untracked())
    }

    /// Show an API failure; a rejected token also ends the session
    pub fn report(&self, err: &ApiError, fallback: &str) {
        log::error!("[APP] {}: {}", fallback, err);
        let signed_in = self.session.token_untracked().is_some();
        self.toasts.error(&err.session_message(fallback, signed_in));
        if err.is_unauthorized() && signed_in {
            self.session.sign_out();
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
