//! Session Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Pages never touch
//! the store directly; they go through the `Session` handle in `AppContext`.

use leptos::prelude::*;
use reactive_stores::Store;
use serde::{Deserialize, Serialize};

use crate::config::SESSION_STORAGE_KEY;
use crate::models::Role;

/// Signed-in user as returned by the login call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Session state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub token: Option<String>,
    /// Page loads in flight; the top bar spins while non-zero
    pub nav_pending: u32,
}

/// What survives a page reload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    user: SessionUser,
}

fn encode_session(token: &str, user: &SessionUser) -> Option<String> {
    serde_json::to_string(&PersistedSession { token: token.to_string(), user: user.clone() }).ok()
}

fn decode_session(raw: &str) -> Option<(String, SessionUser)> {
    let persisted: PersistedSession = serde_json::from_str(raw).ok()?;
    if persisted.token.trim().is_empty() {
        return None;
    }
    Some((persisted.token, persisted.user))
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Typed access to the session, provided through `AppContext`
#[derive(Clone, Copy)]
pub struct Session {
    store: Store<SessionState>,
}

impl Session {
    /// Session from localStorage, or signed out
    pub fn restore() -> Self {
        let mut state = SessionState::default();
        let saved = local_storage()
            .and_then(|s| s.get_item(SESSION_STORAGE_KEY).ok().flatten())
            .and_then(|raw| decode_session(&raw));
        if let Some((token, user)) = saved {
            log::info!("[SESSION] Restored session for {}", user.email);
            state.token = Some(token);
            state.user = Some(user);
        }
        Self { store: Store::new(state) }
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.store.user().get()
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.store.token().get_untracked()
    }

    pub fn is_signed_in(&self) -> bool {
        self.store.token().with(|t| t.is_some())
    }

    pub fn sign_in(&self, token: String, user: SessionUser) {
        if let Some(storage) = local_storage() {
            if let Some(raw) = encode_session(&token, &user) {
                if storage.set_item(SESSION_STORAGE_KEY, &raw).is_err() {
                    log::warn!("[SESSION] Could not persist session");
                }
            }
        }
        log::info!("[SESSION] Signed in as {}", user.email);
        self.store.user().set(Some(user));
        self.store.token().set(Some(token));
    }

    pub fn sign_out(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
        log::info!("[SESSION] Signed out");
        self.store.token().set(None);
        self.store.user().set(None);
        self.store.nav_pending().set(0);
    }

    pub fn is_loading(&self) -> bool {
        self.store.nav_pending().get() > 0
    }

    pub fn begin_navigation(&self) {
        *self.store.nav_pending().write() += 1;
    }

    pub fn end_navigation(&self) {
        let pending = self.store.nav_pending();
        let current = pending.get_untracked();
        pending.set(current.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> SessionUser {
        SessionUser { id: "u1".into(), name: "Ana".into(), email: "ana@office.io".into(), role: Role::Admin }
    }

    #[test]
    fn test_persisted_shape() {
        let raw = encode_session("tok", &ana()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["token"], "tok");
        assert_eq!(value["user"]["role"], "admin");
        assert_eq!(decode_session(&raw), Some(("tok".to_string(), ana())));
    }

    #[test]
    fn test_corrupt_or_empty_sessions_ignored() {
        assert_eq!(decode_session("not json"), None);
        let blank = encode_session("  ", &ana()).unwrap();
        assert_eq!(decode_session(&blank), None);
    }
}
