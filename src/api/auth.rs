//! Auth Calls

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::store::SessionUser;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login` body on success
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginReply {
    pub token: String,
    pub user: SessionUser,
}

impl ApiClient {
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        let url = self.url(&["auth", "login"]);
        let reply: LoginReply = self.send_json(self.request(reqwest::Method::POST, &url).json(credentials)).await?;
        if reply.token.trim().is_empty() {
            return Err(ApiError::Decode("login reply carried an empty token".to_string()));
        }
        log::info!("[API] Signed in as {}", reply.user.email);
        Ok(reply)
    }
}
