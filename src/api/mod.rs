//! REST API Client
//!
//! Frontend bindings to the backend, organized by domain. Every call is
//! authenticated with the session's bearer token and decoded into explicit
//! types before it reaches application state.

mod auth;
mod envelope;
mod error;
mod project;
mod resource;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

pub use auth::Credentials;
pub use envelope::{ListEnvelope, MutationReply};
pub use error::ApiError;

/// Characters escaped inside one path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Join `base` and percent-encoded `segments` into a URL
pub fn endpoint(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
    }
    url
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
            token,
        }
    }

    pub fn url(&self, segments: &[&str]) -> String {
        endpoint(&self.base, segments)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        log::debug!("[API] {} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the raw body of a 2xx response
    async fn send_raw(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await.map_err(|e| {
            log::warn!("[API] request failed: {}", e);
            ApiError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &body);
            log::warn!("[API] {} -> {:?}", status, err);
            return Err(err);
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send_raw(builder).await?;
        serde_json::from_str(&body).map_err(|e| {
            log::warn!("[API] decode failed: {}", e);
            ApiError::from(e)
        })
    }

    async fn send_mutation<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<MutationReply<T>, ApiError> {
        let body = self.send_raw(builder).await?;
        if body.trim().is_empty() {
            return Ok(MutationReply::Empty);
        }
        serde_json::from_str(&body).map_err(|e| {
            log::warn!("[API] decode failed: {}", e);
            ApiError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        assert_eq!(endpoint("http://localhost:5000/api/", &["customers"]), "http://localhost:5000/api/customers");
        assert_eq!(
            endpoint("http://localhost:5000/api", &["projects", "42", "status"]),
            "http://localhost:5000/api/projects/42/status"
        );
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        assert_eq!(endpoint("https://x.io", &["loans", "a/b c?"]), "https://x.io/loans/a%2Fb%20c%3F");
    }
}
