//! REST client for the auth backend.
//!
//! DESIGN
//! ======
//! `AuthBackend` is the seam the controller depends on; `HttpBackend` is the
//! reqwest implementation. Response handling is split into pure parsing
//! helpers so status/body edge cases are testable without a socket.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become `AuthError::Network`, non-2xx statuses become
//! `AuthError::Rejected` carrying the backend's `message` (or a fallback
//! naming the call and status), and unparsable success bodies become
//! `AuthError::Decode`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::{Credentials, ErrorBody, MeResponse, TokenResponse, User};

pub const ME_PATH: &str = "/user/me";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";

/// Backend operations the auth controller relies on.
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    /// `GET /user/me` with a bearer token.
    async fn fetch_current_user(&self, token: &str) -> Result<User, AuthError>;

    /// `POST /login`, returning the issued token.
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError>;

    /// `POST /register` with arbitrary user data.
    async fn register(&self, user_data: &Value) -> Result<(), AuthError>;
}

// =============================================================================
// HTTP BACKEND
// =============================================================================

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Option<std::time::Duration>) -> Result<Self, AuthError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    /// Build a client from parsed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Self::new(&config.api_url, config.request_timeout)
    }

    #[cfg(test)]
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read(response: reqwest::Response) -> Result<(u16, String), AuthError> {
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| AuthError::Network(e.to_string()))?;
        Ok((status, text))
    }
}

#[async_trait::async_trait]
impl AuthBackend for HttpBackend {
    async fn fetch_current_user(&self, token: &str) -> Result<User, AuthError> {
        let response = self
            .http
            .get(endpoint(&self.base_url, ME_PATH))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let (status, text) = Self::read(response).await?;
        if !is_success(status) {
            return Err(parse_failure("fetch user", status, &text));
        }
        parse_me(&text)
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let response = self
            .http
            .post(endpoint(&self.base_url, LOGIN_PATH))
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let (status, text) = Self::read(response).await?;
        if !is_success(status) {
            return Err(parse_failure("login", status, &text));
        }
        parse_token(&text)
    }

    async fn register(&self, user_data: &Value) -> Result<(), AuthError> {
        let response = self
            .http
            .post(endpoint(&self.base_url, REGISTER_PATH))
            .json(user_data)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let (status, text) = Self::read(response).await?;
        if !is_success(status) {
            return Err(parse_failure("register", status, &text));
        }
        Ok(())
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn failed_message(call: &str, status: u16) -> String {
    format!("{call} failed: {status}")
}

/// Turn a non-2xx response into a rejection, preferring the body's `message`.
fn parse_failure(call: &str, status: u16, body: &str) -> AuthError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| failed_message(call, status));
    tracing::debug!(call, status, %message, "backend rejected request");
    AuthError::Rejected { status, message }
}

fn parse_token(body: &str) -> Result<String, AuthError> {
    let parsed: TokenResponse = serde_json::from_str(body).map_err(|e| AuthError::Decode(e.to_string()))?;
    Ok(parsed.token)
}

fn parse_me(body: &str) -> Result<User, AuthError> {
    let parsed: MeResponse = serde_json::from_str(body).map_err(|e| AuthError::Decode(e.to_string()))?;
    Ok(parsed.user)
}
