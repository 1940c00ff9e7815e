//! API client types and trait definitions
//!
//! This module defines the sessions API contract that is implemented
//! by both native (reqwest) and WASM (gloo-net) HTTP clients.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::{Session, SessionId};

/// Transport-level API failures.
///
/// None of these are "soft" failures: a delete that removed nothing or a
/// logout that returned `false` arrive as `Ok` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ApiError {
    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),
    /// Server returned an error status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
    /// Authentication required or failed
    #[error("Auth error: {0}")]
    Auth(String),
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Body of `GET /api/sessions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<Session>,
}

/// Body of `DELETE /api/sessions/{id}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteSessionResponse {
    /// Number of records removed; zero when the session was already gone
    pub deleted: u64,
}

/// Body of `POST /api/sessions/{id}/logout`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogoutSessionResponse {
    pub success: bool,
}

/// API endpoint definitions
pub mod endpoints {
    pub const SESSIONS: &str = "/api/sessions";

    pub fn session(id: &str) -> String {
        format!("/api/sessions/{}", id)
    }

    pub fn session_logout(id: &str) -> String {
        format!("/api/sessions/{}/logout", id)
    }
}

/// Trait defining the sessions API
///
/// This trait can be implemented by both native and WASM HTTP clients.
/// All methods are async and return Result<T, ApiError>.
#[allow(async_fn_in_trait)]
pub trait SessionsApi {
    /// List all sessions for the current user, in server order
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError>;

    /// Delete a session record, returning how many records were removed
    async fn delete_session(&self, id: &SessionId) -> Result<u64, ApiError>;

    /// Log out (disconnect) a live session
    async fn logout_session(&self, id: &SessionId) -> Result<bool, ApiError>;
}

impl<T: SessionsApi> SessionsApi for Rc<T> {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        (**self).list_sessions().await
    }

    async fn delete_session(&self, id: &SessionId) -> Result<u64, ApiError> {
        (**self).delete_session(id).await
    }

    async fn logout_session(&self, id: &SessionId) -> Result<bool, ApiError> {
        (**self).logout_session(id).await
    }
}

/// Configuration for creating an API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the server (e.g., "http://localhost:3000")
    pub base_url: String,
    /// Optional auth token for authenticated requests
    pub auth_token: Option<String>,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}
