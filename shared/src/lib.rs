use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// API client types and trait
pub mod api;
pub use api::{ApiClientConfig, ApiError, SessionsApi};

// Toast feedback contract
pub mod notify;
pub use notify::{Notifier, Toast};

// Confirmation state machine and its async driver
pub mod controller;
pub mod view;
pub use controller::{MutationOutcome, SessionsController};
pub use view::{ActionKind, DialogState, ListTicket, SessionsView, ViewConfig};

// Table projection
pub mod rows;
pub use rows::{format_timestamp, format_timestamp_in, row_actions, SessionRow};

/// Opaque session identifier as issued by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One authenticated client connection (browser extension install, device, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Server-side document id; older payloads send it as `id`
    #[serde(rename = "_id", alias = "id")]
    pub id: SessionId,
    pub browser: String,
    pub os: String,
    pub arch: String,
    /// Whether the session currently holds a live connection
    pub active: bool,
    pub last_connected_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// "os, arch" label shown under the browser name
    pub fn platform(&self) -> String {
        format!("{}, {}", self.os, self.arch)
    }

    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// Builders for tests across the crate
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use chrono::TimeZone;

    pub fn session(id: &str, active: bool) -> Session {
        Session {
            id: SessionId::new(id),
            browser: "firefox".to_string(),
            os: "linux".to_string(),
            arch: "x86_64".to_string(),
            active,
            last_connected_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
        }
    }
}
