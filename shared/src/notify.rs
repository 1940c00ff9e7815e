//! Transient user feedback.
//!
//! The view never owns a global toast surface; it is handed a [`Notifier`]
//! and fires [`Toast`]s at it without waiting for acknowledgment.

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

const FAILURE_TITLE: &str = "Something went wrong";

/// A short title/description pair for transient display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn deleted() -> Self {
        Self::new("Deleted", "Session successfully deleted")
    }

    pub fn disconnected() -> Self {
        Self::new("Disconnected", "Session successfully disconnected")
    }

    pub fn delete_failed() -> Self {
        Self::new(
            FAILURE_TITLE,
            "Could not remove the session. Please try again later.",
        )
    }

    pub fn disconnect_failed() -> Self {
        Self::new(
            FAILURE_TITLE,
            "Could not disconnect the session. Please try again later.",
        )
    }

    /// The request never reached the server
    pub fn unreachable() -> Self {
        Self::new(
            FAILURE_TITLE,
            "Could not reach the server. Please try again later.",
        )
    }

    /// A transport failure, worded after what went wrong
    pub fn request_failed(error: &ApiError) -> Self {
        match error {
            ApiError::Network(_) => Self::unreachable(),
            ApiError::Auth(_) => Self::new(
                FAILURE_TITLE,
                "Your login could not be verified. Please sign in again.",
            ),
            ApiError::Server { .. } | ApiError::Parse(_) | ApiError::NotFound(_) => Self::new(
                FAILURE_TITLE,
                "The server could not complete the request. Please try again later.",
            ),
        }
    }
}

/// Sink for transient notifications
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

impl<F: Fn(Toast)> Notifier for F {
    fn notify(&self, toast: Toast) {
        self(toast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closures_are_notifiers() {
        let seen = RefCell::new(Vec::new());
        let sink = |toast: Toast| seen.borrow_mut().push(toast);
        sink.notify(Toast::deleted());
        sink.notify(Toast::disconnect_failed());

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].title, "Deleted");
        assert_eq!(seen[1].title, "Something went wrong");
    }

    #[test]
    fn transport_failure_reads_differently_from_soft_failure() {
        assert_ne!(Toast::unreachable(), Toast::delete_failed());
        assert_eq!(Toast::unreachable().title, Toast::delete_failed().title);
    }

    #[test]
    fn request_failure_wording_follows_the_error() {
        let offline = Toast::request_failed(&ApiError::Network("connection refused".into()));
        assert_eq!(offline, Toast::unreachable());

        let answered = [
            ApiError::Server {
                status: 500,
                message: "boom".into(),
            },
            ApiError::Parse("expected value".into()),
            ApiError::NotFound("no such session".into()),
        ];
        for error in &answered {
            let toast = Toast::request_failed(error);
            assert_ne!(toast, Toast::unreachable(), "{}", error);
            assert!(toast.description.starts_with("The server could not"));
        }

        let auth = Toast::request_failed(&ApiError::Auth("expired".into()));
        assert!(auth.description.contains("sign in"));
    }
}
