//! Custom Yew hooks for the frontend application.
//!
//! These hooks encapsulate reusable state logic to keep components clean and focused.

mod use_sessions;
mod use_toasts;

pub use use_sessions::{use_sessions, UseSessions};
pub use use_toasts::{use_toasts, ToastSink, UseToasts};
