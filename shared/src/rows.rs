//! Table projection of the session list.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

use crate::view::{ActionKind, SessionsView, ViewConfig};
use crate::{Session, SessionId};

/// Format a timestamp in the viewer's local time zone
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    format_timestamp_in(ts, &Local)
}

/// Format a timestamp in an explicit time zone
pub fn format_timestamp_in<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Actions offered in a row's menu, in display order
pub fn row_actions(session: &Session, config: ViewConfig) -> Vec<ActionKind> {
    let mut actions = Vec::with_capacity(2);
    if session.active && config.supports_disconnect {
        actions.push(ActionKind::Disconnect);
    }
    actions.push(ActionKind::Delete);
    actions
}

/// Display-ready row of the sessions table
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub id: SessionId,
    pub browser: String,
    pub platform: String,
    pub active: bool,
    pub status: &'static str,
    pub last_connected: String,
    pub created: String,
    pub actions: Vec<ActionKind>,
}

impl SessionRow {
    pub fn new(session: &Session, config: ViewConfig) -> Self {
        Self {
            id: session.id.clone(),
            browser: session.browser.clone(),
            platform: session.platform(),
            active: session.active,
            status: session.status_label(),
            last_connected: format_timestamp(&session.last_connected_at),
            created: format_timestamp(&session.created_at),
            actions: row_actions(session, config),
        }
    }
}

impl SessionsView {
    /// Rows for the current list; empty until loaded
    pub fn rows(&self) -> Vec<SessionRow> {
        let config = self.config();
        self.sessions()
            .unwrap_or_default()
            .iter()
            .map(|s| SessionRow::new(s, config))
            .collect()
    }
}
