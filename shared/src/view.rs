//! Sessions view state.
//!
//! [`SessionsView`] is a plain reducer: it never performs I/O. The
//! controller feeds it list results and mutation outcomes, and reads back
//! which call (if any) to issue next.

use crate::{Session, SessionId, Toast};

/// A destructive, confirmation-gated action on one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Delete,
    Disconnect,
}

impl ActionKind {
    /// Label in the per-row actions menu
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Delete => "Delete",
            ActionKind::Disconnect => "Disconnect",
        }
    }

    pub fn dialog_title(self) -> &'static str {
        match self {
            ActionKind::Delete => "Delete session",
            ActionKind::Disconnect => "Disconnect session",
        }
    }

    pub fn dialog_description(self) -> &'static str {
        match self {
            ActionKind::Delete => {
                "This action cannot be undone. This will permanently delete the session and \
                 remove all associated data."
            }
            ActionKind::Disconnect => {
                "Are you sure you want to disconnect this session? Please note that to \
                 reconnect, the session must be reactivated from the extension."
            }
        }
    }

    pub fn success_toast(self) -> Toast {
        match self {
            ActionKind::Delete => Toast::deleted(),
            ActionKind::Disconnect => Toast::disconnected(),
        }
    }

    pub fn failure_toast(self) -> Toast {
        match self {
            ActionKind::Delete => Toast::delete_failed(),
            ActionKind::Disconnect => Toast::disconnect_failed(),
        }
    }
}

/// Confirmation dialog state; the pending id lives inside the open states
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    AwaitingConfirmation(SessionId),
    Submitting(SessionId),
}

impl DialogState {
    pub fn pending(&self) -> Option<&SessionId> {
        match self {
            DialogState::Closed => None,
            DialogState::AwaitingConfirmation(id) | DialogState::Submitting(id) => Some(id),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, DialogState::Submitting(_))
    }
}

/// Capabilities of a particular sessions page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    /// Offer "Disconnect" on active sessions
    pub supports_disconnect: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            supports_disconnect: true,
        }
    }
}

/// Sequence number handed out for each issued list query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListTicket(u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionsView {
    config: ViewConfig,
    /// `None` until the first list query succeeds
    sessions: Option<Vec<Session>>,
    delete: DialogState,
    disconnect: DialogState,
    issued: u64,
    applied: u64,
}

impl SessionsView {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> ViewConfig {
        self.config
    }

    pub fn sessions(&self) -> Option<&[Session]> {
        self.sessions.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.sessions.is_some()
    }

    pub fn dialog(&self, kind: ActionKind) -> &DialogState {
        match kind {
            ActionKind::Delete => &self.delete,
            ActionKind::Disconnect => &self.disconnect,
        }
    }

    fn dialog_mut(&mut self, kind: ActionKind) -> &mut DialogState {
        match kind {
            ActionKind::Delete => &mut self.delete,
            ActionKind::Disconnect => &mut self.disconnect,
        }
    }

    pub fn pending(&self, kind: ActionKind) -> Option<&SessionId> {
        self.dialog(kind).pending()
    }

    pub fn is_dialog_open(&self, kind: ActionKind) -> bool {
        self.dialog(kind).is_open()
    }

    /// Look up a session in the last applied list
    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions()?.iter().find(|s| &s.id == id)
    }

    /// Register a new list query. Responses are applied in ticket order.
    pub fn begin_list(&mut self) -> ListTicket {
        self.issued += 1;
        ListTicket(self.issued)
    }

    /// Replace the list wholesale with a query result.
    ///
    /// Returns `false` (and leaves the list alone) when a newer query has
    /// already been applied.
    pub fn apply_list(&mut self, ticket: ListTicket, sessions: Vec<Session>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        self.sessions = Some(sessions);
        true
    }

    /// Record the target of an action and open its dialog.
    ///
    /// The target is not re-validated against the list. Ignored while that
    /// dialog is submitting, and for disconnect when the page lacks it.
    pub fn select(&mut self, kind: ActionKind, id: SessionId) -> bool {
        if kind == ActionKind::Disconnect && !self.config.supports_disconnect {
            return false;
        }
        let dialog = self.dialog_mut(kind);
        if dialog.is_submitting() {
            return false;
        }
        *dialog = DialogState::AwaitingConfirmation(id);
        true
    }

    /// Close an open dialog without issuing anything
    pub fn cancel(&mut self, kind: ActionKind) -> bool {
        let dialog = self.dialog_mut(kind);
        if !matches!(dialog, DialogState::AwaitingConfirmation(_)) {
            return false;
        }
        *dialog = DialogState::Closed;
        true
    }

    /// Move an awaiting dialog to submitting, yielding the id to mutate
    pub fn begin_submit(&mut self, kind: ActionKind) -> Option<SessionId> {
        let dialog = self.dialog_mut(kind);
        let DialogState::AwaitingConfirmation(id) = &*dialog else {
            return None;
        };
        let id = id.clone();
        *dialog = DialogState::Submitting(id.clone());
        Some(id)
    }

    /// Settle a submission: close on success, fall back to awaiting
    /// confirmation (pending id intact) otherwise.
    pub fn finish_submit(
        &mut self,
        kind: ActionKind,
        id: &SessionId,
        succeeded: bool,
    ) -> &DialogState {
        let dialog = self.dialog_mut(kind);
        if matches!(&*dialog, DialogState::Submitting(current) if current == id) {
            *dialog = if succeeded {
                DialogState::Closed
            } else {
                DialogState::AwaitingConfirmation(id.clone())
            };
        }
        dialog
    }
}
