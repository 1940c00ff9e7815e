//! Async driver for [`SessionsView`].
//!
//! The controller is meant for a single cooperative thread (the browser
//! event loop, or a current-thread runtime). The view lives in a `RefCell`
//! and is never borrowed across an await, so any number of operations may
//! be in flight at once; the three API calls are the only suspension points.

use std::cell::RefCell;

use crate::api::{ApiError, SessionsApi};
use crate::notify::{Notifier, Toast};
use crate::view::{ActionKind, SessionsView, ViewConfig};
use crate::SessionId;

/// How a confirmed mutation ended
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Succeeded,
    /// The server answered but nothing happened (zero rows, `false`)
    Rejected,
    Failed(ApiError),
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Succeeded)
    }
}

pub struct SessionsController<A, N> {
    api: A,
    notifier: N,
    view: RefCell<SessionsView>,
    observers: RefCell<Vec<Box<dyn Fn()>>>,
}

impl<A: SessionsApi, N: Notifier> SessionsController<A, N> {
    pub fn new(api: A, notifier: N, config: ViewConfig) -> Self {
        Self {
            api,
            notifier,
            view: RefCell::new(SessionsView::new(config)),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback run after every state change (typically a re-render)
    pub fn subscribe(&self, observer: impl Fn() + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    fn changed(&self) {
        for observer in self.observers.borrow().iter() {
            observer();
        }
    }

    pub fn snapshot(&self) -> SessionsView {
        self.view.borrow().clone()
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&SessionsView) -> R) -> R {
        f(&self.view.borrow())
    }

    /// Initial fetch when the view appears
    pub async fn mount(&self) -> bool {
        self.refresh().await
    }

    /// Re-issue the list query.
    ///
    /// A failed query keeps the previous list on screen. Returns whether the
    /// response was applied.
    pub async fn refresh(&self) -> bool {
        let ticket = self.view.borrow_mut().begin_list();
        match self.api.list_sessions().await {
            Ok(sessions) => {
                let count = sessions.len();
                let applied = self.view.borrow_mut().apply_list(ticket, sessions);
                if applied {
                    log::debug!("Loaded {} session(s)", count);
                    self.changed();
                } else {
                    log::debug!("Discarding out-of-date session list {:?}", ticket);
                }
                applied
            }
            Err(e) => {
                log::warn!("Failed to fetch sessions: {}", e);
                false
            }
        }
    }

    pub fn select_for_delete(&self, id: SessionId) -> bool {
        self.select(ActionKind::Delete, id)
    }

    /// The caller only offers this on active sessions; it is not re-checked here.
    pub fn select_for_disconnect(&self, id: SessionId) -> bool {
        self.select(ActionKind::Disconnect, id)
    }

    pub fn cancel_delete(&self) -> bool {
        self.cancel(ActionKind::Delete)
    }

    pub fn cancel_disconnect(&self) -> bool {
        self.cancel(ActionKind::Disconnect)
    }

    /// Delete the pending session. `None` when nothing was pending.
    pub async fn confirm_delete(&self) -> Option<MutationOutcome> {
        self.confirm(ActionKind::Delete).await
    }

    /// Log out the pending session. `None` when nothing was pending.
    pub async fn confirm_disconnect(&self) -> Option<MutationOutcome> {
        self.confirm(ActionKind::Disconnect).await
    }

    pub fn select(&self, kind: ActionKind, id: SessionId) -> bool {
        let selected = self.view.borrow_mut().select(kind, id);
        if selected {
            self.changed();
        }
        selected
    }

    pub fn cancel(&self, kind: ActionKind) -> bool {
        let cancelled = self.view.borrow_mut().cancel(kind);
        if cancelled {
            self.changed();
        }
        cancelled
    }

    pub async fn confirm(&self, kind: ActionKind) -> Option<MutationOutcome> {
        let id = self.view.borrow_mut().begin_submit(kind)?;
        self.changed();

        let outcome = match kind {
            ActionKind::Delete => match self.api.delete_session(&id).await {
                Ok(removed) if removed > 0 => MutationOutcome::Succeeded,
                Ok(_) => MutationOutcome::Rejected,
                Err(e) => MutationOutcome::Failed(e),
            },
            ActionKind::Disconnect => match self.api.logout_session(&id).await {
                Ok(true) => MutationOutcome::Succeeded,
                Ok(false) => MutationOutcome::Rejected,
                Err(e) => MutationOutcome::Failed(e),
            },
        };

        self.view
            .borrow_mut()
            .finish_submit(kind, &id, outcome.is_success());
        self.changed();

        match &outcome {
            MutationOutcome::Succeeded => {
                log::info!("{} succeeded for session {}", kind.label(), id);
                self.notifier.notify(kind.success_toast());
                self.refresh().await;
            }
            MutationOutcome::Rejected => {
                log::warn!("{} rejected for session {}", kind.label(), id);
                self.notifier.notify(kind.failure_toast());
            }
            MutationOutcome::Failed(e) => {
                log::error!("{} failed for session {}: {}", kind.label(), id, e);
                self.notifier.notify(Toast::request_failed(e));
            }
        }

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::session;
    use crate::view::DialogState;
    use crate::Session;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use tokio::sync::oneshot;

    type ListResult = Result<Vec<Session>, ApiError>;

    enum ListReply {
        Ready(ListResult),
        Gate(oneshot::Receiver<ListResult>),
    }

    #[derive(Default)]
    struct FakeApi {
        lists: RefCell<VecDeque<ListReply>>,
        deletes: RefCell<VecDeque<Result<u64, ApiError>>>,
        logouts: RefCell<VecDeque<Result<bool, ApiError>>>,
        list_calls: Cell<usize>,
        delete_calls: RefCell<Vec<SessionId>>,
        logout_calls: RefCell<Vec<SessionId>>,
    }

    impl FakeApi {
        fn list(self, sessions: Vec<Session>) -> Self {
            self.lists
                .borrow_mut()
                .push_back(ListReply::Ready(Ok(sessions)));
            self
        }

        fn list_error(self, error: ApiError) -> Self {
            self.lists.borrow_mut().push_back(ListReply::Ready(Err(error)));
            self
        }

        fn list_gate(&self) -> oneshot::Sender<ListResult> {
            let (tx, rx) = oneshot::channel();
            self.lists.borrow_mut().push_back(ListReply::Gate(rx));
            tx
        }

        fn delete(self, result: Result<u64, ApiError>) -> Self {
            self.deletes.borrow_mut().push_back(result);
            self
        }

        fn logout(self, result: Result<bool, ApiError>) -> Self {
            self.logouts.borrow_mut().push_back(result);
            self
        }
    }

    impl SessionsApi for FakeApi {
        async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
            self.list_calls.set(self.list_calls.get() + 1);
            let reply = self
                .lists
                .borrow_mut()
                .pop_front()
                .expect("unexpected list query");
            match reply {
                ListReply::Ready(result) => result,
                ListReply::Gate(rx) => rx.await.expect("gate dropped"),
            }
        }

        async fn delete_session(&self, id: &SessionId) -> Result<u64, ApiError> {
            self.delete_calls.borrow_mut().push(id.clone());
            self.deletes
                .borrow_mut()
                .pop_front()
                .expect("unexpected delete")
        }

        async fn logout_session(&self, id: &SessionId) -> Result<bool, ApiError> {
            self.logout_calls.borrow_mut().push(id.clone());
            self.logouts
                .borrow_mut()
                .pop_front()
                .expect("unexpected logout")
        }
    }

    type Toasts = Rc<RefCell<Vec<Toast>>>;
    type TestController = SessionsController<Rc<FakeApi>, Box<dyn Fn(Toast)>>;

    fn controller(api: FakeApi) -> (TestController, Rc<FakeApi>, Toasts) {
        controller_with(api, ViewConfig::default())
    }

    fn controller_with(api: FakeApi, config: ViewConfig) -> (TestController, Rc<FakeApi>, Toasts) {
        let api = Rc::new(api);
        let toasts: Toasts = Rc::default();
        let sink = {
            let toasts = toasts.clone();
            Box::new(move |toast: Toast| toasts.borrow_mut().push(toast)) as Box<dyn Fn(Toast)>
        };
        let controller = SessionsController::new(api.clone(), sink, config);
        (controller, api, toasts)
    }

    fn ids(controller: &TestController) -> Vec<String> {
        controller.with_view(|view| {
            view.sessions()
                .unwrap_or_default()
                .iter()
                .map(|s| s.id.to_string())
                .collect()
        })
    }

    async fn wait_for_list_calls(api: &FakeApi, n: usize) {
        while api.list_calls.get() < n {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn mount_issues_one_list_query() {
        let (c, api, toasts) = controller(FakeApi::default().list(vec![
            session("b", false),
            session("a", true),
        ]));
        assert!(!c.snapshot().is_loaded());

        assert!(c.mount().await);
        assert_eq!(api.list_calls.get(), 1);
        assert_eq!(ids(&c), ["b", "a"]);
        assert!(toasts.borrow().is_empty());
    }

    #[tokio::test]
    async fn failed_list_keeps_previous_sessions() {
        let (c, api, toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true)])
                .list_error(ApiError::Network("offline".into())),
        );
        c.mount().await;

        assert!(!c.refresh().await);
        assert_eq!(api.list_calls.get(), 2);
        assert_eq!(ids(&c), ["a"]);
        assert!(toasts.borrow().is_empty());
    }

    #[tokio::test]
    async fn failed_first_list_stays_unloaded() {
        let (c, _api, _toasts) =
            controller(FakeApi::default().list_error(ApiError::Network("offline".into())));
        assert!(!c.mount().await);
        assert!(!c.snapshot().is_loaded());
    }

    #[tokio::test]
    async fn select_then_cancel_issues_nothing() {
        let (c, api, toasts) = controller(FakeApi::default().list(vec![session("a", true)]));
        c.mount().await;
        let before = c.snapshot();

        assert!(c.select_for_delete("a".into()));
        assert!(c.cancel_delete());

        let after = c.snapshot();
        assert_eq!(after.sessions(), before.sessions());
        assert_eq!(after.pending(ActionKind::Delete), None);
        assert!(api.delete_calls.borrow().is_empty());
        assert_eq!(api.list_calls.get(), 1);
        assert!(toasts.borrow().is_empty());
    }

    #[tokio::test]
    async fn successful_delete_closes_and_refetches_once() {
        let (c, api, toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true), session("b", false)])
                .delete(Ok(1))
                .list(vec![session("b", false)]),
        );
        c.mount().await;
        c.select_for_delete("a".into());

        assert_eq!(c.confirm_delete().await, Some(MutationOutcome::Succeeded));

        let view = c.snapshot();
        assert_eq!(view.dialog(ActionKind::Delete), &DialogState::Closed);
        assert_eq!(*api.delete_calls.borrow(), [SessionId::from("a")]);
        assert_eq!(api.list_calls.get(), 2);
        assert_eq!(ids(&c), ["b"]);
        assert_eq!(*toasts.borrow(), [Toast::deleted()]);
    }

    #[tokio::test]
    async fn zero_count_delete_keeps_dialog_open() {
        let (c, api, toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true)])
                .delete(Ok(0)),
        );
        c.mount().await;
        c.select_for_delete("a".into());

        assert_eq!(c.confirm_delete().await, Some(MutationOutcome::Rejected));

        let view = c.snapshot();
        assert_eq!(
            view.dialog(ActionKind::Delete),
            &DialogState::AwaitingConfirmation("a".into())
        );
        assert_eq!(view.pending(ActionKind::Delete), Some(&SessionId::from("a")));
        assert_eq!(api.list_calls.get(), 1);
        assert_eq!(*toasts.borrow(), [Toast::delete_failed()]);
    }

    #[tokio::test]
    async fn retry_after_soft_failure_needs_no_reselect() {
        let (c, api, toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true)])
                .delete(Ok(0))
                .delete(Ok(1))
                .list(vec![]),
        );
        c.mount().await;
        c.select_for_delete("a".into());
        c.confirm_delete().await;

        assert_eq!(c.confirm_delete().await, Some(MutationOutcome::Succeeded));
        assert_eq!(api.delete_calls.borrow().len(), 2);
        assert_eq!(ids(&c), Vec::<String>::new());
        assert_eq!(
            *toasts.borrow(),
            [Toast::delete_failed(), Toast::deleted()]
        );
    }

    #[tokio::test]
    async fn delete_transport_failure_differs_from_zero_count() {
        let (c, api, toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true)])
                .delete(Err(ApiError::Server {
                    status: 500,
                    message: "boom".into(),
                })),
        );
        c.mount().await;
        c.select_for_delete("a".into());

        let outcome = c.confirm_delete().await.unwrap();
        assert!(matches!(outcome, MutationOutcome::Failed(ApiError::Server { status: 500, .. })));
        assert_eq!(c.snapshot().pending(ActionKind::Delete), Some(&SessionId::from("a")));
        assert_eq!(api.list_calls.get(), 1);
        assert_eq!(*toasts.borrow(), [Toast::request_failed(&ApiError::Server {
            status: 500,
            message: "boom".into(),
        })]);
        assert_ne!(toasts.borrow()[0], Toast::unreachable());
    }

    #[tokio::test]
    async fn controller_built_without_disconnect_hides_and_ignores_it() {
        let (c, api, toasts) = controller_with(
            FakeApi::default().list(vec![session("a", true)]),
            ViewConfig {
                supports_disconnect: false,
            },
        );
        c.mount().await;

        let rows = c.with_view(|view| view.rows());
        assert_eq!(rows[0].actions, [ActionKind::Delete]);
        assert!(!c.select_for_disconnect("a".into()));
        assert_eq!(c.confirm_disconnect().await, None);
        assert!(api.logout_calls.borrow().is_empty());
        assert!(toasts.borrow().is_empty());
    }

    #[tokio::test]
    async fn disconnect_network_failure_reports_unreachable() {
        let (c, api, toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true)])
                .logout(Err(ApiError::Network("connection refused".into()))),
        );
        c.mount().await;
        c.select_for_disconnect("a".into());

        let outcome = c.confirm_disconnect().await.unwrap();
        assert!(matches!(outcome, MutationOutcome::Failed(ApiError::Network(_))));
        assert_eq!(api.logout_calls.borrow().len(), 1);
        assert_eq!(*toasts.borrow(), [Toast::unreachable()]);
    }

    #[tokio::test]
    async fn confirming_twice_is_a_no_op() {
        let (c, api, toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true)])
                .delete(Ok(1))
                .list(vec![]),
        );
        c.mount().await;
        c.select_for_delete("a".into());

        assert!(c.confirm_delete().await.is_some());
        assert_eq!(c.confirm_delete().await, None);
        assert_eq!(api.delete_calls.borrow().len(), 1);
        assert_eq!(api.list_calls.get(), 2);
        assert_eq!(toasts.borrow().len(), 1);
    }

    #[tokio::test]
    async fn confirm_without_selection_issues_nothing() {
        let (c, api, _toasts) = controller(FakeApi::default().list(vec![session("a", true)]));
        c.mount().await;

        assert_eq!(c.confirm_disconnect().await, None);
        assert!(api.logout_calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn disconnect_uses_boolean_result() {
        let (c, api, toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true)])
                .logout(Ok(false))
                .logout(Ok(true))
                .list(vec![session("a", false)]),
        );
        c.mount().await;
        c.select_for_disconnect("a".into());

        assert_eq!(c.confirm_disconnect().await, Some(MutationOutcome::Rejected));
        assert!(c.snapshot().is_dialog_open(ActionKind::Disconnect));
        assert_eq!(api.list_calls.get(), 1);

        assert_eq!(c.confirm_disconnect().await, Some(MutationOutcome::Succeeded));
        assert!(!c.snapshot().is_dialog_open(ActionKind::Disconnect));
        assert_eq!(api.list_calls.get(), 2);
        assert!(!c.snapshot().sessions().unwrap()[0].active);
        assert_eq!(
            *toasts.borrow(),
            [Toast::disconnect_failed(), Toast::disconnected()]
        );
    }

    #[tokio::test]
    async fn stale_target_is_still_sent() {
        let (c, api, toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true)])
                .delete(Ok(0)),
        );
        c.mount().await;
        c.select_for_delete("gone".into());

        assert_eq!(c.confirm_delete().await, Some(MutationOutcome::Rejected));
        assert_eq!(*api.delete_calls.borrow(), [SessionId::from("gone")]);
        assert_eq!(*toasts.borrow(), [Toast::delete_failed()]);
    }

    #[tokio::test]
    async fn observers_see_each_transition() {
        let (c, _api, _toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true)])
                .delete(Ok(1))
                .list(vec![]),
        );
        let renders = Rc::new(Cell::new(0));
        {
            let renders = renders.clone();
            c.subscribe(move || renders.set(renders.get() + 1));
        }

        c.mount().await;
        assert_eq!(renders.get(), 1);
        c.select_for_delete("a".into());
        assert_eq!(renders.get(), 2);
        c.confirm_delete().await;
        // submitting, settled, refreshed
        assert_eq!(renders.get(), 5);
    }

    #[tokio::test]
    async fn late_mount_response_does_not_clobber_post_mutation_list() {
        let api = FakeApi::default();
        let mount_gate = api.list_gate();
        let api = api.delete(Ok(1));
        let refetch_gate = api.list_gate();
        let (c, api, _toasts) = controller(api);
        let c = Rc::new(c);

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let mounting = tokio::task::spawn_local({
                    let c = c.clone();
                    async move { c.mount().await }
                });
                wait_for_list_calls(&api, 1).await;

                c.select_for_delete("a".into());
                let deleting = tokio::task::spawn_local({
                    let c = c.clone();
                    async move { c.confirm_delete().await }
                });
                wait_for_list_calls(&api, 2).await;

                refetch_gate.send(Ok(vec![session("b", true)])).unwrap();
                assert_eq!(deleting.await.unwrap(), Some(MutationOutcome::Succeeded));
                assert_eq!(ids(&c), ["b"]);

                mount_gate
                    .send(Ok(vec![session("a", true), session("b", true)]))
                    .unwrap();
                assert!(!mounting.await.unwrap());
                assert_eq!(ids(&c), ["b"]);
            })
            .await;
    }

    #[tokio::test]
    async fn delete_and_disconnect_can_be_in_flight_together() {
        let (c, api, toasts) = controller(
            FakeApi::default()
                .list(vec![session("a", true), session("b", true)])
                .delete(Ok(1))
                .logout(Ok(true))
                .list(vec![session("b", true)])
                .list(vec![session("b", false)]),
        );
        c.mount().await;
        c.select_for_delete("a".into());
        c.select_for_disconnect("b".into());

        let (deleted, disconnected) = tokio::join!(c.confirm_delete(), c.confirm_disconnect());
        assert_eq!(deleted, Some(MutationOutcome::Succeeded));
        assert_eq!(disconnected, Some(MutationOutcome::Succeeded));
        assert_eq!(api.list_calls.get(), 3);
        assert!(!c.snapshot().is_dialog_open(ActionKind::Delete));
        assert!(!c.snapshot().is_dialog_open(ActionKind::Disconnect));
        assert_eq!(toasts.borrow().len(), 2);
    }
}
