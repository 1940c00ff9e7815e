//! Hook wiring the sessions controller into a component.

use shared::{ActionKind, SessionId, SessionsController, SessionsView, ViewConfig};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::ToastSink;
use crate::client::WebApiClient;

type Controller = SessionsController<WebApiClient, ToastSink>;

/// Return value from the use_sessions hook.
pub struct UseSessions {
    /// Snapshot of the view state for this render
    pub view: SessionsView,
    /// Open the confirmation dialog for an action on a session
    pub select: Callback<(ActionKind, SessionId)>,
    /// Close a dialog without doing anything
    pub cancel: Callback<ActionKind>,
    /// Run the pending action of a dialog
    pub confirm: Callback<ActionKind>,
    /// Manually re-issue the list query
    pub refresh: Callback<()>,
}

/// Hook for the sessions list and its confirmation dialogs.
///
/// Builds one controller per mount, and a fresh one whenever `config`
/// changes, fetching the list each time. Every controller state change
/// re-renders the component. Feedback goes to `sink`.
///
/// # Example
/// ```ignore
/// let toasts = use_toasts();
/// let sessions = use_sessions(ViewConfig::default(), toasts.sink.clone());
/// for row in sessions.view.rows() {
///     // Render row
/// }
/// ```
#[hook]
pub fn use_sessions(config: ViewConfig, sink: ToastSink) -> UseSessions {
    let update = use_force_update();
    let controller: Rc<Controller> = use_memo(config, move |config| {
        let controller = SessionsController::new(WebApiClient::new(), sink, *config);
        controller.subscribe(move || update.force_update());
        controller
    });

    // Initial fetch
    {
        let controller = controller.clone();
        use_effect_with(config, move |_| {
            spawn_local(async move {
                controller.mount().await;
            });
            || ()
        });
    }

    let select = {
        let controller = controller.clone();
        Callback::from(move |(kind, id): (ActionKind, SessionId)| {
            controller.select(kind, id);
        })
    };

    let cancel = {
        let controller = controller.clone();
        Callback::from(move |kind: ActionKind| {
            controller.cancel(kind);
        })
    };

    let confirm = {
        let controller = controller.clone();
        Callback::from(move |kind: ActionKind| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.confirm(kind).await;
            });
        })
    };

    let refresh = {
        let controller = controller.clone();
        Callback::from(move |_| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.refresh().await;
            });
        })
    };

    UseSessions {
        view: controller.snapshot(),
        select,
        cancel,
        confirm,
        refresh,
    }
}
