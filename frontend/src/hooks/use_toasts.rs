//! Hook holding the page's transient notifications.

use shared::{Notifier, Toast};
use std::rc::Rc;
use yew::prelude::*;

/// Queue of visible toasts, each tagged with a dismissal id
#[derive(Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u32,
    items: Vec<(u32, Toast)>,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(toast) => {
                next.items.push((next.next_id, toast));
                next.next_id = next.next_id.wrapping_add(1);
            }
            ToastAction::Dismiss(id) => next.items.retain(|(item_id, _)| *item_id != id),
        }
        Rc::new(next)
    }
}

/// [`Notifier`] that feeds the page's toast queue
#[derive(Clone, PartialEq)]
pub struct ToastSink(UseReducerDispatcher<ToastQueue>);

impl Notifier for ToastSink {
    fn notify(&self, toast: Toast) {
        self.0.dispatch(ToastAction::Push(toast));
    }
}

/// Return value from the use_toasts hook.
pub struct UseToasts {
    /// Toasts currently on screen, oldest first
    pub toasts: Vec<(u32, Toast)>,
    /// Sink to hand to anything that reports feedback
    pub sink: ToastSink,
    /// Remove a toast by id
    pub dismiss: Callback<u32>,
}

#[hook]
pub fn use_toasts() -> UseToasts {
    let queue = use_reducer(ToastQueue::default);

    let dismiss = {
        let dispatcher = queue.dispatcher();
        Callback::from(move |id: u32| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    UseToasts {
        toasts: queue.items.clone(),
        sink: ToastSink(queue.dispatcher()),
        dismiss,
    }
}
