//! Toast stack rendered in a corner of the page.

use gloo::timers::callback::Timeout;
use shared::Toast;
use yew::prelude::*;

/// How long a toast stays up unless dismissed
const TOAST_DURATION_MS: u32 = 5_000;

#[derive(Properties, PartialEq)]
pub struct ToasterProps {
    pub toasts: Vec<(u32, Toast)>,
    pub on_dismiss: Callback<u32>,
}

#[function_component(Toaster)]
pub fn toaster(props: &ToasterProps) -> Html {
    html! {
        <div class="toaster" aria-live="polite">
            { for props.toasts.iter().map(|(id, toast)| html! {
                <ToastItem
                    key={*id}
                    id={*id}
                    toast={toast.clone()}
                    on_dismiss={props.on_dismiss.clone()}
                />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    id: u32,
    toast: Toast,
    on_dismiss: Callback<u32>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    // Auto-dismiss; dropping the timeout on unmount cancels it
    {
        let id = props.id;
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(id, move |_| {
            let handle = Timeout::new(TOAST_DURATION_MS, move || on_dismiss.emit(id));
            move || drop(handle)
        });
    }

    let on_close = {
        let id = props.id;
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div class="toast" role="status">
            <div class="toast-body">
                <div class="toast-title">{ &props.toast.title }</div>
                <div class="toast-description">{ &props.toast.description }</div>
            </div>
            <button class="toast-close" onclick={on_close} title="Dismiss">{ "×" }</button>
        </div>
    }
}
