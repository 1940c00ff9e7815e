//! Confirmation Dialog Component
//!
//! Modal asking the user to confirm a destructive action.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub title: AttrValue,
    pub description: AttrValue,
    /// Extra line identifying the target, if known
    #[prop_or_default]
    pub detail: Option<AttrValue>,
    /// The confirmed request is in flight
    #[prop_or_default]
    pub submitting: bool,
    pub on_cancel: Callback<()>,
    pub on_confirm: Callback<()>,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };

    html! {
        <div class="modal-overlay">
            <div
                class="confirm-modal"
                role="alertdialog"
                aria-modal="true"
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
            >
                <h2 class="confirm-title">{ props.title.to_string() }</h2>
                <p class="confirm-description">{ props.description.to_string() }</p>
                if let Some(detail) = &props.detail {
                    <p class="confirm-detail">{ detail.to_string() }</p>
                }
                <div class="confirm-actions">
                    <button class="cancel-button" onclick={on_cancel} disabled={props.submitting}>
                        { "Cancel" }
                    </button>
                    <button class="confirm-button" onclick={on_confirm} disabled={props.submitting}>
                        { if props.submitting { "Working..." } else { "Continue" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
