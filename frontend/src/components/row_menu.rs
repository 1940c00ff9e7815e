//! Per-row actions menu.

use shared::ActionKind;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RowMenuProps {
    pub actions: Vec<ActionKind>,
    pub on_select: Callback<ActionKind>,
}

#[function_component(RowMenu)]
pub fn row_menu(props: &RowMenuProps) -> Html {
    let open = use_state(|| false);

    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };

    html! {
        <div class="row-menu">
            <button class="row-menu-trigger" onclick={toggle} title="Actions">
                { "⋮" }
            </button>
            if *open {
                <div class="row-menu-content">
                    <div class="row-menu-label">{ "Actions" }</div>
                    <hr class="row-menu-separator" />
                    { for props.actions.iter().map(|&action| {
                        let open = open.clone();
                        let on_select = props.on_select.clone();
                        let onclick = Callback::from(move |_: MouseEvent| {
                            open.set(false);
                            on_select.emit(action);
                        });
                        html! {
                            <button key={action.label()} class="row-menu-item" {onclick}>
                                { action.label() }
                            </button>
                        }
                    }) }
                </div>
            }
        </div>
    }
}
