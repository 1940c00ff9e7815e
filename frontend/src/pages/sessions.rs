use crate::components::{ConfirmDialog, RowMenu, Toaster};
use crate::hooks::{use_sessions, use_toasts};
use shared::{ActionKind, SessionId, SessionRow, SessionsView, ViewConfig};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SessionsPageProps {
    /// Offer "Disconnect" on active sessions
    #[prop_or(true)]
    pub supports_disconnect: bool,
}

/// Session row component
#[derive(Properties, PartialEq)]
struct SessionTableRowProps {
    row: SessionRow,
    on_select: Callback<(ActionKind, SessionId)>,
}

#[function_component(SessionTableRow)]
fn session_table_row(props: &SessionTableRowProps) -> Html {
    let row = &props.row;

    let on_action = {
        let id = row.id.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |action: ActionKind| on_select.emit((action, id.clone())))
    };

    let status_class = if row.active {
        "session-status active"
    } else {
        "session-status inactive"
    };

    html! {
        <tr class="session-row">
            <td class="session-client">
                <img class="session-browser-icon" src={format!("./{}.svg", row.browser)} alt="" />
                <div class="session-client-text">
                    <span class="session-browser">{ &row.browser }</span>
                    <span class="session-platform">{ &row.platform }</span>
                </div>
            </td>
            <td class={status_class}>
                <span class="status-dot"></span>
                <span>{ row.status }</span>
            </td>
            <td class="session-last-connected">{ &row.last_connected }</td>
            <td class="session-created">{ &row.created }</td>
            <td class="session-actions">
                <RowMenu actions={row.actions.clone()} on_select={on_action} />
            </td>
        </tr>
    }
}

/// "browser on os, arch" for the session a dialog targets
fn dialog_detail(view: &SessionsView, kind: ActionKind) -> Option<AttrValue> {
    let session = view.session(view.pending(kind)?)?;
    Some(format!("{} on {}", session.browser, session.platform()).into())
}

#[function_component(SessionsPage)]
pub fn sessions_page(props: &SessionsPageProps) -> Html {
    let toasts = use_toasts();
    let sessions = use_sessions(
        ViewConfig {
            supports_disconnect: props.supports_disconnect,
        },
        toasts.sink.clone(),
    );
    let view = &sessions.view;
    let rows = view.rows();

    let on_refresh = {
        let refresh = sessions.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    let dialogs = [ActionKind::Delete, ActionKind::Disconnect]
        .into_iter()
        .filter(|&kind| view.is_dialog_open(kind))
        .map(|kind| {
            let cancel = sessions.cancel.clone();
            let confirm = sessions.confirm.clone();
            html! {
                <ConfirmDialog
                    key={kind.label()}
                    title={kind.dialog_title()}
                    description={kind.dialog_description()}
                    detail={dialog_detail(view, kind)}
                    submitting={view.dialog(kind).is_submitting()}
                    on_cancel={Callback::from(move |_: ()| cancel.emit(kind))}
                    on_confirm={Callback::from(move |_: ()| confirm.emit(kind))}
                />
            }
        });

    html! {
        <div class="sessions-container">
            <header class="sessions-header">
                <h1>{ "Sessions" }</h1>
                <button class="header-button" onclick={on_refresh}>
                    { "Refresh" }
                </button>
            </header>

            <main class="sessions-content">
                if !view.is_loaded() {
                    <div class="loading">
                        <div class="spinner"></div>
                        <p>{ "Loading sessions..." }</p>
                    </div>
                } else if rows.is_empty() {
                    <div class="empty-state">
                        <p>{ "No sessions found." }</p>
                    </div>
                } else {
                    <div class="table-container">
                        <table class="sessions-table">
                            <thead>
                                <tr>
                                    <th>{ "Session" }</th>
                                    <th>{ "Status" }</th>
                                    <th>{ "Last connected" }</th>
                                    <th>{ "Created" }</th>
                                    <th class="actions-header">{ "Actions" }</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for rows.into_iter().map(|row| {
                                    let key = row.id.to_string();
                                    html! {
                                        <SessionTableRow
                                            key={key}
                                            row={row}
                                            on_select={sessions.select.clone()}
                                        />
                                    }
                                }) }
                            </tbody>
                        </table>
                    </div>
                }
            </main>

            { for dialogs }

            <Toaster toasts={toasts.toasts.clone()} on_dismiss={toasts.dismiss.clone()} />
        </div>
    }
}
