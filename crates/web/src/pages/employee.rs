use std::rc::Rc;
use std::time::Duration;

use leptos::*;
use leptos_router::{use_navigate, A};
use wasm_bindgen_futures::JsFuture;

use ems_client::screens::{EmployeeDashboard, SubmitExpenseForm};
use ems_client::Route as Page;
use ems_core::{format_display_date, Notification, Receipt, StatusFilter};

use super::{empty_list, expense_details, filter_bar, mount, placeholder, spawn_with, status_line};
use crate::context::use_app;

/// Delay before leaving the form after a successful submission.
const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

#[component]
pub fn EmployeeDashboardPage() -> impl IntoView {
    let app = use_app();
    let config = app.config.clone();
    let (dash, changed) = mount(EmployeeDashboard::new(app.api.clone()), EmployeeDashboard::lifecycle);
    spawn_with(dash, |dash| async move { dash.load().await });

    let bell = move || {
        changed.track();
        let unread = dash.with_value(|d| d.unread_count());
        let open = dash.with_value(|d| d.notifications_open());
        let list = open.then(|| {
            let notifications = dash.with_value(|d| d.notifications().data());
            notification_list(notifications)
        });

        view! {
            <div class="bell">
                <button on:click=move |_| dash.with_value(|d| d.toggle_notifications())>"🔔"</button>
                {(unread > 0).then(|| view! { <span class="badge unread">{unread}</span> })}
                {list}
            </div>
        }
    };

    let pick: Rc<dyn Fn(StatusFilter)> = Rc::new(move |f| dash.with_value(|d| d.set_filter(f)));

    let body = move || {
        changed.track();
        let state = dash.with_value(|d| d.expenses().snapshot());
        if let Some(placeholder) = placeholder(&state) {
            return placeholder;
        }
        let filter = dash.with_value(|d| d.filter());
        let visible = dash.with_value(|d| d.visible_expenses());

        let cards = if visible.is_empty() {
            empty_list(filter)
        } else {
            visible
                .into_iter()
                .map(|expense| {
                    let receipt = expense.receipt().map(|r| config.receipt_url(r));
                    view! { <div class="card expense">{expense_details(&expense, receipt)}</div> }
                })
                .collect_view()
        };

        view! {
            {filter_bar(filter, pick.clone())}
            {cards}
        }
        .into_view()
    };

    view! {
        <section class="dashboard employee">
            <div class="toolbar">
                <h2>"Employee Dashboard"</h2>
                <A href=Page::SubmitExpense.path()>"➕ Submit Expense"</A>
                {bell}
            </div>
            {body}
        </section>
    }
}

/// `notifications` is `None` while the feed is loading or after it failed.
fn notification_list(notifications: Option<Vec<Notification>>) -> View {
    let Some(notifications) = notifications else {
        return view! { <div class="dropdown"><p class="empty">"Notifications unavailable"</p></div> }
            .into_view();
    };
    if notifications.is_empty() {
        return view! { <div class="dropdown"><p class="empty">"No notifications"</p></div> }.into_view();
    }

    view! {
        <div class="dropdown">
            {notifications
                .into_iter()
                .map(|n| {
                    let class = if n.read { "notification" } else { "notification unread" };
                    let when = n.created_at.as_deref().map(format_display_date).unwrap_or_default();
                    view! {
                        <div class=class>
                            <p>{n.message}</p>
                            <span class="when">{when}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_view()
}

#[component]
pub fn SubmitExpensePage() -> impl IntoView {
    let app = use_app();
    let navigate = use_navigate();
    let (form, changed) = mount(SubmitExpenseForm::new(app.api.clone()), SubmitExpenseForm::lifecycle);
    let file_input = create_node_ref::<html::Input>();
    let file_error = create_rw_signal(None::<String>);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let navigate = navigate.clone();
        let input = file_input.get_untracked();
        spawn_with(form, move |form| async move {
            match read_receipt(input).await {
                Ok(receipt) => {
                    file_error.set(None);
                    form.attach(receipt);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "could not read the receipt file");
                    file_error.set(Some("Could not read the selected file.".to_string()));
                    return;
                }
            }
            if form.submit().await {
                let lifecycle = form.lifecycle();
                set_timeout(
                    move || {
                        if lifecycle.is_mounted() {
                            navigate(Page::EmployeeDashboard.path(), Default::default());
                        }
                    },
                    REDIRECT_DELAY,
                );
            }
        });
    };

    let busy = move || {
        changed.track();
        form.with_value(|f| f.state().is_submitting())
    };

    view! {
        <section class="card form">
            <h2>"Submit Expense"</h2>
            <form on:submit=submit>
                <input
                    type="number"
                    step="0.01"
                    placeholder="Amount"
                    required=true
                    on:input=move |ev| form.with_value(|f| f.edit(|d| d.amount = event_target_value(&ev)))
                />
                <input
                    placeholder="Category"
                    required=true
                    on:input=move |ev| form.with_value(|f| f.edit(|d| d.category = event_target_value(&ev)))
                />
                <textarea
                    placeholder="Notes (optional)"
                    on:input=move |ev| form.with_value(|f| f.edit(|d| d.notes = event_target_value(&ev)))
                ></textarea>
                <input
                    type="date"
                    required=true
                    on:input=move |ev| form.with_value(|f| f.edit(|d| d.date = event_target_value(&ev)))
                />
                <input type="file" accept="image/*,application/pdf" node_ref=file_input/>
                <button type="submit" disabled=busy>
                    {move || if busy() { "Submitting..." } else { "Submit" }}
                </button>
            </form>
            {move || file_error.get().map(|msg| view! { <p class="status error">{msg}</p> })}
            {move || {
                changed.track();
                form.with_value(|f| status_line(f.state().message()))
            }}
        </section>
    }
}

/// Read the chosen file, if any, into memory.
async fn read_receipt(input: Option<HtmlElement<html::Input>>) -> Result<Option<Receipt>, String> {
    let Some(file) = input.and_then(|el| el.files()).and_then(|files| files.get(0)) else {
        return Ok(None);
    };

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let content_type = Some(file.type_()).filter(|t| !t.is_empty());

    Ok(Some(Receipt {
        file_name: file.name(),
        content_type,
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    }))
}
