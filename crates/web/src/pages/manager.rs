use std::rc::Rc;

use leptos::*;

use ems_client::screens::ManagerDashboard;
use ems_core::{Expense, ExpenseId, StatusFilter};

use super::{empty_list, expense_details, filter_bar, mount, placeholder, spawn_with, status_line};
use crate::context::use_app;

#[component]
pub fn ManagerDashboardPage() -> impl IntoView {
    let app = use_app();
    let config = app.config.clone();
    let (dash, changed) = mount(ManagerDashboard::new(app.api.clone()), ManagerDashboard::lifecycle);
    spawn_with(dash, |dash| async move { dash.load().await });

    let decide = move |id: ExpenseId, approve: bool| {
        spawn_with(dash, move |dash| async move {
            if approve {
                dash.approve(&id).await;
            } else {
                dash.reject(&id).await;
            }
        });
    };

    let card = move |expense: Expense, busy: bool| {
        let receipt = expense.receipt().map(|r| config.receipt_url(r));
        let employee = expense.employee_display_name().unwrap_or("Unknown").to_string();
        let actions = expense.is_actionable().then(|| {
            let approve_id = expense.id.clone();
            let reject_id = expense.id.clone();
            view! {
                <div class="actions">
                    <button class="approve" disabled=busy on:click=move |_| decide(approve_id.clone(), true)>
                        "Approve"
                    </button>
                    <button class="reject" disabled=busy on:click=move |_| decide(reject_id.clone(), false)>
                        "Reject"
                    </button>
                </div>
            }
        });

        view! {
            <div class="card expense">
                <p><strong>"Employee: "</strong>{employee}</p>
                {expense_details(&expense, receipt)}
                {actions}
            </div>
        }
    };

    let pick: Rc<dyn Fn(StatusFilter)> = Rc::new(move |f| dash.with_value(|d| d.set_filter(f)));

    let body = move || {
        changed.track();
        let state = dash.with_value(|d| d.screen().snapshot());
        if let Some(placeholder) = placeholder(&state) {
            return placeholder;
        }
        let busy = state.is_submitting();
        let filter = dash.with_value(|d| d.filter());
        let visible = dash.with_value(|d| d.visible_expenses());

        view! {
            {filter_bar(filter, pick.clone())}
            {if visible.is_empty() {
                empty_list(filter)
            } else {
                visible.into_iter().map(|e| card(e, busy)).collect_view()
            }}
        }
        .into_view()
    };

    view! {
        <section class="dashboard manager">
            <h2>"Manager Dashboard"</h2>
            {move || {
                changed.track();
                dash.with_value(|d| status_line(d.screen().message()))
            }}
            {body}
        </section>
    }
}
