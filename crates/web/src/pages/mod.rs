//! One page per routed screen.
//!
//! Each page owns its controller for as long as it is mounted and re-renders
//! from the controller's snapshot whenever the controller notifies.

mod admin;
mod employee;
mod login;
mod manager;

pub use admin::{AdminChartsPage, AdminDashboardPage, CreateUserPage, SetBudgetPage};
pub use employee::{EmployeeDashboardPage, SubmitExpensePage};
pub use login::LoginPage;
pub use manager::ManagerDashboardPage;

use std::future::Future;
use std::rc::Rc;

use leptos::*;

use ems_client::{Lifecycle, ScreenState, StatusMessage};
use ems_core::{Expense, StatusFilter};

use crate::context::bind;
use crate::format;

/// Keep `controller` alive for the page and bind its lifecycle to it.
fn mount<C: 'static>(
    controller: C,
    lifecycle: impl FnOnce(&C) -> Rc<Lifecycle>,
) -> (StoredValue<Rc<C>>, Trigger) {
    let changed = bind(lifecycle(&controller));
    (store_value(Rc::new(controller)), changed)
}

/// Run an async controller action on the browser task queue.
fn spawn_with<C, F, Fut>(controller: StoredValue<Rc<C>>, f: F)
where
    C: 'static,
    F: FnOnce(Rc<C>) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    spawn_local(f(controller.get_value()));
}

fn status_line(message: Option<StatusMessage>) -> impl IntoView {
    message.map(|message| {
        let class = if message.is_error() { "status error" } else { "status success" };
        view! { <p class=class>{message.text}</p> }
    })
}

/// What to show instead of data while loading or after a failed load.
fn placeholder<D>(state: &ScreenState<D>) -> Option<View> {
    match state {
        ScreenState::Idle | ScreenState::Loading => {
            Some(view! { <p class="loading">"Loading..."</p> }.into_view())
        }
        ScreenState::LoadError(message) => {
            Some(view! { <p class="status error">{message.clone()}</p> }.into_view())
        }
        _ => None,
    }
}

fn filter_bar(current: StatusFilter, pick: Rc<dyn Fn(StatusFilter)>) -> impl IntoView {
    view! {
        <div class="filters">
            {StatusFilter::OPTIONS
                .into_iter()
                .map(|option| {
                    let pick = pick.clone();
                    let class = if option == current { "filter active" } else { "filter" };
                    view! {
                        <button class=class on:click=move |_| pick(option)>{option.label()}</button>
                    }
                })
                .collect_view()}
        </div>
    }
}

fn empty_list(filter: StatusFilter) -> View {
    let text = match filter {
        StatusFilter::All => "No expenses yet.".to_string(),
        StatusFilter::Only(status) => format!("No {} expenses.", status.as_str().to_lowercase()),
    };
    view! { <p class="empty">{text}</p> }.into_view()
}

/// Fields every expense card shows, in the order the dashboards list them.
fn expense_details(expense: &Expense, receipt_url: Option<String>) -> impl IntoView {
    let date = expense.display_date().unwrap_or_else(|| "-".to_string());
    view! {
        <p><strong>"Amount: "</strong>{format::money(expense.amount)}</p>
        <p><strong>"Category: "</strong>{expense.category.clone()}</p>
        <p><strong>"Date: "</strong>{date}</p>
        {expense.notes.clone().filter(|n| !n.is_empty()).map(|notes| view! {
            <p><strong>"Notes: "</strong>{notes}</p>
        })}
        <p>
            <strong>"Status: "</strong>
            <span class=format::status_class(expense.status)>{expense.status.as_str()}</span>
        </p>
        {receipt_url.map(|url| view! {
            <a href=url target="_blank" rel="noopener noreferrer">"View Receipt"</a>
        })}
    }
}
