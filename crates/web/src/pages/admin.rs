use leptos::*;
use leptos_router::{use_navigate, A};

use ems_client::screens::{AdminCharts, AdminDashboard, CreateUserForm, SetBudgetForm};
use ems_client::Route as Page;
use ems_core::{ChartData, Expense, Role, TeamBudget, BUDGET_INCREMENT, TEAMS};

use super::{mount, placeholder, spawn_with, status_line};
use crate::context::use_app;
use crate::format;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let app = use_app();
    let (dash, changed) = mount(AdminDashboard::new(app.api.clone()), AdminDashboard::lifecycle);
    spawn_with(dash, |dash| async move { dash.load().await });

    let budget_card = move |budget: TeamBudget, busy: bool| {
        let team = budget.team.clone();
        let increase = move |_| {
            let team = team.clone();
            spawn_with(dash, move |dash| async move {
                dash.increase_budget(&team).await;
            });
        };
        let class = if budget.is_overspent { "card budget overspent" } else { "card budget" };

        view! {
            <div class=class>
                <h4>{budget.team.clone()}</h4>
                <p><strong>"Month: "</strong>{budget.month.clone()}</p>
                <p><strong>"Budget Limit: "</strong>{format::money(budget.limit)}</p>
                <p><strong>"Used: "</strong>{format::money(budget.used)}</p>
                <p><strong>"Remaining: "</strong>{format::money(budget.remaining)}</p>
                <button disabled=busy on:click=increase>
                    {format!("Increase Budget (+{})", format::money(BUDGET_INCREMENT))}
                </button>
            </div>
        }
    };

    let body = move || {
        changed.track();
        let state = dash.with_value(|d| d.screen().snapshot());
        if let Some(placeholder) = placeholder(&state) {
            return placeholder;
        }
        let busy = state.is_submitting();
        let Some(overview) = state.data().cloned() else {
            return ().into_view();
        };

        view! {
            <h3>"Team Budgets"</h3>
            <div class="budget-grid">
                {overview
                    .team_overview
                    .into_iter()
                    .map(|budget| budget_card(budget, busy))
                    .collect_view()}
            </div>
            <h3>"Approved Expenses"</h3>
            {approved_table(overview.expenses)}
        }
        .into_view()
    };

    view! {
        <section class="dashboard admin">
            <h2>"Admin Dashboard"</h2>
            <nav class="admin-links">
                <A href=Page::CreateUser.path()>"Create User"</A>
                <A href=Page::SetBudget.path()>"Set Budget"</A>
                <A href=Page::AdminCharts.path()>"View Charts"</A>
            </nav>
            {move || {
                changed.track();
                dash.with_value(|d| status_line(d.screen().message()))
            }}
            {body}
        </section>
    }
}

fn approved_table(expenses: Vec<Expense>) -> View {
    if expenses.is_empty() {
        return view! { <p class="empty">"No approved expenses."</p> }.into_view();
    }

    view! {
        <table class="expenses">
            <thead>
                <tr>
                    <th>"Employee"</th>
                    <th>"Team"</th>
                    <th>"Category"</th>
                    <th>"Amount"</th>
                    <th>"Date"</th>
                    <th>"Status"</th>
                </tr>
            </thead>
            <tbody>
                {expenses
                    .into_iter()
                    .map(|e| {
                        view! {
                            <tr>
                                <td>{e.employee_display_name().unwrap_or("-").to_string()}</td>
                                <td>{e.team().unwrap_or("-").to_string()}</td>
                                <td>{e.category.clone()}</td>
                                <td>{format::money(e.amount)}</td>
                                <td>{e.display_date().unwrap_or_default()}</td>
                                <td>{e.status.as_str()}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

#[component]
pub fn AdminChartsPage() -> impl IntoView {
    let app = use_app();
    let (charts, changed) = mount(AdminCharts::new(app.api.clone()), AdminCharts::lifecycle);
    spawn_with(charts, |charts| async move { charts.load().await });

    let body = move || {
        changed.track();
        let state = charts.with_value(|c| c.screen().snapshot());
        if let Some(placeholder) = placeholder(&state) {
            return placeholder;
        }
        match state.data() {
            Some(data) => chart_panels(data),
            None => ().into_view(),
        }
    };

    view! {
        <section class="dashboard charts">
            <h2>"Charts Dashboard"</h2>
            <A href=Page::AdminDashboard.path()>"Back to Dashboard"</A>
            {body}
        </section>
    }
}

fn chart_panels(data: &ChartData) -> View {
    let max = data.max_category_value();
    let total = data.total_status_count();

    let bars = data
        .by_category
        .iter()
        .map(|point| {
            let style = format!("width: {:.1}%", format::bar_percent(point.value, max));
            view! {
                <div class="bar-row">
                    <span class="bar-label">{point.name.clone()}</span>
                    <div class="bar" style=style></div>
                    <span class="bar-value">{format::money(point.value)}</span>
                </div>
            }
        })
        .collect_view();

    let slices = data
        .by_status
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let swatch = format!("background: {}", format::palette(i));
            let label = format!(
                "{}: {} ({}%)",
                point.name,
                point.value,
                format::share_percent(point.value, total)
            );
            view! {
                <li><span class="swatch" style=swatch></span>{label}</li>
            }
        })
        .collect_view();

    view! {
        <div class="chart-panel">
            <h3>"Expense by Category"</h3>
            {bars}
        </div>
        <div class="chart-panel">
            <h3>"Expenses by Status"</h3>
            <ul class="legend">{slices}</ul>
        </div>
    }
    .into_view()
}

#[component]
pub fn CreateUserPage() -> impl IntoView {
    let app = use_app();
    let navigate = use_navigate();
    let (form, changed) = mount(CreateUserForm::new(app.api.clone()), CreateUserForm::lifecycle);

    let draft = move || {
        changed.track();
        form.with_value(|f| f.draft())
    };
    let busy = move || {
        changed.track();
        form.with_value(|f| f.state().is_submitting())
    };
    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        spawn_with(form, |form| async move {
            form.submit().await;
        });
    };

    view! {
        <section class="card form">
            <h2>"Create User"</h2>
            <form on:submit=submit>
                <input
                    placeholder="Name"
                    prop:value=move || draft().name
                    on:input=move |ev| form.with_value(|f| f.edit(|u| u.name = event_target_value(&ev)))
                />
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || draft().email
                    on:input=move |ev| form.with_value(|f| f.edit(|u| u.email = event_target_value(&ev)))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || draft().password
                    on:input=move |ev| form.with_value(|f| f.edit(|u| u.password = event_target_value(&ev)))
                />
                <select
                    prop:value=move || draft().role.as_str()
                    on:change=move |ev| {
                        if let Ok(role) = event_target_value(&ev).parse::<Role>() {
                            form.with_value(|f| f.set_role(role));
                        }
                    }
                >
                    {Role::ALL
                        .into_iter()
                        .map(|role| view! { <option value=role.as_str()>{role.as_str()}</option> })
                        .collect_view()}
                </select>
                <select
                    prop:value=move || draft().team
                    on:change=move |ev| form.with_value(|f| f.edit(|u| u.team = event_target_value(&ev)))
                >
                    {TEAMS
                        .into_iter()
                        .map(|team| view! { <option value=team>{team}</option> })
                        .collect_view()}
                </select>
                <div class="buttons">
                    <button type="submit" disabled=busy>"Create"</button>
                    <button
                        type="button"
                        on:click=move |_| navigate(Page::AdminDashboard.path(), Default::default())
                    >
                        "Cancel"
                    </button>
                </div>
            </form>
            {move || {
                changed.track();
                form.with_value(|f| status_line(f.state().message()))
            }}
        </section>
    }
}

#[component]
pub fn SetBudgetPage() -> impl IntoView {
    let app = use_app();
    let navigate = use_navigate();
    let (form, changed) = mount(SetBudgetForm::new(app.api.clone()), SetBudgetForm::lifecycle);

    let draft = move || {
        changed.track();
        form.with_value(|f| f.draft())
    };
    let busy = move || {
        changed.track();
        form.with_value(|f| f.state().is_submitting())
    };
    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        spawn_with(form, |form| async move {
            form.submit().await;
        });
    };

    view! {
        <section class="card form">
            <h2>"Set Budget"</h2>
            <form on:submit=submit>
                <input
                    placeholder="Team"
                    prop:value=move || draft().team
                    on:input=move |ev| form.with_value(|f| f.set_team(event_target_value(&ev)))
                />
                <input
                    type="number"
                    placeholder="Limit (₹)"
                    prop:value=move || draft().limit
                    on:input=move |ev| form.with_value(|f| f.set_limit(event_target_value(&ev)))
                />
                <div class="buttons">
                    <button type="submit" disabled=busy>"Set Budget"</button>
                    <button
                        type="button"
                        on:click=move |_| navigate(Page::AdminDashboard.path(), Default::default())
                    >
                        "Cancel"
                    </button>
                </div>
            </form>
            {move || {
                changed.track();
                form.with_value(|f| status_line(f.state().message()))
            }}
        </section>
    }
}
