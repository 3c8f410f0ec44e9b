//! Root component, router and header.

use leptos::*;
use leptos_router::{use_navigate, Redirect, Route, Router, Routes};

use ems_client::{guard, ClientConfig, Route as Page};

use crate::context::{use_app, AppContext};
use crate::storage::is_token_change;
use crate::pages::{
    AdminChartsPage, AdminDashboardPage, CreateUserPage, EmployeeDashboardPage, LoginPage,
    ManagerDashboardPage, SetBudgetPage, SubmitExpensePage,
};

#[component]
pub fn App() -> impl IntoView {
    let app = match AppContext::new(ClientConfig::from_env()) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(error = %err, "could not build the API client");
            return view! { <p class="fatal">{err.user_message()}</p> }.into_view();
        }
    };
    tracing::info!(api = %app.config.api_base_url, "starting");

    // Another tab signing in or out rewrites the shared credential.
    let listener = app.clone();
    let _ = window_event_listener(ev::storage, move |ev| {
        if is_token_change(ev.key().as_deref()) {
            tracing::debug!("credential changed in another tab");
            listener.session_changed();
        }
    });
    provide_context(app);

    view! {
        <Router>
            <Header/>
            <main>
                <Routes>
                    <Route path=Page::Root.path() view=LoginPage/>
                    <Route path=Page::Login.path() view=LoginPage/>
                    <Route
                        path=Page::AdminDashboard.path()
                        view=|| view! { <Guarded page=Page::AdminDashboard><AdminDashboardPage/></Guarded> }
                    />
                    <Route
                        path=Page::AdminCharts.path()
                        view=|| view! { <Guarded page=Page::AdminCharts><AdminChartsPage/></Guarded> }
                    />
                    <Route
                        path=Page::CreateUser.path()
                        view=|| view! { <Guarded page=Page::CreateUser><CreateUserPage/></Guarded> }
                    />
                    <Route
                        path=Page::SetBudget.path()
                        view=|| view! { <Guarded page=Page::SetBudget><SetBudgetPage/></Guarded> }
                    />
                    <Route
                        path=Page::ManagerDashboard.path()
                        view=|| view! { <Guarded page=Page::ManagerDashboard><ManagerDashboardPage/></Guarded> }
                    />
                    <Route
                        path=Page::EmployeeDashboard.path()
                        view=|| view! { <Guarded page=Page::EmployeeDashboard><EmployeeDashboardPage/></Guarded> }
                    />
                    <Route
                        path=Page::SubmitExpense.path()
                        view=|| view! { <Guarded page=Page::SubmitExpense><SubmitExpensePage/></Guarded> }
                    />
                    <Route path="/*any" view=|| view! { <Redirect path=Page::Login.path()/> }/>
                </Routes>
            </main>
        </Router>
    }
    .into_view()
}

/// Renders `children` only if the session may enter `page`; otherwise
/// redirects. Re-evaluated when the session changes, so logging out from a
/// protected page leaves it.
#[component]
fn Guarded(page: Page, children: ChildrenFn) -> impl IntoView {
    let app = use_app();
    move || match guard(page, app.tracked_session()) {
        Ok(()) => children().into_view(),
        Err(to) => view! { <Redirect path=to.path()/> }.into_view(),
    }
}

#[component]
fn Header() -> impl IntoView {
    let app = use_app();
    let navigate = use_navigate();

    move || {
        if !app.is_signed_in() {
            return None;
        }
        let label = app.role_label();
        let app = app.clone();
        let navigate = navigate.clone();
        let logout = move |_| {
            app.logout();
            navigate(Page::Login.path(), Default::default());
        };

        Some(view! {
            <header class="app-header">
                <h1>"EMS Dashboard - " {label}</h1>
                <button class="logout" on:click=logout>"Logout"</button>
            </header>
        })
    }
}
