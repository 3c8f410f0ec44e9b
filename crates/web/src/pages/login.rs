use leptos::*;
use leptos_router::use_navigate;

use ems_client::screens::LoginScreen;

use super::{mount, spawn_with, status_line};
use crate::context::use_app;

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = use_app();
    let navigate = use_navigate();
    let (screen, changed) = mount(LoginScreen::new(app.api.clone()), LoginScreen::lifecycle);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let app = app.clone();
        let navigate = navigate.clone();
        spawn_with(screen, move |screen| async move {
            if let Some(home) = screen.submit().await {
                app.session_changed();
                navigate(home.path(), Default::default());
            }
        });
    };

    let busy = move || {
        changed.track();
        screen.with_value(|s| s.state().is_submitting())
    };

    view! {
        <section class="card login">
            <h2>"Login"</h2>
            <form on:submit=submit>
                <input
                    type="email"
                    placeholder="Email"
                    required=true
                    on:input=move |ev| screen.with_value(|s| s.set_email(event_target_value(&ev)))
                />
                <input
                    type="password"
                    placeholder="Password"
                    required=true
                    on:input=move |ev| screen.with_value(|s| s.set_password(event_target_value(&ev)))
                />
                <button type="submit" disabled=busy>
                    {move || if busy() { "Signing in..." } else { "Login" }}
                </button>
            </form>
            {move || {
                changed.track();
                screen.with_value(|s| status_line(s.state().message()))
            }}
        </section>
    }
}
