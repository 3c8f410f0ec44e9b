//! Application-wide context handed to every page.

use std::rc::Rc;

use leptos::*;

use ems_auth::{Session, SessionAccess};
use ems_client::{ApiClient, ApiError, ClientConfig, HttpTransport, Lifecycle};

use crate::storage::LocalStorageTokenStore;

#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub session: Rc<dyn SessionAccess>,
    pub api: ApiClient<HttpTransport>,
    /// Fires whenever the stored credential changes.
    auth: Trigger,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let session: Rc<dyn SessionAccess> = Rc::new(Session::new(LocalStorageTokenStore));
        let transport = HttpTransport::new(&config)?;
        let api = ApiClient::new(transport, session.clone());
        Ok(Self {
            config,
            session,
            api,
            auth: create_trigger(),
        })
    }

    /// The session, with the caller subscribed to credential changes.
    pub fn tracked_session(&self) -> &dyn SessionAccess {
        self.auth.track();
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.auth.track();
        self.session.is_authenticated()
    }

    pub fn role_label(&self) -> String {
        self.auth.track();
        self.session.role_label().unwrap_or_default()
    }

    /// Call after the session was changed outside of [`AppContext::logout`].
    pub fn session_changed(&self) {
        self.auth.notify();
    }

    pub fn logout(&self) {
        if let Err(err) = self.session.logout() {
            tracing::warn!(error = %err, "could not clear the stored credential");
        }
        self.auth.notify();
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

/// Tie a controller to the current reactive owner: controller changes
/// re-run whatever tracks the returned trigger, and disposing the owner
/// unmounts the controller.
pub fn bind(lifecycle: Rc<Lifecycle>) -> Trigger {
    let trigger = create_trigger();
    lifecycle.subscribe(move || trigger.notify());
    on_cleanup(move || lifecycle.unmount());
    trigger
}
