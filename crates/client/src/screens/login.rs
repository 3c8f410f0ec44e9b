use std::rc::Rc;

use ems_core::error::require;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::routes::Route;
use crate::screen::{FormScreen, FormState, Lifecycle};
use crate::transport::Transport;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub struct LoginScreen<T> {
    api: ApiClient<T>,
    form: FormScreen<Credentials>,
}

impl<T: Transport> LoginScreen<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            form: FormScreen::new(Lifecycle::new()),
        }
    }

    pub fn lifecycle(&self) -> Rc<Lifecycle> {
        self.form.lifecycle().clone()
    }

    pub fn credentials(&self) -> Credentials {
        self.form.draft()
    }

    pub fn state(&self) -> FormState {
        self.form.state()
    }

    pub fn set_email(&self, email: String) {
        self.form.edit(|c| c.email = email);
    }

    pub fn set_password(&self, password: String) {
        self.form.edit(|c| c.password = password);
    }

    /// Exchange credentials for a token and store it. On success returns
    /// the landing route for the decoded role.
    pub async fn submit(&self) -> Option<Route> {
        let api = &self.api;
        let signed_in = self
            .form
            .submit(
                |creds| async move {
                    require("email", &creds.email)?;
                    require("password", &creds.password)?;
                    let token = api.login(creds.email.trim(), &creds.password).await?;
                    api.session().login(&token)?;
                    Ok::<(), ApiError>(())
                },
                "Signed in.",
                "Login failed.",
                false,
            )
            .await;

        signed_in.then(|| Route::home_for(self.api.session().current_role()))
    }
}
