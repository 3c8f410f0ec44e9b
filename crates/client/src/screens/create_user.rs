use std::rc::Rc;

use ems_core::{NewUser, Role};

use crate::api::ApiClient;
use crate::screen::{FormScreen, FormState, Lifecycle};
use crate::transport::Transport;

pub struct CreateUserForm<T> {
    api: ApiClient<T>,
    form: FormScreen<NewUser>,
}

impl<T: Transport> CreateUserForm<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            form: FormScreen::new(Lifecycle::new()),
        }
    }

    pub fn lifecycle(&self) -> Rc<Lifecycle> {
        self.form.lifecycle().clone()
    }

    pub fn draft(&self) -> NewUser {
        self.form.draft()
    }

    pub fn state(&self) -> FormState {
        self.form.state()
    }

    pub fn edit(&self, f: impl FnOnce(&mut NewUser)) {
        self.form.edit(f);
    }

    pub fn set_role(&self, role: Role) {
        self.form.edit(|u| u.role = role);
    }

    /// Create the account; the form resets to its defaults on success.
    pub async fn submit(&self) -> bool {
        let api = &self.api;
        self.form
            .submit(
                |user| async move { api.create_user(&user).await },
                "User created successfully!",
                "Failed to create user.",
                true,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::client_as;
    use crate::transport::Method;
    use serde_json::json;

    fn fill(form: &CreateUserForm<std::rc::Rc<crate::mock::MockTransport>>) {
        form.edit(|u| {
            u.name = "Ravi".into();
            u.email = "ravi@example.com".into();
            u.password = "hunter2".into();
            u.team = "Gamma".into();
        });
        form.set_role(Role::Manager);
    }

    #[tokio::test]
    async fn posts_all_fields_and_resets() {
        let (mock, api) = client_as(Role::Admin);
        mock.respond(Method::Post, "/admin/create-user", 201, json!({ "id": "u9" }));

        let form = CreateUserForm::new(api);
        fill(&form);

        assert!(form.submit().await);
        assert_eq!(
            mock.requests()[0].body.as_json(),
            Some(&json!({
                "name": "Ravi",
                "email": "ravi@example.com",
                "password": "hunter2",
                "role": "MANAGER",
                "team": "Gamma"
            }))
        );
        assert_eq!(form.draft(), NewUser::default());
        assert_eq!(form.state(), FormState::Succeeded("User created successfully!".into()));
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_sends_nothing() {
        let (mock, api) = client_as(Role::Admin);
        mock.stall(Method::Post, "/admin/create-user");

        let form = CreateUserForm::new(api);
        fill(&form);

        let mut first = Box::pin(form.submit());
        assert!(futures::poll!(first.as_mut()).is_pending());

        assert!(!form.submit().await);
        assert_eq!(mock.count(Method::Post, "/admin/create-user"), 1);
        assert!(form.state().is_submitting());
    }

    #[tokio::test]
    async fn failure_keeps_the_draft() {
        let (mock, api) = client_as(Role::Admin);
        mock.respond(Method::Post, "/admin/create-user", 409, json!({ "message": "Email already in use" }));

        let form = CreateUserForm::new(api);
        fill(&form);

        assert!(!form.submit().await);
        assert_eq!(form.draft().email, "ravi@example.com");
        assert_eq!(
            form.state(),
            FormState::Failed("Failed to create user. Email already in use".into())
        );
    }
}
