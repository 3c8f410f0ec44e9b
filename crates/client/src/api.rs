//! Typed bindings for the expense-management REST API.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use ems_auth::SessionAccess;
use ems_core::{
    BudgetUpdate, ChartData, ChartsResponse, Expense, ExpenseId, ExpenseStatus, NewExpense, NewUser,
    Notification, TeamBudget,
};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, FormField, FormValue, Transport};

/// `GET /admin/dashboard` response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    #[serde(default)]
    pub team_overview: Vec<TeamBudget>,
    /// Approved expenses across all teams.
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Deserialize)]
struct ExpenseList {
    #[serde(default)]
    expenses: Vec<Expense>,
}

#[derive(Debug, Deserialize)]
struct NotificationList {
    #[serde(default)]
    notifications: Vec<Notification>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// API client bound to a session.
///
/// Every authorized call reads the credential through the session at send
/// time; nothing is cached here.
#[derive(Clone)]
pub struct ApiClient<T> {
    transport: T,
    session: Rc<dyn SessionAccess>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: Rc<dyn SessionAccess>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Rc<dyn SessionAccess> {
        &self.session
    }

    /// `POST /auth/login`. Returns the issued credential; storing it is the
    /// caller's decision.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = ApiRequest::post_json(
            "/auth/login",
            json!({ "email": email, "password": password }),
        );
        let response: LoginResponse = self.execute(request).await?.json()?;
        if response.token.is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".to_string()));
        }
        Ok(response.token)
    }

    /// `GET /dashboard/charts`.
    pub async fn dashboard_charts(&self) -> Result<ChartData, ApiError> {
        let raw: ChartsResponse = self.get_json("/dashboard/charts").await?;
        Ok(raw.into())
    }

    /// `GET /admin/dashboard`.
    pub async fn admin_dashboard(&self) -> Result<AdminOverview, ApiError> {
        self.get_json("/admin/dashboard").await
    }

    /// `POST /admin/set-budget`.
    pub async fn set_budget(&self, update: &BudgetUpdate) -> Result<(), ApiError> {
        update.validate()?;
        let body = serde_json::to_value(update).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.send_authorized(ApiRequest::post_json("/admin/set-budget", body))
            .await?;
        tracing::info!(team = %update.team, limit = update.limit, "budget set");
        Ok(())
    }

    /// `POST /admin/create-user`.
    pub async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        user.validate()?;
        let body = serde_json::to_value(user).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.send_authorized(ApiRequest::post_json("/admin/create-user", body))
            .await?;
        tracing::info!(role = %user.role, team = %user.team, "user created");
        Ok(())
    }

    /// `GET /manager/expenses`.
    pub async fn manager_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        let list: ExpenseList = self.get_json("/manager/expenses").await?;
        Ok(list.expenses)
    }

    /// `PATCH /manager/expenses/:id` with body `{ "status": ... }` and nothing else.
    pub async fn update_expense_status(
        &self,
        id: &ExpenseId,
        status: ExpenseStatus,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::patch_json(
            format!("/manager/expenses/{id}"),
            json!({ "status": status }),
        );
        self.send_authorized(request).await?;
        tracing::info!(expense = %id, %status, "expense status updated");
        Ok(())
    }

    /// `GET /employee/my-expenses`.
    pub async fn my_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        let list: ExpenseList = self.get_json("/employee/my-expenses").await?;
        Ok(list.expenses)
    }

    /// `POST /expenses/submit` as multipart form data.
    pub async fn submit_expense(&self, expense: &NewExpense) -> Result<(), ApiError> {
        expense.validate()?;
        let request = ApiRequest::post_multipart("/expenses/submit", expense_form(expense));
        self.send_authorized(request).await?;
        tracing::info!(category = %expense.category, amount = %expense.amount, "expense submitted");
        Ok(())
    }

    /// `GET /notifications`.
    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let list: NotificationList = self.get_json("/notifications").await?;
        Ok(list.notifications)
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send_authorized(ApiRequest::get(path)).await?.json()
    }

    async fn send_authorized(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let token = self.session.token().ok_or(ApiError::Unauthenticated)?;
        self.execute(request.with_bearer(token)).await
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.send(request).await.inspect_err(|err| {
            tracing::warn!(?method, %path, error = %err, "request failed");
        })?;

        if !response.is_success() {
            let err = ApiError::from_status(response.status, &response.body);
            tracing::warn!(?method, %path, status = response.status, error = %err, "request rejected");
            return Err(err);
        }
        Ok(response)
    }
}

/// Multipart fields in submission order. `notes` is always sent (possibly
/// empty); `receipt` is omitted entirely when no file was chosen.
fn expense_form(expense: &NewExpense) -> Vec<FormField> {
    let mut fields = vec![
        FormField::text("amount", expense.amount.trim()),
        FormField::text("category", expense.category.clone()),
        FormField::text("notes", expense.notes.clone()),
        FormField::text("date", expense.date.clone()),
    ];

    if let Some(receipt) = &expense.receipt {
        fields.push(FormField {
            name: "receipt".to_string(),
            value: FormValue::File {
                file_name: receipt.file_name.clone(),
                content_type: receipt.content_type.clone(),
                bytes: receipt.bytes.clone(),
            },
        });
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{anonymous_client, client_as, MockTransport};
    use crate::transport::Method;
    use ems_core::{Receipt, Role};
    use serde_json::json;

    #[tokio::test]
    async fn attaches_bearer_token() {
        let (mock, api) = client_as(Role::Manager);
        mock.respond(Method::Get, "/manager/expenses", 200, json!({ "expenses": [] }));

        api.manager_expenses().await.unwrap();

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bearer, api.session().token());
    }

    #[tokio::test]
    async fn missing_credential_fails_without_sending() {
        let (mock, api) = anonymous_client();

        let err = api.my_expenses().await.unwrap_err();

        assert_eq!(err, ApiError::Unauthenticated);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn login_is_sent_without_bearer() {
        let (mock, api) = anonymous_client();
        mock.respond(Method::Post, "/auth/login", 200, json!({ "token": "a.b.c" }));

        let token = api.login("a@example.com", "pw").await.unwrap();

        assert_eq!(token, "a.b.c");
        let sent = &mock.requests()[0];
        assert_eq!(sent.bearer, None);
        assert_eq!(
            sent.body.as_json(),
            Some(&json!({ "email": "a@example.com", "password": "pw" }))
        );
    }

    #[tokio::test]
    async fn status_codes_become_typed_errors() {
        let (mock, api) = client_as(Role::Admin);
        mock.respond(Method::Get, "/admin/dashboard", 401, json!({ "message": "jwt expired" }));
        mock.respond(Method::Get, "/admin/dashboard", 403, json!({}));
        mock.respond(Method::Get, "/admin/dashboard", 500, json!({}));

        assert_eq!(api.admin_dashboard().await.unwrap_err(), ApiError::Unauthenticated);
        assert_eq!(api.admin_dashboard().await.unwrap_err(), ApiError::Forbidden);
        assert!(matches!(
            api.admin_dashboard().await.unwrap_err(),
            ApiError::Server { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn admin_overview_tolerates_missing_sections() {
        let (mock, api) = client_as(Role::Admin);
        mock.respond(Method::Get, "/admin/dashboard", 200, json!({}));

        assert_eq!(api.admin_dashboard().await.unwrap(), AdminOverview::default());
    }

    #[tokio::test]
    async fn status_patch_body_is_only_the_status() {
        let (mock, api) = client_as(Role::Manager);
        mock.respond(Method::Patch, "/manager/expenses/e1", 200, json!({ "ok": true }));

        api.update_expense_status(&ExpenseId::new("e1"), ExpenseStatus::Rejected)
            .await
            .unwrap();

        assert_eq!(
            mock.requests()[0].body.as_json(),
            Some(&json!({ "status": "REJECTED" }))
        );
    }

    #[tokio::test]
    async fn invalid_budget_is_not_sent() {
        let (mock, api) = client_as(Role::Admin);

        let err = api.set_budget(&BudgetUpdate::new("", 100.0)).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn receipt_part_is_appended_last() {
        let expense = NewExpense {
            amount: "42.50".into(),
            category: "Meals".into(),
            notes: "client lunch".into(),
            date: "2024-05-02".into(),
            receipt: Some(Receipt {
                file_name: "lunch.jpg".into(),
                content_type: Some("image/jpeg".into()),
                bytes: vec![1, 2, 3],
            }),
        };

        let fields = expense_form(&expense);
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["amount", "category", "notes", "date", "receipt"]);
        assert_eq!(fields[0].value, FormValue::Text("42.50".into()));
    }
}
