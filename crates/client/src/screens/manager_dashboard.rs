use std::cell::Cell;
use std::rc::Rc;

use ems_core::{Expense, ExpenseId, ExpenseStatus, StatusFilter};

use crate::api::ApiClient;
use crate::screen::{Lifecycle, Screen, SubmitOutcome};
use crate::transport::Transport;

/// Team expenses awaiting a decision.
pub struct ManagerDashboard<T> {
    api: ApiClient<T>,
    expenses: Screen<Vec<Expense>>,
    filter: Cell<StatusFilter>,
}

impl<T: Transport> ManagerDashboard<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            expenses: Screen::new(Lifecycle::new()),
            filter: Cell::new(StatusFilter::All),
        }
    }

    pub fn lifecycle(&self) -> Rc<Lifecycle> {
        self.expenses.lifecycle().clone()
    }

    pub fn screen(&self) -> &Screen<Vec<Expense>> {
        &self.expenses
    }

    pub async fn load(&self) {
        self.expenses.load(self.api.manager_expenses()).await;
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter.get()
    }

    pub fn set_filter(&self, filter: StatusFilter) {
        self.filter.set(filter);
        self.expenses.lifecycle().notify();
    }

    pub fn visible_expenses(&self) -> Vec<Expense> {
        let filter = self.filter.get();
        self.expenses
            .data()
            .unwrap_or_default()
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect()
    }

    pub async fn approve(&self, id: &ExpenseId) -> SubmitOutcome {
        self.decide(id, ExpenseStatus::Approved).await
    }

    pub async fn reject(&self, id: &ExpenseId) -> SubmitOutcome {
        self.decide(id, ExpenseStatus::Rejected).await
    }

    /// Only pending expenses in the current snapshot can be decided.
    async fn decide(&self, id: &ExpenseId, status: ExpenseStatus) -> SubmitOutcome {
        let actionable = self
            .expenses
            .state()
            .data()
            .is_some_and(|list| list.iter().any(|e| &e.id == id && e.is_actionable()));
        if !actionable {
            tracing::debug!(%id, "expense is not pending; ignoring decision");
            return SubmitOutcome::Refused;
        }

        self.expenses
            .submit(
                self.api.update_expense_status(id, status),
                self.api.manager_expenses(),
                format!("Expense {}!", status.as_str().to_lowercase()),
                "Failed to update expense.",
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::client_as;
    use crate::screen::ScreenState;
    use crate::transport::Method;
    use ems_core::Role;
    use serde_json::{json, Value};

    fn listing(e1_status: &str) -> Value {
        json!({ "expenses": [
            { "id": "e1", "amount": 150, "category": "Travel", "status": e1_status,
              "createdAt": "2024-05-01T09:00:00Z", "employee": { "name": "Asha", "team": "Alpha" } },
            { "id": "e2", "amount": 75, "category": "Food", "status": "REJECTED",
              "createdAt": "2024-05-02T09:00:00Z", "employee": { "name": "Ravi", "team": "Alpha" } }
        ]})
    }

    fn e1() -> ExpenseId {
        ExpenseId::new("e1")
    }

    #[tokio::test]
    async fn approve_patches_then_refetches_once() {
        let (mock, api) = client_as(Role::Manager);
        mock.respond(Method::Get, "/manager/expenses", 200, listing("PENDING"));
        mock.respond(Method::Patch, "/manager/expenses/e1", 200, json!({}));
        mock.respond(Method::Get, "/manager/expenses", 200, listing("APPROVED"));

        let dash = ManagerDashboard::new(api);
        dash.load().await;

        assert_eq!(dash.approve(&e1()).await, SubmitOutcome::Completed);

        let patch = &mock.requests()[1];
        assert_eq!(patch.method, Method::Patch);
        assert_eq!(patch.body.as_json(), Some(&json!({ "status": "APPROVED" })));
        assert_eq!(mock.count(Method::Get, "/manager/expenses"), 2);

        let list = dash.screen().data().unwrap();
        let first = list.iter().find(|e| e.id == e1()).unwrap();
        assert_eq!(first.status, ExpenseStatus::Approved);
        assert!(!first.is_actionable());
        assert_eq!(dash.screen().message().unwrap().text, "Expense approved!");
    }

    #[tokio::test]
    async fn rejected_mutation_keeps_snapshot_and_skips_refetch() {
        let (mock, api) = client_as(Role::Manager);
        mock.respond(Method::Get, "/manager/expenses", 200, listing("PENDING"));
        mock.respond(Method::Patch, "/manager/expenses/e1", 500, json!({ "error": "boom" }));

        let dash = ManagerDashboard::new(api);
        dash.load().await;
        let before = dash.screen().data().unwrap();

        assert_eq!(dash.reject(&e1()).await, SubmitOutcome::Failed);
        assert_eq!(mock.count(Method::Get, "/manager/expenses"), 1);
        assert!(matches!(
            dash.screen().snapshot(),
            ScreenState::SubmitError { ref data, .. } if *data == before
        ));
        assert!(dash.screen().message().unwrap().is_error());
    }

    #[tokio::test]
    async fn second_decision_is_refused_while_first_is_in_flight() {
        let (mock, api) = client_as(Role::Manager);
        mock.respond(Method::Get, "/manager/expenses", 200, listing("PENDING"));
        mock.stall(Method::Patch, "/manager/expenses/e1");

        let dash = ManagerDashboard::new(api);
        dash.load().await;

        let first_id = e1();
        let mut first = Box::pin(dash.approve(&first_id));
        assert!(futures::poll!(first.as_mut()).is_pending());

        assert_eq!(dash.reject(&e1()).await, SubmitOutcome::Refused);
        assert_eq!(mock.count(Method::Patch, "/manager/expenses/e1"), 1);
        assert_eq!(mock.count(Method::Get, "/manager/expenses"), 1);
    }

    #[tokio::test]
    async fn decided_expense_cannot_be_acted_on() {
        let (mock, api) = client_as(Role::Manager);
        mock.respond(Method::Get, "/manager/expenses", 200, listing("PENDING"));

        let dash = ManagerDashboard::new(api);
        dash.load().await;

        assert_eq!(dash.approve(&ExpenseId::new("e2")).await, SubmitOutcome::Refused);
        assert_eq!(dash.approve(&ExpenseId::new("missing")).await, SubmitOutcome::Refused);
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn response_after_unmount_is_discarded() {
        let (mock, api) = client_as(Role::Manager);
        mock.respond(Method::Get, "/manager/expenses", 200, listing("PENDING"));
        mock.respond(Method::Patch, "/manager/expenses/e1", 200, json!({}));
        mock.respond(Method::Get, "/manager/expenses", 200, listing("APPROVED"));

        let dash = ManagerDashboard::new(api);
        dash.load().await;

        let lifecycle = dash.lifecycle();
        mock.on_send(move |req| {
            if req.method == Method::Patch {
                lifecycle.unmount();
            }
        });

        assert_eq!(dash.approve(&e1()).await, SubmitOutcome::Discarded);
        assert!(dash.screen().snapshot().is_submitting());
    }

    #[tokio::test]
    async fn filter_does_not_touch_snapshot() {
        let (mock, api) = client_as(Role::Manager);
        mock.respond(Method::Get, "/manager/expenses", 200, listing("PENDING"));

        let dash = ManagerDashboard::new(api);
        dash.load().await;
        dash.set_filter(StatusFilter::Only(ExpenseStatus::Rejected));

        assert_eq!(dash.visible_expenses().len(), 1);
        assert_eq!(dash.screen().data().map(|l| l.len()), Some(2));
    }
}
