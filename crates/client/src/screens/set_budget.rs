use std::rc::Rc;

use ems_core::{BudgetUpdate, DomainError};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::screen::{FormScreen, FormState, Lifecycle};
use crate::transport::Transport;

/// Raw form input; `limit` stays text until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetDraft {
    pub team: String,
    pub limit: String,
}

impl BudgetDraft {
    pub fn to_update(&self) -> Result<BudgetUpdate, DomainError> {
        let limit = self
            .limit
            .trim()
            .parse::<f64>()
            .map_err(|_| DomainError::validation("limit must be a number"))?;
        let update = BudgetUpdate::new(self.team.trim(), limit);
        update.validate()?;
        Ok(update)
    }
}

pub struct SetBudgetForm<T> {
    api: ApiClient<T>,
    form: FormScreen<BudgetDraft>,
}

impl<T: Transport> SetBudgetForm<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            form: FormScreen::new(Lifecycle::new()),
        }
    }

    pub fn lifecycle(&self) -> Rc<Lifecycle> {
        self.form.lifecycle().clone()
    }

    pub fn draft(&self) -> BudgetDraft {
        self.form.draft()
    }

    pub fn state(&self) -> FormState {
        self.form.state()
    }

    pub fn set_team(&self, team: String) {
        self.form.edit(|d| d.team = team);
    }

    pub fn set_limit(&self, limit: String) {
        self.form.edit(|d| d.limit = limit);
    }

    pub async fn submit(&self) -> bool {
        let api = &self.api;
        self.form
            .submit(
                |draft| async move {
                    let update = draft.to_update()?;
                    api.set_budget(&update).await?;
                    Ok::<(), ApiError>(())
                },
                "Budget set successfully!",
                "Failed to set budget.",
                true,
            )
            .await
    }
}
