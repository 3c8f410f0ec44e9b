use std::rc::Rc;

use ems_core::BudgetUpdate;

use crate::api::{AdminOverview, ApiClient};
use crate::screen::{Lifecycle, Screen, SubmitOutcome};
use crate::transport::Transport;

/// Team budgets plus the approved-expense ledger.
pub struct AdminDashboard<T> {
    api: ApiClient<T>,
    overview: Screen<AdminOverview>,
}

impl<T: Transport> AdminDashboard<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            overview: Screen::new(Lifecycle::new()),
        }
    }

    pub fn lifecycle(&self) -> Rc<Lifecycle> {
        self.overview.lifecycle().clone()
    }

    pub fn screen(&self) -> &Screen<AdminOverview> {
        &self.overview
    }

    pub async fn load(&self) {
        self.overview.load(self.api.admin_dashboard()).await;
    }

    /// Raise `team`'s limit by the fixed increment, then refetch.
    pub async fn increase_budget(&self, team: &str) -> SubmitOutcome {
        let Some(update) = self
            .overview
            .data()
            .and_then(|o| o.team_overview.into_iter().find(|b| b.team == team))
            .map(|budget| BudgetUpdate::increase(&budget))
        else {
            return SubmitOutcome::Refused;
        };

        self.overview
            .submit(
                self.api.set_budget(&update),
                self.api.admin_dashboard(),
                format!("Budget updated for {team}."),
                "Failed to set budget.",
            )
            .await
    }
}
