//! Team budgets.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{require, DomainError, DomainResult};

/// Amount added to a team's limit by the admin dashboard's quick action.
pub const BUDGET_INCREMENT: f64 = 5000.0;

/// Server-computed budget overview for one team and month.
///
/// `used`, `remaining` and `is_overspent` are derived on the server and are
/// never recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamBudget {
    pub team: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub month: String,
    pub limit: f64,
    #[serde(default)]
    pub used: f64,
    #[serde(default)]
    pub remaining: f64,
    #[serde(default)]
    pub is_overspent: bool,
}

/// `POST /admin/set-budget` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetUpdate {
    pub team: String,
    pub limit: f64,
}

impl BudgetUpdate {
    pub fn new(team: impl Into<String>, limit: f64) -> Self {
        Self {
            team: team.into(),
            limit,
        }
    }

    /// The "increase budget" quick action: current limit plus [`BUDGET_INCREMENT`].
    pub fn increase(budget: &TeamBudget) -> Self {
        Self::new(budget.team.clone(), budget.limit + BUDGET_INCREMENT)
    }

    pub fn validate(&self) -> DomainResult<()> {
        require("team", &self.team)?;
        if !self.limit.is_finite() {
            return Err(DomainError::validation("limit must be a number"));
        }
        Ok(())
    }
}

/// Months come back either as `"2024-05"` or as a bare month number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
