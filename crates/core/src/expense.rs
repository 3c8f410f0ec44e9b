//! Expense snapshots and the submission payload.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date::format_display_date;
use crate::error::{require, DomainError, DomainResult};
use crate::id::ExpenseId;

/// Lifecycle status of an expense, decided by a manager on the server.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

impl ExpenseStatus {
    pub const ALL: [ExpenseStatus; 3] = [
        ExpenseStatus::Pending,
        ExpenseStatus::Approved,
        ExpenseStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "PENDING",
            ExpenseStatus::Approved => "APPROVED",
            ExpenseStatus::Rejected => "REJECTED",
        }
    }
}

impl core::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation(format!("unknown expense status '{s}'")))
    }
}

/// Employee summary embedded in admin-facing expense rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team: String,
}

/// Server-owned expense record.
///
/// The API is not uniform across endpoints: the manager list carries
/// `employeeName` and `date`, the admin overview carries `createdAt` and a
/// nested `employee`. Both shapes decode into this one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: f64,
    pub category: String,
    pub status: ExpenseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeRef>,
}

impl Expense {
    /// Only pending expenses can still be approved or rejected.
    pub fn is_actionable(&self) -> bool {
        self.status == ExpenseStatus::Pending
    }

    /// Expense date for display, falling back to the creation timestamp.
    pub fn display_date(&self) -> Option<String> {
        self.date
            .as_deref()
            .or(self.created_at.as_deref())
            .map(format_display_date)
    }

    pub fn employee_display_name(&self) -> Option<&str> {
        self.employee_name
            .as_deref()
            .or_else(|| self.employee.as_ref().map(|e| e.name.as_str()))
            .filter(|name| !name.is_empty())
    }

    pub fn team(&self) -> Option<&str> {
        self.employee
            .as_ref()
            .map(|e| e.team.as_str())
            .filter(|team| !team.is_empty())
    }

    pub fn receipt(&self) -> Option<&str> {
        self.receipt.as_deref().filter(|r| !r.trim().is_empty())
    }
}

/// Display-only status filter used by the list screens.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ExpenseStatus),
}

impl StatusFilter {
    pub const OPTIONS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(ExpenseStatus::Pending),
        StatusFilter::Only(ExpenseStatus::Approved),
        StatusFilter::Only(ExpenseStatus::Rejected),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "ALL",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => expense.status == *status,
        }
    }

    /// Filter a snapshot for display. The snapshot itself is never modified.
    pub fn apply<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        expenses.iter().filter(|e| self.matches(e)).collect()
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("ALL") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Receipt file attached to a new expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Payload of an expense submission.
///
/// `amount` is the text the user typed. It is checked to be numeric but sent
/// unchanged; the server owns its interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: String,
    pub category: String,
    pub notes: String,
    pub date: String,
    pub receipt: Option<Receipt>,
}

impl NewExpense {
    pub fn validate(&self) -> DomainResult<()> {
        require("amount", &self.amount)?;
        if !self.amount.trim().parse::<f64>().is_ok_and(f64::is_finite) {
            return Err(DomainError::validation("amount must be a number"));
        }
        require("category", &self.category)?;
        require("date", &self.date)
    }
}
