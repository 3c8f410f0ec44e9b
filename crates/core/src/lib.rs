//! `ems-core`: domain types shared by every layer of the dashboard.
//!
//! Everything here mirrors what the remote API owns. The client only ever
//! holds read-only snapshots of these values; nothing in this crate does IO.

pub mod budget;
pub mod charts;
pub mod date;
pub mod error;
pub mod expense;
pub mod id;
pub mod notification;
pub mod role;
pub mod user;

pub use budget::{BudgetUpdate, TeamBudget, BUDGET_INCREMENT};
pub use charts::{CategorySummary, ChartData, ChartPoint, ChartsResponse, StatusSummary};
pub use date::format_display_date;
pub use error::{DomainError, DomainResult};
pub use expense::{EmployeeRef, Expense, ExpenseStatus, NewExpense, Receipt, StatusFilter};
pub use id::{ExpenseId, NotificationId};
pub use notification::{unread_count, Notification};
pub use role::Role;
pub use user::{NewUser, TEAMS};
