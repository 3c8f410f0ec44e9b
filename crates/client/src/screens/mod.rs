//! One controller per routed screen.
//!
//! Controllers own their snapshot and status line; views subscribe through
//! the controller's [`Lifecycle`](crate::screen::Lifecycle) and call
//! `unmount` when they go away.

pub mod admin_charts;
pub mod admin_dashboard;
pub mod create_user;
pub mod employee_dashboard;
pub mod login;
pub mod manager_dashboard;
pub mod set_budget;
pub mod submit_expense;

pub use admin_charts::AdminCharts;
pub use admin_dashboard::AdminDashboard;
pub use create_user::CreateUserForm;
pub use employee_dashboard::EmployeeDashboard;
pub use login::{Credentials, LoginScreen};
pub use manager_dashboard::ManagerDashboard;
pub use set_budget::{BudgetDraft, SetBudgetForm};
pub use submit_expense::{ExpenseDraft, SubmitExpenseForm};
