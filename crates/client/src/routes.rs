//! Route table and guard.
//!
//! The router asks [`guard`] before it constructs a protected screen, so a
//! screen never mounts (and never fetches) for a session that cannot use it.

use ems_auth::{authorize, Requirement, SessionAccess};
use ems_core::Role;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    AdminDashboard,
    AdminCharts,
    CreateUser,
    SetBudget,
    ManagerDashboard,
    EmployeeDashboard,
    SubmitExpense,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Root,
        Route::Login,
        Route::AdminDashboard,
        Route::AdminCharts,
        Route::CreateUser,
        Route::SetBudget,
        Route::ManagerDashboard,
        Route::EmployeeDashboard,
        Route::SubmitExpense,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::AdminDashboard => "/admin/dashboard",
            Route::AdminCharts => "/admin/charts",
            Route::CreateUser => "/admin/create-user",
            Route::SetBudget => "/admin/set-budget",
            Route::ManagerDashboard => "/manager/dashboard",
            Route::EmployeeDashboard => "/employee/dashboard",
            Route::SubmitExpense => "/employee/submit-expense",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// `None` for public routes.
    pub fn requirement(&self) -> Option<Requirement> {
        match self {
            Route::Root | Route::Login => None,
            Route::AdminDashboard | Route::AdminCharts | Route::CreateUser | Route::SetBudget => {
                Some(Requirement::Role(Role::Admin))
            }
            Route::ManagerDashboard => Some(Requirement::Role(Role::Manager)),
            Route::EmployeeDashboard | Route::SubmitExpense => {
                Some(Requirement::Role(Role::Employee))
            }
        }
    }

    /// Landing screen after login.
    pub fn home_for(role: Option<Role>) -> Route {
        match role {
            Some(Role::Admin) => Route::AdminDashboard,
            Some(Role::Manager) => Route::ManagerDashboard,
            Some(Role::Employee) => Route::EmployeeDashboard,
            None => Route::Login,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Root | Route::Login => "Login",
            Route::AdminDashboard => "Admin Dashboard",
            Route::AdminCharts => "Charts Dashboard",
            Route::CreateUser => "Create User",
            Route::SetBudget => "Set Budget",
            Route::ManagerDashboard => "Manager Dashboard",
            Route::EmployeeDashboard => "Employee Dashboard",
            Route::SubmitExpense => "Submit Expense",
        }
    }
}

/// Decide whether `route` may be entered. On refusal, returns the route to
/// redirect to (always the login screen).
pub fn guard<S>(route: Route, session: &S) -> Result<(), Route>
where
    S: SessionAccess + ?Sized,
{
    let Some(requirement) = route.requirement() else {
        return Ok(());
    };

    authorize(session, &requirement).map_err(|err| {
        tracing::info!(path = route.path(), error = %err, "route refused; redirecting to login");
        Route::Login
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::unsigned_token;
    use ems_auth::{MemoryTokenStore, Session};

    fn session_as(role: Option<Role>) -> Session<MemoryTokenStore> {
        let session = Session::new(MemoryTokenStore::new());
        if let Some(role) = role {
            session.login(&unsigned_token(role)).unwrap();
        }
        session
    }

    #[test]
    fn paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/admin/dashboard/"), Some(Route::AdminDashboard));
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn anonymous_users_only_reach_public_routes() {
        let session = session_as(None);
        for route in Route::ALL {
            let expected = if route.requirement().is_none() {
                Ok(())
            } else {
                Err(Route::Login)
            };
            assert_eq!(guard(route, &session), expected, "{route:?}");
        }
    }

    #[test]
    fn each_role_reaches_its_own_screens_only() {
        let employee = session_as(Some(Role::Employee));
        assert_eq!(guard(Route::EmployeeDashboard, &employee), Ok(()));
        assert_eq!(guard(Route::SubmitExpense, &employee), Ok(()));
        assert_eq!(guard(Route::AdminDashboard, &employee), Err(Route::Login));
        assert_eq!(guard(Route::ManagerDashboard, &employee), Err(Route::Login));

        let admin = session_as(Some(Role::Admin));
        assert_eq!(guard(Route::AdminCharts, &admin), Ok(()));
        assert_eq!(guard(Route::EmployeeDashboard, &admin), Err(Route::Login));
    }

    #[test]
    fn logout_closes_protected_routes() {
        let manager = session_as(Some(Role::Manager));
        assert_eq!(guard(Route::ManagerDashboard, &manager), Ok(()));

        manager.logout().unwrap();
        assert_eq!(guard(Route::ManagerDashboard, &manager), Err(Route::Login));
    }

    #[test]
    fn home_follows_role() {
        assert_eq!(Route::home_for(Some(Role::Manager)), Route::ManagerDashboard);
        assert_eq!(Route::home_for(None), Route::Login);
    }
}
