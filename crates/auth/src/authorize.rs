//! Route-level authorization predicate.

use thiserror::Error;

use ems_core::Role;

use crate::session::SessionAccess;

/// What a protected screen needs from the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// Any signed-in user.
    Authenticated,
    /// A signed-in user holding exactly this role.
    Role(Role),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("forbidden: requires role {required}")]
    Forbidden {
        required: Role,
        actual: Option<Role>,
    },
}

/// Check a session against a requirement.
///
/// - No IO
/// - No panics
/// - Cosmetic only: the server re-checks every request
pub fn authorize<S>(session: &S, requirement: &Requirement) -> Result<(), AuthzError>
where
    S: SessionAccess + ?Sized,
{
    if !session.is_authenticated() {
        return Err(AuthzError::Unauthenticated);
    }

    match requirement {
        Requirement::Authenticated => Ok(()),
        Requirement::Role(required) => {
            let actual = session.current_role();
            if actual == Some(*required) {
                Ok(())
            } else {
                Err(AuthzError::Forbidden {
                    required: *required,
                    actual,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::tests::token_with;
    use crate::session::Session;
    use crate::token_store::MemoryTokenStore;
    use serde_json::json;

    fn signed_in(role: &str) -> Session<MemoryTokenStore> {
        let s = Session::new(MemoryTokenStore::new());
        s.login(&token_with(&json!({ "role": role }))).unwrap();
        s
    }

    #[test]
    fn anonymous_sessions_are_unauthenticated() {
        let s = Session::new(MemoryTokenStore::new());
        assert_eq!(
            authorize(&s, &Requirement::Authenticated),
            Err(AuthzError::Unauthenticated)
        );
        assert_eq!(
            authorize(&s, &Requirement::Role(Role::Admin)),
            Err(AuthzError::Unauthenticated)
        );
    }

    #[test]
    fn matching_role_is_allowed() {
        let s = signed_in("MANAGER");
        assert!(authorize(&s, &Requirement::Role(Role::Manager)).is_ok());
        assert!(authorize(&s, &Requirement::Authenticated).is_ok());
    }

    #[test]
    fn other_roles_are_forbidden() {
        let s = signed_in("EMPLOYEE");
        assert_eq!(
            authorize(&s, &Requirement::Role(Role::Admin)),
            Err(AuthzError::Forbidden {
                required: Role::Admin,
                actual: Some(Role::Employee),
            })
        );
    }

    #[test]
    fn undecodable_credential_is_forbidden_from_role_screens() {
        let s = Session::new(MemoryTokenStore::new());
        s.login("garbage").unwrap();

        assert!(authorize(&s, &Requirement::Authenticated).is_ok());
        assert!(matches!(
            authorize(&s, &Requirement::Role(Role::Employee)),
            Err(AuthzError::Forbidden { actual: None, .. })
        ));
    }

    #[test]
    fn works_through_a_trait_object() {
        let s = signed_in("ADMIN");
        let dyn_session: &dyn SessionAccess = &s;
        assert!(authorize(dyn_session, &Requirement::Role(Role::Admin)).is_ok());
    }
}
