use serde::{Deserialize, Serialize};

use crate::error::{require, DomainResult};
use crate::role::Role;

/// Teams offered by the create-user form.
pub const TEAMS: [&str; 3] = ["Alpha", "Beta", "Gamma"];

/// `POST /admin/create-user` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub team: String,
}

impl Default for NewUser {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::Employee,
            team: TEAMS[0].to_string(),
        }
    }
}

impl NewUser {
    pub fn validate(&self) -> DomainResult<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("team", &self.team)
    }
}
