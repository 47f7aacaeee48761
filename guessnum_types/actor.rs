use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

/// The identity and role set attempting a mutation.
/// `identity` is `None` for unauthenticated callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub identity: Option<String>,
    pub roles: HashSet<Role>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(identity: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            identity: Some(identity.into()),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn user(identity: impl Into<String>) -> Self {
        Self::new(identity, [Role::User])
    }

    pub fn admin(identity: impl Into<String>) -> Self {
        Self::new(identity, [Role::User, Role::Admin])
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns true when the actor is authenticated as `username`.
    pub fn is(&self, username: &str) -> bool {
        self.identity.as_deref() == Some(username)
    }
}
