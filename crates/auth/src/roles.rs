use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use innkeep_core::DomainError;

/// Staff role stored on a profile.
///
/// Serialized the way the backend stores it: upper-case names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Staff => "STAFF",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown role '{s}'")))
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("an allowed-role set must name at least one role")]
pub struct EmptyRoleSet;

/// Non-empty set of roles allowed to perform an operation.
///
/// Stored as a bitmask over [`Role::ALL`]; construction rejects the empty set
/// so a guard can never be configured to admit nobody by accident.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    pub fn new(roles: &[Role]) -> Result<Self, EmptyRoleSet> {
        let mask = roles.iter().fold(0u8, |acc, r| acc | Self::bit(*r));
        if mask == 0 {
            return Err(EmptyRoleSet);
        }
        Ok(Self(mask))
    }

    /// Every staff role.
    pub fn any_staff() -> Self {
        Self(Role::ALL.iter().fold(0u8, |acc, r| acc | Self::bit(*r)))
    }

    pub fn only(role: Role) -> Self {
        Self(Self::bit(role))
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & Self::bit(role) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }

    fn bit(role: Role) -> u8 {
        match role {
            Role::Admin => 1,
            Role::Manager => 1 << 1,
            Role::Staff => 1 << 2,
        }
    }
}

impl core::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_format_is_upper_case() {
        assert_eq!(serde_json::to_value(Role::Manager).unwrap(), "MANAGER");
        let parsed: Role = serde_json::from_value(serde_json::json!("STAFF")).unwrap();
        assert_eq!(parsed, Role::Staff);
        assert!("admin".parse::<Role>().is_err());
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn empty_role_set_is_rejected() {
        assert_eq!(RoleSet::new(&[]), Err(EmptyRoleSet));
    }

    #[test]
    fn role_set_membership_and_display() {
        let set = RoleSet::new(&[Role::Manager, Role::Admin, Role::Admin]).unwrap();
        assert!(set.contains(Role::Admin));
        assert!(set.contains(Role::Manager));
        assert!(!set.contains(Role::Staff));
        assert_eq!(set.to_string(), "{ADMIN, MANAGER}");
        assert_eq!(RoleSet::any_staff().iter().count(), 3);
    }
}
