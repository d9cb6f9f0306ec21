//! Caller context for engine commands
//!
//! The session provider resolves the current user once per call and the
//! engines receive it explicitly — there is no ambient logged-in-user
//! state anywhere in the core.

use crate::models::{AccountStatus, User, UserRole};
use serde::{Deserialize, Serialize};

/// Identity, role and account status of the caller issuing a command
///
/// Engines trust these fields (authentication happened upstream) and use
/// them only for authorization and ownership checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub account_status: AccountStatus,
}

impl Actor {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
            account_status: user.account_status,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_employee(&self) -> bool {
        self.role == UserRole::Employee
    }

    /// Admins are implicitly approved
    pub fn is_approved(&self) -> bool {
        self.is_admin() || self.account_status == AccountStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_user() {
        let user = User {
            id: "u-1".to_string(),
            name: "Alex Admin".to_string(),
            email: "admin@example.com".to_string(),
            role: UserRole::Admin,
            contact: "+123".to_string(),
            avatar: None,
            account_status: AccountStatus::Approved,
            rejection_reason: None,
        };
        let actor = Actor::from_user(&user);
        assert_eq!(actor.id, "u-1");
        assert!(actor.is_admin());
        assert!(actor.is_approved());
    }

    #[test]
    fn test_pending_employee_is_not_approved() {
        let actor = Actor {
            id: "u-2".to_string(),
            name: "John".to_string(),
            role: UserRole::Employee,
            account_status: AccountStatus::Pending,
        };
        assert!(actor.is_employee());
        assert!(!actor.is_approved());
    }
}
