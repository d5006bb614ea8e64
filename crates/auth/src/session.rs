//! Session snapshot handed to the navigation guard.

use serde::{Deserialize, Serialize};

use posdash_core::UserId;

use crate::{RoleSet, TosStatus};

/// Read-only view of the session at the moment a navigation is evaluated.
///
/// The guard never sees the store itself, only one of these. The default value
/// is the anonymous session, which is also what a failing store degrades to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub authenticated: bool,
    pub roles: RoleSet,
    pub tos: TosStatus,
    pub user: Option<UserId>,
}

impl SessionState {
    /// Signed out: no roles, no terms-of-service information.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(roles: RoleSet, tos: TosStatus) -> Self {
        Self {
            authenticated: true,
            roles,
            tos,
            user: None,
        }
    }

    /// Authenticated and the terms of service are definitely accepted.
    pub fn is_onboarded(&self) -> bool {
        self.authenticated && self.tos.is_accepted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn anonymous_session_holds_nothing() {
        let s = SessionState::anonymous();
        assert!(!s.authenticated);
        assert!(s.roles.is_empty());
        assert_eq!(s.tos, TosStatus::Unknown);
        assert!(!s.is_onboarded());
    }

    #[test]
    fn onboarded_requires_definite_acceptance() {
        let roles = RoleSet::empty().with(Role::Seller);
        assert!(SessionState::authenticated(roles, TosStatus::Accepted).is_onboarded());
        assert!(!SessionState::authenticated(roles, TosStatus::Unknown).is_onboarded());
    }
}
