//! The navigation guard.
//!
//! Rules, first match wins:
//!
//! 1. target requires auth, session signed out        -> `login`
//! 2. signed in, terms not accepted, target is not tos -> `tos`
//! 3. target is public, signed in, terms accepted     -> `home`
//! 4. target requires a role the session lacks        -> `home`
//!
//! Otherwise the navigation proceeds. An `Unknown` terms status matches
//! neither rule 2 nor rule 3.

use serde::Serialize;

use posdash_auth::{RoleSet, SessionState};
use posdash_core::RouteName;

use crate::RouteDescriptor;

/// What the router should do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "to", rename_all = "snake_case")]
pub enum Outcome {
    Proceed,
    Redirect(RouteName),
}

/// The rule that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardRule {
    RequiresLogin,
    RequiresTosAcceptance,
    PublicOnly,
    MissingRoles,
    Allowed,
}

/// A guard decision together with why it was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub outcome: Outcome,
    pub rule: GuardRule,
    /// Required roles the session does not hold. Only set for `MissingRoles`.
    pub missing_roles: RoleSet,
}

impl Decision {
    fn proceed() -> Self {
        Self {
            outcome: Outcome::Proceed,
            rule: GuardRule::Allowed,
            missing_roles: RoleSet::empty(),
        }
    }

    fn redirect(to: &RouteName, rule: GuardRule) -> Self {
        Self {
            outcome: Outcome::Redirect(to.clone()),
            rule,
            missing_roles: RoleSet::empty(),
        }
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

/// Stateless decision procedure run before every transition.
///
/// The fallback route names default to `login`, `tos` and `home`; the route
/// table guarantees they exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationGuard {
    login: RouteName,
    tos: RouteName,
    home: RouteName,
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self {
            login: RouteName::LOGIN,
            tos: RouteName::TOS,
            home: RouteName::HOME,
        }
    }
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether navigating from `from` to `to` may proceed for `session`.
    ///
    /// Pure: no I/O, no state; the same inputs always give the same decision.
    pub fn evaluate(
        &self,
        to: &RouteDescriptor,
        from: Option<&RouteName>,
        session: &SessionState,
    ) -> Decision {
        let decision = self.decide(to, session);
        tracing::debug!(
            from = from.map(RouteName::as_str),
            to = %to.name,
            rule = ?decision.rule,
            outcome = ?decision.outcome,
            "guard evaluated"
        );
        decision
    }

    fn decide(&self, to: &RouteDescriptor, session: &SessionState) -> Decision {
        let meta = &to.meta;

        if meta.requires_auth && !session.authenticated {
            return Decision::redirect(&self.login, GuardRule::RequiresLogin);
        }

        if session.authenticated && session.tos.is_not_accepted() && !to.is(&self.tos) {
            return Decision::redirect(&self.tos, GuardRule::RequiresTosAcceptance);
        }

        if !meta.requires_auth && session.is_onboarded() {
            return Decision::redirect(&self.home, GuardRule::PublicOnly);
        }

        // Every requirement is checked so the decision can report all of them;
        // the outcome is the same single redirect either way.
        let missing = meta.roles.missing_from(session.roles);

        if missing.is_empty() {
            Decision::proceed()
        } else {
            Decision {
                missing_roles: missing,
                ..Decision::redirect(&self.home, GuardRule::MissingRoles)
            }
        }
    }
}
