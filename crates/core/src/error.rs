//! Configuration error model.

use thiserror::Error;

/// Result type used while building and validating route configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Startup-time configuration error.
///
/// Every variant is detectable before the first navigation; the application is
/// expected to refuse to start when building its route table returns one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A route (after inheritance from its ancestors) never declares `requires_auth`.
    #[error("route '{route}' does not declare requires_auth")]
    MissingRequiresAuth { route: String },

    /// Role metadata names a role tag that does not exist.
    #[error("route '{route}' references unknown role '{role}'")]
    UnknownRole { route: String, role: String },

    /// A route name the guard redirects to is absent from the table.
    #[error("well-known route '{0}' is missing from the route table")]
    MissingWellKnownRoute(String),

    /// A page node has no name to redirect or navigate to.
    #[error("page at '{path}' has no name")]
    UnnamedRoute { path: String },

    /// Two routes share a name.
    #[error("duplicate route name '{0}'")]
    DuplicateRouteName(String),

    /// Two routes share the same canonical path pattern.
    #[error("path '{path}' is claimed by both '{first}' and '{second}'")]
    AmbiguousPath {
        path: String,
        first: String,
        second: String,
    },

    /// A path pattern could not be parsed.
    #[error("invalid path pattern '{path}': {reason}")]
    InvalidPattern { path: String, reason: String },

    /// A route tree document was malformed.
    #[error("route tree parse error: {0}")]
    Parse(String),
}

impl ConfigError {
    pub fn missing_requires_auth(route: impl Into<String>) -> Self {
        Self::MissingRequiresAuth {
            route: route.into(),
        }
    }

    pub fn unknown_role(route: impl Into<String>, role: impl Into<String>) -> Self {
        Self::UnknownRole {
            route: route.into(),
            role: role.into(),
        }
    }

    pub fn invalid_pattern(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
