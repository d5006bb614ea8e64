//! Environment-driven configuration.

use std::path::PathBuf;

use anyhow::{Context, bail};

use posdash_auth::{RoleSet, SessionState, TosStatus};
use posdash_observability::LogFormat;
use posdash_router::DEFAULT_MAX_REDIRECTS;

/// Session the simulator navigates as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub authenticated: bool,
    pub roles: RoleSet,
    pub tos: TosStatus,
}

impl SessionConfig {
    pub fn to_state(&self) -> SessionState {
        if self.authenticated {
            SessionState::authenticated(self.roles, self.tos)
        } else {
            SessionState::anonymous()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON route tree to use instead of the built-in dashboard routes.
    pub routes_file: Option<PathBuf>,
    pub max_redirects: usize,
    pub log_format: LogFormat,
    pub session: SessionConfig,
    /// Problems that were tolerated while loading; logged once logging is up.
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// - `POSDASH_ROUTES`: path to a JSON route tree
    /// - `POSDASH_MAX_REDIRECTS`: redirect hop limit (default 8)
    /// - `POSDASH_LOG_FORMAT`: `json` or `pretty`
    /// - `POSDASH_AUTHENTICATED`, `POSDASH_ROLES`, `POSDASH_TOS`: the session
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        let max_redirects = match lookup("POSDASH_MAX_REDIRECTS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "POSDASH_MAX_REDIRECTS={raw:?} is not a number; using {DEFAULT_MAX_REDIRECTS}"
                ));
                DEFAULT_MAX_REDIRECTS
            }),
            None => DEFAULT_MAX_REDIRECTS,
        };

        let log_format = match lookup("POSDASH_LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .context("POSDASH_LOG_FORMAT")?,
            None => LogFormat::default(),
        };

        let authenticated = match lookup("POSDASH_AUTHENTICATED").as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => bail!("POSDASH_AUTHENTICATED must be true or false, got {other:?}"),
        };

        let roles = match lookup("POSDASH_ROLES") {
            Some(raw) => {
                let tags = raw.split(',').map(str::trim).filter(|r| !r.is_empty());
                RoleSet::parse_strict(tags).context("POSDASH_ROLES")?
            }
            None => RoleSet::empty(),
        };

        let tos = TosStatus::from_wire(lookup("POSDASH_TOS").as_deref().map(str::trim));

        Ok(Self {
            routes_file: lookup("POSDASH_ROUTES").map(PathBuf::from),
            max_redirects,
            log_format,
            session: SessionConfig {
                authenticated,
                roles,
                tos,
            },
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use posdash_auth::Role;

    use super::*;

    fn from(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_describe_a_signed_out_session() {
        let config = from(&[]).unwrap();
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.routes_file, None);
        assert_eq!(config.session.to_state(), SessionState::anonymous());
    }

    #[test]
    fn reads_session_description() {
        let config = from(&[
            ("POSDASH_AUTHENTICATED", "true"),
            ("POSDASH_ROLES", "Board, BAC"),
            ("POSDASH_TOS", "NOT_ACCEPTED"),
            ("POSDASH_MAX_REDIRECTS", "3"),
            ("POSDASH_LOG_FORMAT", "pretty"),
        ])
        .unwrap();

        assert_eq!(config.max_redirects, 3);
        assert_eq!(config.log_format, LogFormat::Pretty);
        let state = config.session.to_state();
        assert!(state.authenticated);
        assert_eq!(state.roles, RoleSet::empty().with(Role::Board).with(Role::Bac));
        assert_eq!(state.tos, TosStatus::NotAccepted);
    }

    #[test]
    fn signed_out_session_ignores_roles() {
        let config = from(&[("POSDASH_ROLES", "Seller")]).unwrap();
        assert_eq!(config.session.to_state(), SessionState::anonymous());
    }

    #[test]
    fn bad_numbers_fall_back_but_bad_roles_fail() {
        let config = from(&[("POSDASH_MAX_REDIRECTS", "lots")]).unwrap();
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(config.warnings.len(), 1);

        assert!(from(&[("POSDASH_ROLES", "Board,Janitor")]).is_err());
        assert!(from(&[("POSDASH_ROLES", "board")]).is_err());
        assert!(from(&[("POSDASH_AUTHENTICATED", "maybe")]).is_err());
        assert!(from(&[("POSDASH_LOG_FORMAT", "xml")]).is_err());
    }
}
