//! `posdash` navigation simulator.
//!
//! Builds the route table (failing fast on configuration errors), describes a
//! session from the environment and prints the result of navigating to each
//! given path as one JSON line.

pub mod config;

use std::io::Write;

use anyhow::Context;
use serde_json::json;

use posdash_router::{Navigator, RouteTable, dashboard_table};

pub use config::{AppConfig, SessionConfig};

/// Load the configured route table, or the built-in dashboard table.
pub fn load_table(config: &AppConfig) -> anyhow::Result<RouteTable> {
    match &config.routes_file {
        Some(path) => {
            let document = std::fs::read_to_string(path)
                .with_context(|| format!("reading route tree {}", path.display()))?;
            RouteTable::from_json(&document)
                .with_context(|| format!("invalid route tree {}", path.display()))
        }
        None => dashboard_table().context("built-in dashboard routes are invalid"),
    }
}

pub fn run(config: &AppConfig, paths: &[String], out: &mut impl Write) -> anyhow::Result<()> {
    let table = load_table(config)?;
    let mut navigator = Navigator::new(table).with_max_redirects(config.max_redirects);
    let session = config.session.to_state();

    for path in paths {
        let line = match navigator.navigate(path, &session) {
            Ok(navigation) => json!({ "path": path, "navigation": navigation }),
            Err(e) => json!({ "path": path, "error": e.to_string() }),
        };
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use posdash_auth::{Role, RoleSet, TosStatus};

    use super::*;

    fn config_with(session: SessionConfig) -> AppConfig {
        AppConfig::from_lookup(|_| None::<String>)
            .map(|c| AppConfig { session, ..c })
            .unwrap()
    }

    fn output(config: &AppConfig, paths: &[&str]) -> Vec<serde_json::Value> {
        let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        let mut buf = Vec::new();
        run(config, &paths, &mut buf).unwrap();
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn prints_one_line_per_path() {
        let config = config_with(SessionConfig {
            authenticated: true,
            roles: RoleSet::empty().with(Role::Seller),
            tos: TosStatus::Accepted,
        });

        let lines = output(&config, &["/point-of-sale/info/5", "/banners", "/nope"]);
        assert_eq!(lines.len(), 3);

        assert_eq!(lines[0]["navigation"]["route"], "pointOfSaleInfo");
        assert_eq!(lines[0]["navigation"]["params"][0]["value"], "5");

        assert_eq!(lines[1]["navigation"]["route"], "home");
        assert_eq!(lines[1]["navigation"]["redirects"][0]["rule"], "missing_roles");

        assert_eq!(lines[2]["error"], "no route matches '/nope'");
    }

    #[test]
    fn loads_route_tree_from_file() {
        let path = std::env::temp_dir().join(format!("posdash-routes-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[
                { "component": "PublicLayout", "requiresAuth": false, "children": [
                    { "path": "/login", "name": "login", "component": "LoginView" }
                ]},
                { "component": "DashboardLayout", "requiresAuth": true, "children": [
                    { "path": "/tos", "name": "tos", "component": "TermsOfServiceView" },
                    { "path": "/", "name": "home", "component": "HomeView" }
                ]}
            ]"#,
        )
        .unwrap();

        let vars = HashMap::from([("POSDASH_ROUTES", path.display().to_string())]);
        let config = AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
        let table = load_table(&config).unwrap();
        assert_eq!(table.len(), 3);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn invalid_route_tree_fails_fast() {
        let path = std::env::temp_dir().join(format!("posdash-bad-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{ "path": "/orphan", "name": "orphan", "component": "OrphanView" }]"#,
        )
        .unwrap();

        let vars = HashMap::from([("POSDASH_ROUTES", path.display().to_string())]);
        let config = AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
        let err = load_table(&config).unwrap_err();
        assert!(format!("{err:#}").contains("does not declare requires_auth"));

        std::fs::remove_file(&path).unwrap();
    }
}
