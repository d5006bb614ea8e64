//! The route table: validated, flattened, read-only after startup.

use std::collections::HashMap;

use posdash_auth::RoleSet;
use posdash_core::{ConfigError, ConfigResult, RouteName};

use crate::pattern::split_path;
use crate::route::join_path;
use crate::{LayoutId, PageId, Params, PathPattern, RouteDescriptor, RouteMeta, RouteNode};

/// Route names the guard redirects to; every table must contain them.
pub const WELL_KNOWN_ROUTES: [RouteName; 3] = [RouteName::LOGIN, RouteName::TOS, RouteName::HOME];

/// Result of resolving a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'t> {
    pub route: &'t RouteDescriptor,
    pub params: Params,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    by_name: HashMap<RouteName, usize>,
}

/// What a node inherits from its ancestors while flattening.
#[derive(Clone)]
struct Inherited<'a> {
    path: String,
    layouts: Vec<LayoutId>,
    requires_auth: Option<bool>,
    roles: Vec<&'a str>,
}

impl RouteTable {
    /// Validate and flatten a route tree.
    ///
    /// Fails on the first configuration error found; a table that builds is
    /// safe to navigate.
    pub fn build(tree: &[RouteNode]) -> ConfigResult<Self> {
        let mut routes = Vec::new();
        let root = Inherited {
            path: String::new(),
            layouts: Vec::new(),
            requires_auth: None,
            roles: Vec::new(),
        };
        for node in tree {
            flatten(node, &root, &mut routes)?;
        }

        let mut by_name = HashMap::with_capacity(routes.len());
        let mut claimed: HashMap<String, &RouteName> = HashMap::new();
        for (idx, route) in routes.iter().enumerate() {
            if by_name.insert(route.name.clone(), idx).is_some() {
                return Err(ConfigError::DuplicateRouteName(route.name.to_string()));
            }
            for pattern in route.patterns() {
                let canonical = pattern.canonical();
                match claimed.get(&canonical) {
                    Some(owner) if **owner == route.name => {}
                    Some(owner) => {
                        return Err(ConfigError::AmbiguousPath {
                            path: pattern.to_string(),
                            first: owner.to_string(),
                            second: route.name.to_string(),
                        });
                    }
                    None => {
                        claimed.insert(canonical, &route.name);
                    }
                }
            }
        }

        for name in &WELL_KNOWN_ROUTES {
            if !by_name.contains_key(name) {
                return Err(ConfigError::MissingWellKnownRoute(name.to_string()));
            }
        }

        tracing::info!(routes = routes.len(), "route table built");
        Ok(Self { routes, by_name })
    }

    /// Build from a JSON array of route nodes.
    pub fn from_json(document: &str) -> ConfigResult<Self> {
        let tree: Vec<RouteNode> = serde_json::from_str(document)?;
        Self::build(&tree)
    }

    /// Resolve a concrete path to the most specific matching route.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let parts = split_path(path);
        let mut best: Option<(Vec<_>, RouteMatch<'_>)> = None;

        for route in &self.routes {
            for pattern in route.patterns() {
                let Some(params) = pattern.match_segments(&parts) else {
                    continue;
                };
                let rank = pattern.rank();
                if best.as_ref().is_none_or(|(current, _)| rank > *current) {
                    best = Some((rank, RouteMatch { route, params }));
                }
            }
        }

        best.map(|(_, m)| m)
    }

    /// Look a route up by name.
    pub fn route(&self, name: &RouteName) -> Option<&RouteDescriptor> {
        self.by_name.get(name).map(|idx| &self.routes[*idx])
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn flatten<'a>(
    node: &'a RouteNode,
    parent: &Inherited<'a>,
    out: &mut Vec<RouteDescriptor>,
) -> ConfigResult<()> {
    let path = join_path(&parent.path, &node.path);
    let mut here = parent.clone();
    here.path = path.clone();
    if node.requires_auth.is_some() {
        here.requires_auth = node.requires_auth;
    }
    here.roles.extend(node.roles.iter().map(String::as_str));

    if node.is_group() {
        here.layouts.push(LayoutId::new(node.component.clone()));
        for child in &node.children {
            flatten(child, &here, out)?;
        }
        return Ok(());
    }

    let name = node
        .name
        .clone()
        .ok_or_else(|| ConfigError::UnnamedRoute { path: path.clone() })?;

    let requires_auth = here
        .requires_auth
        .ok_or_else(|| ConfigError::missing_requires_auth(&name))?;

    let roles = RoleSet::parse_strict(&here.roles)
        .map_err(|e| ConfigError::unknown_role(&name, e.0))?;

    let aliases = node
        .aliases
        .iter()
        .map(|alias| PathPattern::parse(&join_path(&parent.path, alias)))
        .collect::<ConfigResult<Vec<_>>>()?;

    out.push(RouteDescriptor {
        name: RouteName::from(name),
        path: PathPattern::parse(&path)?,
        aliases,
        page: PageId::new(node.component.clone()),
        layouts: here.layouts,
        meta: RouteMeta {
            requires_auth,
            roles,
        },
    });
    Ok(())
}
