//! Route declarations and the flattened descriptors built from them.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use posdash_auth::{Role, RoleSet};
use posdash_core::RouteName;

use crate::PathPattern;

/// Identifier of a page (view) rendered for a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(Cow<'static, str>);

/// Identifier of a layout (wrapping chrome) around a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutId(Cow<'static, str>);

macro_rules! impl_component_id {
    ($t:ty) => {
        impl $t {
            pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

impl_component_id!(PageId);
impl_component_id!(LayoutId);

/// Access requirements of a route, after inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// Every listed role is required.
    pub roles: RoleSet,
}

/// A navigable route, as evaluated by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub name: RouteName,
    pub path: PathPattern,
    pub aliases: Vec<PathPattern>,
    pub page: PageId,
    /// Outermost first.
    pub layouts: Vec<LayoutId>,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    pub fn patterns(&self) -> impl Iterator<Item = &PathPattern> {
        std::iter::once(&self.path).chain(self.aliases.iter())
    }

    pub fn is(&self, name: &RouteName) -> bool {
        &self.name == name
    }
}

/// One node of a declarative route tree.
///
/// A node with children is a layout group: its `component` wraps every child
/// and its path is the prefix for relative child paths. A node without
/// children is a page and must be named.
///
/// `requires_auth` may be omitted on a node and inherited from the nearest
/// ancestor that sets it; roles accumulate from ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub component: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_auth: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// A layout group.
    pub fn layout(path: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            component: component.into(),
            ..Self::default()
        }
    }

    /// A named page.
    pub fn page(
        name: impl Into<String>,
        path: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
            component: component.into(),
            ..Self::default()
        }
    }

    pub fn requires_auth(mut self, value: bool) -> Self {
        self.requires_auth = Some(value);
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.roles.push(role.as_str().to_string());
        self
    }

    pub fn alias(mut self, path: impl Into<String>) -> Self {
        self.aliases.push(path.into());
        self
    }

    pub fn child(mut self, node: RouteNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = RouteNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Resolve a node path against its parent's path.
///
/// Absolute paths stand alone, an empty path is the parent's own path, and
/// anything else is appended to the parent.
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        return child.to_string();
    }
    if child.is_empty() {
        return if parent.is_empty() { "/".to_string() } else { parent.to_string() };
    }
    let base = parent.trim_end_matches('/');
    format!("{base}/{child}")
}
