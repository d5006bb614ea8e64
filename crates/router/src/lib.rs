//! `posdash-router`: route table and navigation guard for the POS dashboard.
//!
//! - [`RouteTable`]: static mapping from URL path to page, built once and validated.
//! - [`NavigationGuard`]: pure decision for a single transition.
//! - [`Navigator`]: follows guard redirects until a route is allowed.
//!
//! Session state is always passed in; nothing here reaches for a global store.

pub mod dashboard;
pub mod guard;
pub mod navigator;
pub mod pattern;
pub mod route;
pub mod table;

pub use dashboard::{dashboard_routes, dashboard_table};
pub use guard::{Decision, GuardRule, NavigationGuard, Outcome};
pub use navigator::{DEFAULT_MAX_REDIRECTS, Navigation, NavigationError, Navigator, Redirect};
pub use pattern::{Params, PathPattern};
pub use route::{LayoutId, PageId, RouteDescriptor, RouteMeta, RouteNode};
pub use table::{RouteMatch, RouteTable};
