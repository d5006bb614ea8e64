//! Drives the guard for a navigation attempt, following redirects.

use serde::Serialize;
use thiserror::Error;

use posdash_auth::{AuthStore, SessionState};
use posdash_core::RouteName;

use crate::{
    GuardRule, LayoutId, NavigationGuard, Outcome, PageId, Params, RouteDescriptor, RouteTable,
};

/// Redirect hops allowed before a navigation is abandoned.
pub const DEFAULT_MAX_REDIRECTS: usize = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches '{0}'")]
    NotFound(String),

    #[error("unknown route '{0}'")]
    UnknownRoute(RouteName),

    #[error("redirect loop: {}", display_chain(.chain))]
    RedirectLoop { chain: Vec<RouteName> },

    #[error("more than {limit} redirects: {}", display_chain(.chain))]
    TooManyRedirects { limit: usize, chain: Vec<RouteName> },
}

fn display_chain(chain: &[RouteName]) -> String {
    chain
        .iter()
        .map(RouteName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// One guard redirect taken while navigating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub from: RouteName,
    pub to: RouteName,
    pub rule: GuardRule,
}

/// A navigation that ended on an allowed route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub route: RouteName,
    pub page: PageId,
    pub layouts: Vec<LayoutId>,
    /// Empty when the final route was reached through a redirect.
    pub params: Params,
    pub redirects: Vec<Redirect>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Navigation state machine: a route table, a guard and the current route.
///
/// Every guard redirect triggers a fresh evaluation against the fallback route.
/// This is an explicit loop bounded by `max_redirects`; revisiting a route in
/// the same navigation is reported as a loop instead of recursing forever.
#[derive(Debug, Clone)]
pub struct Navigator {
    table: RouteTable,
    guard: NavigationGuard,
    max_redirects: usize,
    current: Option<RouteName>,
}

impl Navigator {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            guard: NavigationGuard::new(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            current: None,
        }
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The route of the last successful navigation.
    pub fn current(&self) -> Option<&RouteName> {
        self.current.as_ref()
    }

    /// Navigate to a concrete path.
    pub fn navigate(
        &mut self,
        path: &str,
        session: &SessionState,
    ) -> Result<Navigation, NavigationError> {
        let matched = self
            .table
            .resolve(path)
            .ok_or_else(|| NavigationError::NotFound(path.to_string()))?;
        let (route, params) = (matched.route.clone(), matched.params);
        self.run(route, params, session)
    }

    /// Navigate to a route by name.
    pub fn navigate_to(
        &mut self,
        name: &RouteName,
        session: &SessionState,
    ) -> Result<Navigation, NavigationError> {
        let route = self
            .table
            .route(name)
            .cloned()
            .ok_or_else(|| NavigationError::UnknownRoute(name.clone()))?;
        self.run(route, Params::new(), session)
    }

    /// Navigate to a path using the current contents of `store`.
    pub fn navigate_with_store(
        &mut self,
        path: &str,
        store: &dyn AuthStore,
    ) -> Result<Navigation, NavigationError> {
        let session = store.snapshot();
        self.navigate(path, &session)
    }

    fn run(
        &mut self,
        mut target: RouteDescriptor,
        mut params: Params,
        session: &SessionState,
    ) -> Result<Navigation, NavigationError> {
        let from = self.current.clone();
        let mut visited = vec![target.name.clone()];
        let mut redirects = Vec::new();

        loop {
            let decision = self.guard.evaluate(&target, from.as_ref(), session);
            let next = match decision.outcome {
                Outcome::Proceed => break,
                Outcome::Redirect(next) => next,
            };

            if redirects.len() >= self.max_redirects {
                visited.push(next);
                tracing::warn!(limit = self.max_redirects, "navigation exceeded redirect limit");
                return Err(NavigationError::TooManyRedirects {
                    limit: self.max_redirects,
                    chain: visited,
                });
            }
            if visited.contains(&next) {
                visited.push(next);
                tracing::warn!(chain = %display_chain(&visited), "redirect loop detected");
                return Err(NavigationError::RedirectLoop { chain: visited });
            }

            let fallback = self
                .table
                .route(&next)
                .cloned()
                .ok_or_else(|| NavigationError::UnknownRoute(next.clone()))?;

            redirects.push(Redirect {
                from: target.name.clone(),
                to: next.clone(),
                rule: decision.rule,
            });
            visited.push(next);
            target = fallback;
            params = Params::new();
        }

        tracing::info!(
            from = from.as_ref().map(RouteName::as_str),
            to = %target.name,
            redirects = redirects.len(),
            "navigation completed"
        );
        self.current = Some(target.name.clone());

        Ok(Navigation {
            route: target.name,
            page: target.page,
            layouts: target.layouts,
            params,
            redirects,
        })
    }
}
