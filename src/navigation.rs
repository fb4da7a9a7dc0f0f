//! Navigation targets emitted by auth operations.
//!
//! Routing itself belongs to the host application; the controller only
//! announces where to go next through a [`Navigator`].

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::fmt;
use std::sync::Mutex;

/// Destinations the auth flow can send the user to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/` after logout.
    Root,
    /// `/profile` after login.
    Profile,
    /// `/success` after registration.
    Success,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Profile => "/profile",
            Self::Success => "/success",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Receives navigation side effects.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every visited route in order.
#[derive(Debug, Default)]
pub struct History {
    visited: Mutex<Vec<Route>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent destination, if any navigation happened.
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.visited.lock().ok().and_then(|v| v.last().copied())
    }

    /// All destinations in visit order.
    #[must_use]
    pub fn visited(&self) -> Vec<Route> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = route.path(), "navigate");
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(route);
        }
    }
}
