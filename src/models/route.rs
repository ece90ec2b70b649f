//! Derived route state exposed by the session gate.

use crate::models::Identity;
use std::fmt;

/// Which screen the user should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// No identity notification has arrived yet
    Initializing,
    /// Signed out
    Unauthenticated,
    /// Signed in, profile incomplete (or unreadable)
    OnboardingRequired,
    /// Signed in, profile complete
    Home,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Route::Initializing => "initializing",
            Route::Unauthenticated => "unauthenticated",
            Route::OnboardingRequired => "onboarding-required",
            Route::Home => "home",
        };
        f.write_str(name)
    }
}

/// Route plus the identity it was derived for. In-memory only, recomputed on
/// every identity notification and on explicit saves; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteState {
    pub route: Route,
    pub identity: Option<Identity>,
}

impl RouteState {
    /// State before the first identity notification.
    pub fn initializing() -> Self {
        Self {
            route: Route::Initializing,
            identity: None,
        }
    }

    /// Signed-out state.
    pub fn unauthenticated() -> Self {
        Self {
            route: Route::Unauthenticated,
            identity: None,
        }
    }

    /// Signed-in state routed by profile completeness.
    pub fn signed_in(identity: Identity, profile_complete: bool) -> Self {
        let route = if profile_complete {
            Route::Home
        } else {
            Route::OnboardingRequired
        };
        Self {
            route,
            identity: Some(identity),
        }
    }
}
