//! Navigation guard for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route except `/login` needs a stored access token. The decision is a
//! pure function of the target path and the token so it can be tested without
//! a router; `install_route_guard` wires it to location changes.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

pub const LOGIN_PATH: &str = "/login";

/// Outcome of a navigation check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavDecision {
    /// Where to send the user instead, or `None` to let the navigation through.
    pub redirect_to: Option<&'static str>,
}

impl NavDecision {
    pub fn allow() -> Self {
        Self { redirect_to: None }
    }

    pub fn redirect(path: &'static str) -> Self {
        Self { redirect_to: Some(path) }
    }
}

/// Decide whether navigating to `path` is allowed with `token`.
pub fn guard(path: &str, token: Option<&str>) -> NavDecision {
    if is_login_path(path) || token.is_some_and(|t| !t.is_empty()) {
        NavDecision::allow()
    } else {
        NavDecision::redirect(LOGIN_PATH)
    }
}

fn is_login_path(path: &str) -> bool {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    trimmed == LOGIN_PATH
}

/// Re-run the guard on every location change and redirect when it says so.
pub fn install_route_guard<F, A>(navigate: F, access_token: A)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
    A: Fn() -> Option<String> + 'static,
{
    let location = use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        let token = access_token();
        if let Some(target) = guard(&path, token.as_deref()).redirect_to {
            tracing::debug!(%path, "guard redirect to login");
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
