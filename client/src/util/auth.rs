//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated pages apply identical unauthenticated redirect behavior;
//! public-only pages use the mirror-image guard in `components::public_route`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{AuthState, Session};

pub const LOGIN_PATH: &str = "/login";

/// Whether an authenticated-only page should bounce to the login page.
/// Waits for the session probe so a reload does not flash the login page.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(session: Session, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&session.state()) {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}
