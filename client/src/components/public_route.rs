//! Route guard for pages meant only for signed-out visitors.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the login page so a signed-in user who lands there is sent to the
//! product dashboard instead. The decision is synchronous: while the session
//! probe is still running the children render as-is.

#[cfg(test)]
#[path = "public_route_test.rs"]
mod public_route_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::state::auth::{AuthState, Session};

pub const HOME_PATH: &str = "/";

/// What a public-only route renders for a given session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    Children,
    Redirect(&'static str),
}

#[must_use]
pub fn public_route_outcome(state: &AuthState) -> RouteOutcome {
    if state.is_authenticated() {
        RouteOutcome::Redirect(HOME_PATH)
    } else {
        RouteOutcome::Children
    }
}

#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    let session = Session::expect();

    move || match public_route_outcome(&session.state()) {
        RouteOutcome::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
        RouteOutcome::Children => children().into_any(),
    }
}
