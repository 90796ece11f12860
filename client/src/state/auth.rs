//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. `App` creates one `Session` and provides
//! it as context; components read it through the accessors below rather than
//! reaching for the raw signal.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the initial `/api/auth/me` probe settles.
    pub loading: bool,
}

impl AuthState {
    /// State before the session probe has answered.
    #[must_use]
    pub fn probing() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Process-wide session handle shared through Leptos context.
#[derive(Clone, Copy, Debug)]
pub struct Session {
    state: RwSignal<AuthState>,
}

impl Session {
    #[must_use]
    pub fn new(initial: AuthState) -> Self {
        Self { state: RwSignal::new(initial) }
    }

    /// Make this session available to descendants.
    pub fn provide(self) {
        provide_context(self);
    }

    /// Read the session provided by `App`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a component tree that provided a session.
    #[must_use]
    pub fn expect() -> Self {
        expect_context::<Self>()
    }

    /// Tracked snapshot of the whole state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.with(AuthState::is_authenticated)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    /// Record the outcome of a session probe or login.
    pub fn resolve(&self, user: Option<User>) {
        self.state.set(AuthState { user, loading: false });
    }

    pub fn sign_out(&self) {
        self.resolve(None);
    }
}
