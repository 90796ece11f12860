//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool, the optional outbound mailer, and the few config
//! flags handlers read per request.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::mailer::Mailer;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Outbound mail. `None` when Resend is not configured.
    pub mailer: Option<Arc<dyn Mailer>>,
    pub cookie_secure: bool,
    pub echo_login_codes: bool,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, mailer: Option<Arc<dyn Mailer>>, config: &ServerConfig) -> Self {
        Self { pool, mailer, cookie_secure: config.cookie_secure, echo_login_codes: config.echo_login_codes }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
