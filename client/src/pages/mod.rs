//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, persistence) and
//! delegates rendering details to `components`.

pub mod login;
pub mod products;
