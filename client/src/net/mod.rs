//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs HTTP calls against the stockroom server and `types` defines
//! the JSON schema shared with it.

pub mod api;
pub mod types;
