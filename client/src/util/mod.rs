//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (object URLs, task
//! spawning, redirects) from page and component logic to improve reuse and
//! testability.

pub mod auth;
pub mod image_loader;
pub mod object_url;
pub mod task;
