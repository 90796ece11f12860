//! Application state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` is the session shared through context; `products` and
//! `product_form` are page- and modal-scoped models kept free of Leptos
//! types so they can be tested natively.

pub mod auth;
pub mod product_form;
pub mod products;
