//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render inventory widgets and route guards while reading shared
//! state from Leptos context providers or from explicit props.

pub mod authenticated_image;
pub mod product_form_modal;
pub mod public_route;
