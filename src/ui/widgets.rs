//! Reusable UI widgets - composable components without business logic
//!
//! Widgets must not import from `crate::app::Message`; they take generic
//! message types or callbacks.

pub mod selector_dots;
