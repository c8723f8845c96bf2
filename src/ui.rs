//! UI module for the quote card
//!
//! # Architecture
//!
//! The UI is organized into two layers:
//!
//! - **Widgets** (`widgets`): Composable UI patterns without business logic
//! - **Components** (`components`): Business-specific UI with Message handling

pub mod components;
pub mod theme;
pub mod widgets;
