//! Feature modules - business logic separated from UI
//!
//! Each feature module contains the core logic for a specific functionality.
//! Features should not depend on UI components directly.

pub mod analytics;
pub mod quotes;
pub mod rotator;
pub mod settings;

pub use analytics::{Analytics, JsonLinesSink, TracingSink};
pub use quotes::Quote;
pub use rotator::{Rotator, RotatorConfig, SelectorKey};
pub use settings::Settings;
