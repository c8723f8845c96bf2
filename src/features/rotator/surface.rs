//! Rendering seam between the rotator and whatever draws the card

use crate::features::quotes::Quote;

/// Visual fade direction requested by the rotator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    /// Block is fading away (opacity -> 0, slight downward shift)
    Out,
    /// Block is fading back in with the new content
    In,
}

/// What a surface reports about itself when the rotator attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceLayout {
    /// Number of selector dots, one per quote
    pub selectors: usize,
    /// Whether the optional loading indicator exists
    pub has_loading_indicator: bool,
}

/// A required element the surface could not provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingElement(pub &'static str);

/// Everything the rotator needs from the card it drives.
///
/// Implementations only render; every decision about when to call these
/// lives in [`super::Rotator`].
pub trait QuoteSurface {
    /// Check the required elements are present and report the layout
    fn probe(&self) -> Result<SurfaceLayout, MissingElement>;

    /// Replace the displayed text and author
    fn show_quote(&mut self, quote: &Quote);

    /// Start fading the quote block out or in
    fn set_fade(&mut self, fade: Fade);

    /// Jump straight to fully visible, without animating
    fn snap_visible(&mut self);

    /// Mark `index` as the active selector and every other one inactive
    fn set_active_selector(&mut self, index: usize);

    /// Move input focus to the selector at `index`
    fn focus_selector(&mut self, index: usize);

    /// Show or hide the loading indicator
    fn set_loading(&mut self, visible: bool);
}
