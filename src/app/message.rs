//! Application messages

use iced::keyboard::{Key, Modifiers};

use crate::features::rotator::TimerId;

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // ============ Rotator ============
    /// A rotator timer fired
    TimerFired(TimerId),
    /// Selector dot clicked
    SelectorClicked(usize),
    /// Pointer entered the card
    PointerEntered,
    /// Pointer left the card
    PointerLeft,
    /// Finger down on the window
    TouchStarted,
    /// Finger moved while down
    TouchMoved,
    /// Finger lifted
    TouchEnded,
    /// Touch interrupted by the system
    TouchCancelled,
    /// Stop every rotator timer
    CleanupRotator,

    // ============ Keyboard ============
    KeyPressed(Key, Modifiers),

    // ============ Window ============
    /// Window gained (`true`) or lost (`false`) focus
    WindowFocused(bool),
    /// Window resized (logical size)
    WindowResized(iced::Size),
    /// Frame tick while the card is animating
    AnimationTick,
    /// Close button pressed
    CloseRequested,
}
