//! Rotating quote state machine
//!
//! Cycles through a fixed set of quotes on a timer, fades between them, and
//! backs off while the user is interacting with the card or the window is
//! hidden. All rendering goes through a [`QuoteSurface`] and all timers
//! through a [`Scheduler`], so the machine itself is deterministic.
//!
//! Phases:
//!
//! ```text
//! Idle --init--> Displaying --advance--> FadingOut --fade_out--> FadingIn --fade_in--> Displaying
//! ```

mod interval;
mod surface;
mod timer;

use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;

pub use interval::{DeviceProfile, FixedInterval, IntervalPolicy, ViewportPolicy};
#[cfg(test)]
pub use interval::DeviceClass;
pub use surface::{Fade, MissingElement, QuoteSurface, SurfaceLayout};
#[cfg(test)]
pub use timer::ManualScheduler;
pub use timer::{Scheduler, TimerId};

use crate::features::quotes::Quote;

/// Where the card is in its display cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing rendered yet
    Idle,
    /// A quote is fully shown
    Displaying,
    /// Old quote fading away; content swaps to `target` when this ends
    FadingOut { target: usize },
    /// New quote fading in
    FadingIn,
}

impl Phase {
    pub fn is_transitioning(self) -> bool {
        matches!(self, Phase::FadingOut { .. } | Phase::FadingIn)
    }
}

/// Selector keys the card reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKey {
    /// Enter or Space
    Activate,
    /// Left arrow
    Previous,
    /// Right arrow
    Next,
}

/// Fixed delays used by the rotator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatorTimings {
    pub fade_out: Duration,
    pub fade_in: Duration,
    /// Quiet window that collapses rapid selector clicks
    pub click_debounce: Duration,
    /// Touches shorter than this without movement count as taps
    pub tap_threshold: Duration,
    /// Resume delay after a tap
    pub tap_resume: Duration,
    /// Resume delay after a drag or long press
    pub drag_resume: Duration,
    /// Quiet window before a resize is acted on
    pub resize_settle: Duration,
}

impl Default for RotatorTimings {
    fn default() -> Self {
        Self {
            fade_out: Duration::from_millis(250),
            fade_in: Duration::from_millis(250),
            click_debounce: Duration::from_millis(100),
            tap_threshold: Duration::from_millis(500),
            tap_resume: Duration::from_millis(3000),
            drag_resume: Duration::from_millis(1500),
            resize_settle: Duration::from_millis(250),
        }
    }
}

/// Everything besides the quotes, surface and scheduler that `init` needs
pub struct RotatorConfig {
    pub timings: RotatorTimings,
    pub policy: Box<dyn IntervalPolicy>,
    pub device: DeviceProfile,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            timings: RotatorTimings::default(),
            policy: Box::new(ViewportPolicy::default()),
            device: DeviceProfile::default(),
        }
    }
}

/// Reasons the rotator refuses to attach
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotatorError {
    NoQuotes,
    MissingElement(&'static str),
    SelectorMismatch { selectors: usize, quotes: usize },
}

impl fmt::Display for RotatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotatorError::NoQuotes => write!(f, "no quotes to rotate"),
            RotatorError::MissingElement(name) => {
                write!(f, "required element not found: {}", name)
            }
            RotatorError::SelectorMismatch { selectors, quotes } => write!(
                f,
                "{} selectors for {} quotes",
                selectors, quotes
            ),
        }
    }
}

impl std::error::Error for RotatorError {}

impl From<MissingElement> for RotatorError {
    fn from(missing: MissingElement) -> Self {
        RotatorError::MissingElement(missing.0)
    }
}

/// An in-progress touch on the card
#[derive(Debug, Clone, Copy)]
struct TouchSession {
    started: Instant,
    moved: bool,
}

/// The quote rotator
pub struct Rotator<V, S> {
    quotes: Vec<Quote>,
    current: usize,
    phase: Phase,
    hovered: bool,
    paused: bool,

    auto_rotate: Option<TimerId>,
    fade: Option<TimerId>,
    click_debounce: Option<(TimerId, usize)>,
    touch: Option<TouchSession>,
    touch_resume: Option<TimerId>,
    resize_settle: Option<(TimerId, DeviceProfile)>,

    timings: RotatorTimings,
    policy: Box<dyn IntervalPolicy>,
    device: DeviceProfile,
    has_loading_indicator: bool,

    surface: V,
    scheduler: S,
}

impl<V: QuoteSurface, S: Scheduler> Rotator<V, S> {
    /// Attach to `surface`, show a random quote and start rotating
    pub fn init<R: Rng + ?Sized>(
        quotes: Vec<Quote>,
        surface: V,
        scheduler: S,
        config: RotatorConfig,
        rng: &mut R,
    ) -> Result<Self, RotatorError> {
        if quotes.is_empty() {
            return Err(RotatorError::NoQuotes);
        }

        let layout = surface.probe()?;
        if layout.selectors == 0 {
            return Err(RotatorError::MissingElement("quote selectors"));
        }
        if layout.selectors != quotes.len() {
            return Err(RotatorError::SelectorMismatch {
                selectors: layout.selectors,
                quotes: quotes.len(),
            });
        }

        let start = rng.random_range(0..quotes.len());
        let mut rotator = Self {
            quotes,
            current: 0,
            phase: Phase::Idle,
            hovered: false,
            paused: false,
            auto_rotate: None,
            fade: None,
            click_debounce: None,
            touch: None,
            touch_resume: None,
            resize_settle: None,
            timings: config.timings,
            policy: config.policy,
            device: config.device,
            has_loading_indicator: layout.has_loading_indicator,
            surface,
            scheduler,
        };

        rotator.advance_immediate(start);
        rotator.start_auto_rotate();
        tracing::info!(
            "Quote rotator ready with {} quotes, starting at {}",
            rotator.quotes.len(),
            start
        );
        Ok(rotator)
    }

    // ============ Accessors ============

    pub fn current(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase.is_transitioning()
    }

    #[cfg(test)]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[cfg(test)]
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate.is_some()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[cfg(test)]
    pub fn device(&self) -> &DeviceProfile {
        &self.device
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // ============ Transitions ============

    /// Fade to the quote at `target`. Returns whether a transition started.
    pub fn advance(&mut self, target: usize) -> bool {
        self.transition_to(target, false)
    }

    /// Swap to `target` synchronously, without a fade
    pub fn advance_immediate(&mut self, target: usize) -> bool {
        self.transition_to(target, true)
    }

    /// Auto-rotate step: move one quote forward unless suppressed
    pub fn next(&mut self) {
        if self.hovered || self.paused || self.is_transitioning() {
            return;
        }
        let target = (self.current + 1) % self.quotes.len();
        self.advance(target);
    }

    fn transition_to(&mut self, target: usize, skip_transition: bool) -> bool {
        if self.is_transitioning() {
            tracing::trace!("Ignoring advance to {} during transition", target);
            return false;
        }
        if self.phase != Phase::Idle && target == self.current {
            return false;
        }
        let Some(is_long) = self.quotes.get(target).map(Quote::is_long) else {
            tracing::error!(
                "Invalid quote index {} (have {} quotes)",
                target,
                self.quotes.len()
            );
            return false;
        };

        if skip_transition {
            self.swap_content(target);
            self.phase = Phase::Displaying;
            return true;
        }

        if self.has_loading_indicator && is_long {
            self.surface.set_loading(true);
        }
        self.surface.set_fade(Fade::Out);
        self.phase = Phase::FadingOut { target };
        self.fade = Some(self.scheduler.schedule_once(self.timings.fade_out));
        true
    }

    fn swap_content(&mut self, target: usize) {
        self.surface.show_quote(&self.quotes[target]);
        self.surface.set_active_selector(target);
        self.current = target;
        if self.has_loading_indicator {
            self.surface.set_loading(false);
        }
    }

    fn on_fade_elapsed(&mut self) {
        match self.phase {
            Phase::FadingOut { target } => {
                self.swap_content(target);
                self.surface.set_fade(Fade::In);
                self.phase = Phase::FadingIn;
                self.fade = Some(self.scheduler.schedule_once(self.timings.fade_in));
            }
            Phase::FadingIn => {
                self.phase = Phase::Displaying;
            }
            Phase::Idle | Phase::Displaying => {}
        }
    }

    // ============ Auto-rotate ============

    /// Start the recurring timer unless one is live or rotation is suppressed
    pub fn start_auto_rotate(&mut self) {
        if self.auto_rotate.is_some() || self.hovered || self.paused {
            return;
        }
        let interval = self.policy.interval(&self.device);
        tracing::debug!("Auto-rotate every {:?}", interval);
        self.auto_rotate = Some(self.scheduler.schedule_repeating(interval));
    }

    pub fn stop_auto_rotate(&mut self) {
        if let Some(id) = self.auto_rotate.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Restart the countdown after a manual interaction
    pub fn reset_auto_rotate(&mut self) {
        self.stop_auto_rotate();
        self.start_auto_rotate();
    }

    // ============ Manual selection ============

    /// Selector clicked. Rapid clicks collapse to the last one.
    pub fn select(&mut self, index: usize) {
        if index >= self.quotes.len() {
            tracing::error!("Selector {} out of range", index);
            return;
        }
        if let Some((id, _)) = self.click_debounce.take() {
            self.scheduler.cancel(id);
        }
        let id = self.scheduler.schedule_once(self.timings.click_debounce);
        self.click_debounce = Some((id, index));
    }

    fn on_click_settled(&mut self, index: usize) {
        if self.is_transitioning() {
            return;
        }
        self.advance(index);
        self.reset_auto_rotate();
    }

    /// Key pressed while the selector at `index` has focus.
    ///
    /// Returns the quote the card is now heading to: the activated index
    /// (applied after the click debounce) or the arrow target when its
    /// transition started. `None` when the key had no effect.
    pub fn key(&mut self, index: usize, key: SelectorKey) -> Option<usize> {
        let len = self.quotes.len();
        if index >= len {
            tracing::error!("Selector {} out of range", index);
            return None;
        }

        let target = match key {
            SelectorKey::Activate => {
                self.select(index);
                return Some(index);
            }
            SelectorKey::Previous => (index + len - 1) % len,
            SelectorKey::Next => (index + 1) % len,
        };

        let started = self.advance(target);
        self.reset_auto_rotate();
        self.surface.focus_selector(target);
        started.then_some(target)
    }

    // ============ Suppression ============

    pub fn pointer_entered(&mut self) {
        // A pending touch resume must not clear the hover
        if let Some(id) = self.touch_resume.take() {
            self.scheduler.cancel(id);
        }
        self.hovered = true;
        self.stop_auto_rotate();
    }

    pub fn pointer_left(&mut self) {
        self.hovered = false;
        self.start_auto_rotate();
    }

    pub fn touch_start(&mut self, now: Instant) {
        if let Some(id) = self.touch_resume.take() {
            self.scheduler.cancel(id);
        }
        self.touch = Some(TouchSession {
            started: now,
            moved: false,
        });
        self.hovered = true;
        self.stop_auto_rotate();
    }

    pub fn touch_move(&mut self) {
        if let Some(touch) = self.touch.as_mut() {
            touch.moved = true;
        }
    }

    pub fn touch_end(&mut self, now: Instant) {
        let is_tap = self.touch.take().is_some_and(|touch| {
            !touch.moved && now.saturating_duration_since(touch.started) < self.timings.tap_threshold
        });
        let delay = if is_tap {
            self.timings.tap_resume
        } else {
            self.timings.drag_resume
        };

        if let Some(id) = self.touch_resume.take() {
            self.scheduler.cancel(id);
        }
        self.touch_resume = Some(self.scheduler.schedule_once(delay));
    }

    pub fn touch_cancel(&mut self) {
        self.touch = None;
        if let Some(id) = self.touch_resume.take() {
            self.scheduler.cancel(id);
        }
        self.resume_from_touch();
    }

    fn resume_from_touch(&mut self) {
        self.hovered = false;
        self.start_auto_rotate();
    }

    /// Window (page) shown or hidden
    pub fn visibility_changed(&mut self, visible: bool) {
        if visible {
            self.paused = false;
            self.start_auto_rotate();
        } else {
            self.paused = true;
            self.stop_auto_rotate();
        }
    }

    /// Replace the device description right away. The new interval applies
    /// from the next auto-rotate start.
    pub fn set_device(&mut self, device: DeviceProfile) {
        self.device = device;
    }

    /// Viewport changed; acted on once resizing goes quiet
    pub fn viewport_resized(&mut self, device: DeviceProfile) {
        if let Some((id, _)) = self.resize_settle.take() {
            self.scheduler.cancel(id);
        }
        let id = self.scheduler.schedule_once(self.timings.resize_settle);
        self.resize_settle = Some((id, device));
    }

    fn on_resize_settled(&mut self, device: DeviceProfile) {
        if device.class() != self.device.class() {
            tracing::debug!("Device class now {:?}", device.class());
        }
        self.device = device;
        if !self.is_transitioning() {
            self.surface.snap_visible();
        }
    }

    // ============ Timers ============

    /// Route a fired timer. Ids that are no longer live are ignored.
    pub fn on_timer(&mut self, id: TimerId) {
        if self.auto_rotate == Some(id) {
            self.next();
        } else if self.fade == Some(id) {
            self.fade = None;
            self.on_fade_elapsed();
        } else if self.touch_resume == Some(id) {
            self.touch_resume = None;
            self.resume_from_touch();
        } else if let Some((_, index)) = self.click_debounce.filter(|(pending, _)| *pending == id)
        {
            self.click_debounce = None;
            self.on_click_settled(index);
        } else if self
            .resize_settle
            .as_ref()
            .is_some_and(|(pending, _)| *pending == id)
        {
            if let Some((_, device)) = self.resize_settle.take() {
                self.on_resize_settled(device);
            }
        } else {
            tracing::trace!("Ignoring stale timer {:?}", id);
        }
    }

    /// Stop every live timer. A running fade is completed on the spot.
    pub fn cleanup(&mut self) {
        self.stop_auto_rotate();
        if let Some((id, _)) = self.click_debounce.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.touch_resume.take() {
            self.scheduler.cancel(id);
        }
        if let Some((id, _)) = self.resize_settle.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.fade.take() {
            self.scheduler.cancel(id);
        }
        self.touch = None;

        if let Phase::FadingOut { target } = self.phase {
            self.swap_content(target);
        }
        if self.is_transitioning() {
            self.surface.snap_visible();
            self.phase = Phase::Displaying;
        }
        tracing::debug!("Quote rotator timers cleared");
    }
}
