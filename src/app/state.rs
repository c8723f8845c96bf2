// src/app/state.rs
//! Application state definitions

use iced::time::Instant;

use crate::app::scheduler::TaskScheduler;
use crate::features::rotator::DeviceProfile;
use crate::features::{Analytics, Rotator, Settings};
use crate::ui::components::QuoteCard;

/// The rotator as hosted by the app
pub type CardRotator = Rotator<QuoteCard, TaskScheduler>;

/// Main application state
pub struct App {
    /// Core infrastructure (settings, analytics)
    pub core: CoreState,
    /// The quote rotator; `None` when it could not attach
    pub rotator: Option<CardRotator>,
    /// Window and input state
    pub ui: UiState,
}

/// Core infrastructure
pub struct CoreState {
    pub settings: Settings,
    pub analytics: Analytics,
    /// When the window was opened, for time-on-page
    pub started_at: Instant,
}

impl CoreState {
    pub fn new(settings: Settings, analytics: Analytics) -> Self {
        Self {
            settings,
            analytics,
            started_at: Instant::now(),
        }
    }
}

/// Window and input state
#[derive(Debug, Clone)]
pub struct UiState {
    pub window_size: iced::Size,
    /// Set once any touch event arrives
    pub touch_seen: bool,
}

impl UiState {
    pub fn new(window_size: iced::Size) -> Self {
        Self {
            window_size,
            touch_seen: false,
        }
    }

    /// Device description fed to the interval policy
    pub fn device_profile(&self) -> DeviceProfile {
        DeviceProfile::desktop(self.window_size.width).with_touch(self.touch_seen)
    }
}

impl App {
    /// Whether the card needs frame ticks for its fade
    pub fn has_active_animations(&self, now: Instant) -> bool {
        self.rotator
            .as_ref()
            .is_some_and(|rotator| rotator.surface().is_animating(now))
    }

    /// Hand any newly scheduled rotator timers to the runtime
    pub fn drain_timers(&mut self) -> iced::Task<crate::app::Message> {
        match self.rotator.as_mut() {
            Some(rotator) => rotator.scheduler_mut().take_tasks(),
            None => iced::Task::none(),
        }
    }
}
