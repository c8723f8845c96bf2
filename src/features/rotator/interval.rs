//! Auto-rotate interval policy
//!
//! Smaller and touch-driven screens get more time per quote. The
//! classification is a heuristic, so it sits behind [`IntervalPolicy`] and
//! can be swapped without touching the rotator.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

/// User agents that are treated as mobile regardless of viewport
static MOBILE_AGENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile user agent pattern is valid")
});

/// Viewports at or below this width count as mobile on touch devices
const SMALL_SCREEN_WIDTH: f32 = 768.0;
/// Mobile viewports at or below this width get the longest interval
const EXTRA_SMALL_WIDTH: f32 = 480.0;

/// What the host knows about the device the card is shown on
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceProfile {
    pub user_agent: Option<String>,
    pub viewport_width: f32,
    pub touch_capable: bool,
}

impl DeviceProfile {
    /// A pointer-driven window of the given width
    pub fn desktop(viewport_width: f32) -> Self {
        Self {
            user_agent: None,
            viewport_width,
            touch_capable: false,
        }
    }

    pub fn with_touch(mut self, touch_capable: bool) -> Self {
        self.touch_capable = touch_capable;
        self
    }

    #[cfg(test)]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[cfg(test)]
    pub fn with_width(mut self, viewport_width: f32) -> Self {
        self.viewport_width = viewport_width;
        self
    }

    /// Coarse classification used by [`ViewportPolicy`]
    pub fn class(&self) -> DeviceClass {
        let mobile_agent = self
            .user_agent
            .as_deref()
            .is_some_and(|ua| MOBILE_AGENT.is_match(ua));
        let small_touch = self.viewport_width <= SMALL_SCREEN_WIDTH && self.touch_capable;

        if !(mobile_agent || small_touch) {
            DeviceClass::Desktop
        } else if self.viewport_width <= EXTRA_SMALL_WIDTH {
            DeviceClass::SmallMobile
        } else {
            DeviceClass::Mobile
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
    SmallMobile,
}

/// Picks how long each quote stays up before auto-advancing
pub trait IntervalPolicy {
    fn interval(&self, device: &DeviceProfile) -> Duration;
}

/// Default policy: one fixed interval per device class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportPolicy {
    pub desktop: Duration,
    pub mobile: Duration,
    pub small_mobile: Duration,
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        Self {
            desktop: Duration::from_secs(7),
            mobile: Duration::from_secs(8),
            small_mobile: Duration::from_secs(9),
        }
    }
}

impl IntervalPolicy for ViewportPolicy {
    fn interval(&self, device: &DeviceProfile) -> Duration {
        match device.class() {
            DeviceClass::Desktop => self.desktop,
            DeviceClass::Mobile => self.mobile,
            DeviceClass::SmallMobile => self.small_mobile,
        }
    }
}

/// Same interval everywhere (user override)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval(pub Duration);

impl IntervalPolicy for FixedInterval {
    fn interval(&self, _device: &DeviceProfile) -> Duration {
        self.0
    }
}
