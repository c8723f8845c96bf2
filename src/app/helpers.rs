//! Startup helpers for analytics and the rotator

use crate::app::scheduler::TaskScheduler;
use crate::app::state::CardRotator;
use crate::features::rotator::DeviceProfile;
use crate::features::settings::AnalyticsSettings;
use crate::features::{
    Analytics, JsonLinesSink, Rotator, RotatorConfig, Settings, TracingSink, quotes,
};
use crate::ui::components::QuoteCard;

/// Build the analytics front from settings. A sink that fails to open
/// degrades to logging only.
pub fn build_analytics(settings: &AnalyticsSettings) -> Analytics {
    if !settings.enabled {
        return Analytics::disabled();
    }

    match &settings.log_file {
        Some(path) => match JsonLinesSink::open(path) {
            Ok(sink) => {
                tracing::info!("Writing analytics events to {}", sink.path().display());
                Analytics::new(sink)
            }
            Err(e) => {
                tracing::warn!("Analytics log unavailable, logging only: {:#}", e);
                Analytics::new(TracingSink)
            }
        },
        None => Analytics::new(TracingSink),
    }
}

/// Attach the rotator to a fresh card. Failure leaves the card out.
pub fn init_rotator(settings: &Settings, device: DeviceProfile) -> Option<CardRotator> {
    let quotes = quotes::catalogue();
    let timings = settings.rotation.timings();
    let card = QuoteCard::new(quotes.len(), timings.fade_out);
    let config = RotatorConfig {
        timings,
        policy: settings.rotation.policy(),
        device,
    };

    match Rotator::init(quotes, card, TaskScheduler::new(), config, &mut rand::rng()) {
        Ok(rotator) => Some(rotator),
        Err(e) => {
            tracing::warn!("Rotating quotes disabled: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_settings_give_disabled_analytics() {
        let settings = AnalyticsSettings {
            enabled: false,
            log_file: None,
        };
        assert!(!build_analytics(&settings).is_enabled());
    }

    #[test]
    fn unopenable_log_falls_back_to_tracing() {
        // A directory path cannot be opened for appending
        let settings = AnalyticsSettings {
            enabled: true,
            log_file: Some(std::env::temp_dir()),
        };
        assert!(build_analytics(&settings).is_enabled());
    }

    #[test]
    fn rotator_attaches_with_defaults() {
        let rotator = init_rotator(&Settings::default(), DeviceProfile::desktop(960.0))
            .expect("default settings attach");
        assert_eq!(rotator.len(), 6);
        assert_eq!(rotator.surface().active(), Some(rotator.current()));
        assert!(rotator.is_auto_rotating());
    }
}
