//! Application settings persistence
//!
//! Handles saving and loading user preferences.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::rotator::{
    FixedInterval, IntervalPolicy, RotatorTimings, ViewportPolicy,
};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display and interface settings
    pub display: DisplaySettings,
    /// Quote rotation timing
    pub rotation: RotationSettings,
    /// Analytics sink selection
    pub analytics: AnalyticsSettings,
}

/// Display-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub dark_mode: bool,
    /// Initial window width in logical pixels
    pub window_width: f32,
    /// Initial window height in logical pixels
    pub window_height: f32,
}

/// Rotation timing settings (all in milliseconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    /// Fixed auto-rotate interval; `None` picks one from the window size
    pub interval_ms: Option<u64>,
    pub fade_ms: u64,
    pub click_debounce_ms: u64,
    pub tap_resume_ms: u64,
    pub drag_resume_ms: u64,
    /// Treat losing window focus like the page being hidden
    pub pause_when_unfocused: bool,
}

/// Analytics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub enabled: bool,
    /// Append events as JSON lines here instead of only logging them
    pub log_file: Option<PathBuf>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            window_width: 960.0,
            window_height: 420.0,
        }
    }
}

impl Default for RotationSettings {
    fn default() -> Self {
        let timings = RotatorTimings::default();
        Self {
            interval_ms: None,
            fade_ms: timings.fade_out.as_millis() as u64,
            click_debounce_ms: timings.click_debounce.as_millis() as u64,
            tap_resume_ms: timings.tap_resume.as_millis() as u64,
            drag_resume_ms: timings.drag_resume.as_millis() as u64,
            pause_when_unfocused: true,
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: None,
        }
    }
}

impl RotationSettings {
    /// Rotator timings with the configured overrides applied
    pub fn timings(&self) -> RotatorTimings {
        let fade = Duration::from_millis(self.fade_ms);
        RotatorTimings {
            fade_out: fade,
            fade_in: fade,
            click_debounce: Duration::from_millis(self.click_debounce_ms),
            tap_resume: Duration::from_millis(self.tap_resume_ms),
            drag_resume: Duration::from_millis(self.drag_resume_ms),
            ..RotatorTimings::default()
        }
    }

    /// Interval policy: the fixed override if set, otherwise by viewport
    pub fn policy(&self) -> Box<dyn IntervalPolicy> {
        match self.interval_ms {
            Some(ms) if ms > 0 => Box::new(FixedInterval(Duration::from_millis(ms))),
            _ => Box::new(ViewportPolicy::default()),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "quoteloop", "Quoteloop")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };
        match Self::load_from_file(&path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(_)) if !path.exists() => {
                // First run: write the defaults so they can be edited
                let settings = Self::default();
                if let Err(e) = settings.save_to_file(&path) {
                    tracing::debug!("Could not write default settings: {}", e);
                }
                settings
            }
            Err(e) => {
                tracing::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::rotator::DeviceProfile;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("quoteloop-{}-{}", std::process::id(), name))
            .join("settings.json")
    }

    #[test]
    fn round_trips_through_file() {
        let path = temp_path("roundtrip");
        let mut settings = Settings::default();
        settings.rotation.interval_ms = Some(4000);
        settings.analytics.enabled = false;
        settings.display.dark_mode = false;

        settings.save_to_file(&path).expect("save");
        let loaded = Settings::load_from_file(&path).expect("load");
        assert_eq!(loaded.rotation.interval_ms, Some(4000));
        assert!(!loaded.analytics.enabled);
        assert!(!loaded.display.dark_mode);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "rotation": { "fade_ms": 100 } }"#).expect("parse");
        assert_eq!(settings.rotation.fade_ms, 100);
        assert_eq!(settings.rotation.click_debounce_ms, 100);
        assert!(settings.rotation.pause_when_unfocused);
        assert!(settings.display.dark_mode);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
        std::fs::write(&path, "{ not json").expect("write");
        assert!(matches!(
            Settings::load_from_file(&path),
            Err(SettingsError::Parse(_))
        ));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn interval_override_selects_fixed_policy() {
        let device = DeviceProfile::desktop(1400.0);
        let mut rotation = RotationSettings::default();
        assert_eq!(
            rotation.policy().interval(&device),
            Duration::from_secs(7)
        );

        rotation.interval_ms = Some(2500);
        assert_eq!(
            rotation.policy().interval(&device),
            Duration::from_millis(2500)
        );

        rotation.interval_ms = Some(0);
        assert_eq!(
            rotation.policy().interval(&device),
            Duration::from_secs(7),
            "Zero is treated as unset"
        );
    }

    #[test]
    fn timings_follow_settings() {
        let rotation = RotationSettings {
            fade_ms: 120,
            tap_resume_ms: 2000,
            ..Default::default()
        };
        let timings = rotation.timings();
        assert_eq!(timings.fade_out, Duration::from_millis(120));
        assert_eq!(timings.fade_in, Duration::from_millis(120));
        assert_eq!(timings.tap_resume, Duration::from_secs(2));
        assert_eq!(timings.tap_threshold, Duration::from_millis(500));
    }
}
