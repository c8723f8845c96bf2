//! Main application module

pub mod helpers;
mod message;
mod scheduler;
mod state;
mod update;
mod view;

use iced::{Task, Theme};
use serde_json::json;

use crate::features::Settings;
use crate::features::analytics::payload;
pub use message::Message;
pub use state::{App, CoreState, UiState};

impl App {
    /// Create new application instance
    pub fn new() -> (Self, Task<Message>) {
        // 1-2. Load settings, analytics and the rotator
        let mut app = Self::with_settings(Settings::load());
        let window_size = app.ui.window_size;

        // 3. Open main window
        let (window_id, open_window) = iced::window::open(iced::window::Settings {
            size: window_size,
            exit_on_close_request: false,
            #[cfg(target_os = "linux")]
            platform_specific: iced::window::settings::PlatformSpecific {
                application_id: "quoteloop".to_string(),
                ..Default::default()
            },
            ..Default::default()
        });
        tracing::info!("Opening main window with id: {:?}", window_id);

        let timers = app.drain_timers();
        (app, Task::batch([open_window.discard(), timers]))
    }

    /// Build the state from settings without opening a window
    fn with_settings(settings: Settings) -> Self {
        let analytics = helpers::build_analytics(&settings.analytics);

        let window_size = iced::Size::new(
            settings.display.window_width,
            settings.display.window_height,
        );
        let ui = UiState::new(window_size);
        let rotator = helpers::init_rotator(&settings, ui.device_profile());

        analytics.track("page_view", payload([("page", json!("quotes"))]));

        Self {
            core: CoreState::new(settings, analytics),
            rotator,
            ui,
        }
    }

    /// Test instance with the given settings and analytics
    #[cfg(test)]
    pub(crate) fn for_test(settings: Settings, analytics: crate::features::Analytics) -> Self {
        let mut app = Self::with_settings(settings);
        app.core.analytics = analytics;
        app
    }

    /// Application theme for a specific window
    pub fn theme(&self, _window_id: iced::window::Id) -> Theme {
        if self.core.settings.display.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Window title showing the current position in the rotation
    pub fn title(&self, _window_id: iced::window::Id) -> String {
        match &self.rotator {
            Some(rotator) => format!(
                "Quoteloop - {}/{}",
                rotator.current() + 1,
                rotator.len()
            ),
            None => "Quoteloop".to_string(),
        }
    }

    /// Subscriptions for animation frames, keyboard, touch, focus and window events
    pub fn subscription(&self) -> iced::Subscription<Message> {
        use iced::keyboard;
        use iced::time::Instant;

        let now = Instant::now();

        // 1. Keyboard events
        let keyboard_sub = keyboard::listen().filter_map(|event| match event {
            keyboard::Event::KeyPressed { key, modifiers, .. } => {
                Some(Message::KeyPressed(key, modifiers))
            }
            _ => None,
        });

        // 2. Touch and focus events
        let input_sub = iced::event::listen().filter_map(|event| match event {
            iced::Event::Touch(touch) => Some(touch_message(touch)),
            iced::Event::Window(iced::window::Event::Focused) => Some(Message::WindowFocused(true)),
            iced::Event::Window(iced::window::Event::Unfocused) => {
                Some(Message::WindowFocused(false))
            }
            _ => None,
        });

        // 3. Window events
        let close_request_sub = iced::window::close_requests().map(|_id| Message::CloseRequested);
        let resize_sub =
            iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size));

        // 4. Fade animation (~60fps while fading)
        let animation_sub = if self.has_active_animations(now) {
            iced::window::frames().map(|_| Message::AnimationTick)
        } else {
            iced::Subscription::none()
        };

        iced::Subscription::batch([
            keyboard_sub,
            input_sub,
            close_request_sub,
            resize_sub,
            animation_sub,
        ])
    }
}

/// Map a raw touch event onto the card's touch messages
fn touch_message(event: iced::touch::Event) -> Message {
    use iced::touch::Event;

    match event {
        Event::FingerPressed { .. } => Message::TouchStarted,
        Event::FingerMoved { .. } => Message::TouchMoved,
        Event::FingerLifted { .. } => Message::TouchEnded,
        Event::FingerLost { .. } => Message::TouchCancelled,
    }
}
