// src/app/update/window.rs
//! Window focus, resize and close handlers

use iced::Task;
use serde_json::json;

use crate::app::message::Message;
use crate::app::state::App;
use crate::features::analytics::payload;

impl App {
    /// Handle window-related messages
    pub fn handle_window(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::WindowFocused(focused) => {
                if self.core.settings.rotation.pause_when_unfocused {
                    if let Some(rotator) = self.rotator.as_mut() {
                        rotator.visibility_changed(*focused);
                    }
                }
                Some(Task::none())
            }

            Message::WindowResized(size) => {
                self.ui.window_size = *size;
                let device = self.ui.device_profile();
                if let Some(rotator) = self.rotator.as_mut() {
                    rotator.viewport_resized(device);
                }
                Some(Task::none())
            }

            // Redraw only; the view reads the animation clock
            Message::AnimationTick => Some(Task::none()),

            Message::CloseRequested => {
                let seconds = self.core.started_at.elapsed().as_secs();
                self.core
                    .analytics
                    .track("time_on_page", payload([("seconds", json!(seconds))]));
                if let Some(rotator) = self.rotator.as_mut() {
                    rotator.cleanup();
                }
                tracing::info!("Closing after {}s", seconds);
                Some(iced::exit())
            }

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::analytics::RecordingSink;
    use crate::features::{Analytics, Settings};

    fn app_with(settings: Settings) -> (App, RecordingSink) {
        let sink = RecordingSink::default();
        let app = App::for_test(settings, Analytics::new(sink.clone()));
        (app, sink)
    }

    #[test]
    fn focus_loss_pauses_and_focus_resumes() {
        let (mut app, _sink) = app_with(Settings::default());

        let _ = app.update(Message::WindowFocused(false));
        let rotator = app.rotator.as_ref().expect("rotator attached");
        assert!(rotator.is_paused());
        assert!(!rotator.is_auto_rotating());

        let _ = app.update(Message::WindowFocused(true));
        let rotator = app.rotator.as_ref().expect("rotator attached");
        assert!(!rotator.is_paused());
        assert!(rotator.is_auto_rotating());
    }

    #[test]
    fn focus_is_ignored_when_pausing_is_off() {
        let mut settings = Settings::default();
        settings.rotation.pause_when_unfocused = false;
        let (mut app, _sink) = app_with(settings);

        let _ = app.update(Message::WindowFocused(false));
        let rotator = app.rotator.as_ref().expect("rotator attached");
        assert!(!rotator.is_paused());
        assert!(rotator.is_auto_rotating());
    }

    #[test]
    fn close_reports_time_on_page_and_clears_timers() {
        let (mut app, sink) = app_with(Settings::default());

        let _ = app.update(Message::CloseRequested);

        let rotator = app.rotator.as_ref().expect("rotator attached");
        assert!(!rotator.is_auto_rotating());
        assert_eq!(rotator.scheduler().live(), 0);

        let reports = sink.named("time_on_page");
        assert_eq!(reports.len(), 1);
        assert!(reports[0]["seconds"].is_u64());
    }

    #[test]
    fn resize_waits_for_settle() {
        let (mut app, _sink) = app_with(Settings::default());
        let _ = app.update(Message::WindowResized(iced::Size::new(400.0, 400.0)));

        assert_eq!(app.ui.window_size.width, 400.0);
        let rotator = app.rotator.as_ref().expect("rotator attached");
        assert_eq!(rotator.device().viewport_width, 960.0, "Applied after settle");
    }
}
