// src/app/update/rotator.rs
//! Quote rotator message handlers

use iced::Task;
use iced::time::Instant;
use serde_json::json;

use crate::app::message::Message;
use crate::app::state::App;
use crate::features::analytics::payload;
use crate::features::rotator::QuoteSurface;

impl App {
    /// Handle rotator-related messages
    pub fn handle_rotator(&mut self, message: &Message) -> Option<Task<Message>> {
        let is_rotator_message = matches!(
            message,
            Message::TimerFired(_)
                | Message::SelectorClicked(_)
                | Message::PointerEntered
                | Message::PointerLeft
                | Message::TouchStarted
                | Message::TouchMoved
                | Message::TouchEnded
                | Message::TouchCancelled
                | Message::CleanupRotator
        );
        if !is_rotator_message {
            return None;
        }

        // First touch marks the device touch-capable for the interval policy
        let first_touch = matches!(message, Message::TouchStarted) && !self.ui.touch_seen;
        if first_touch {
            self.ui.touch_seen = true;
        }
        let device = first_touch.then(|| self.ui.device_profile());

        // Card not attached: input is simply dropped
        let Some(rotator) = self.rotator.as_mut() else {
            return Some(Task::none());
        };

        if let Some(device) = device {
            tracing::debug!("Touch input seen, device now {:?}", device.class());
            rotator.set_device(device);
        }

        match message {
            Message::TimerFired(id) => {
                rotator.scheduler_mut().fired(*id);
                rotator.on_timer(*id);
            }

            Message::SelectorClicked(index) => {
                rotator.surface_mut().focus_selector(*index);
                rotator.select(*index);
                self.core.analytics.track(
                    "quote_selected",
                    payload([("index", json!(index)), ("source", json!("click"))]),
                );
            }

            Message::PointerEntered => rotator.pointer_entered(),
            Message::PointerLeft => rotator.pointer_left(),

            Message::TouchStarted => rotator.touch_start(Instant::now()),
            Message::TouchMoved => rotator.touch_move(),
            Message::TouchEnded => rotator.touch_end(Instant::now()),
            Message::TouchCancelled => rotator.touch_cancel(),

            Message::CleanupRotator => {
                tracing::info!("Stopping quote rotator timers");
                rotator.cleanup();
            }

            _ => {}
        }

        Some(Task::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::rotator::DeviceClass;
    use crate::features::{Analytics, Settings};

    fn narrow_app() -> App {
        let mut settings = Settings::default();
        settings.display.window_width = 400.0;
        settings.display.window_height = 400.0;
        App::for_test(settings, Analytics::disabled())
    }

    #[test]
    fn first_touch_makes_narrow_window_mobile() {
        let mut app = narrow_app();
        let rotator = app.rotator.as_ref().expect("rotator attached");
        assert_eq!(rotator.device().class(), DeviceClass::Desktop);

        let _ = app.update(Message::TouchStarted);
        let _ = app.update(Message::TouchCancelled);

        assert!(app.ui.touch_seen);
        let rotator = app.rotator.as_ref().expect("rotator attached");
        assert!(rotator.device().touch_capable);
        assert_eq!(rotator.device().class(), DeviceClass::SmallMobile);
        assert!(rotator.is_auto_rotating(), "Cancel resumes right away");
    }

    #[test]
    fn selector_click_is_reported() {
        let sink = crate::features::analytics::RecordingSink::default();
        let mut app = App::for_test(Settings::default(), Analytics::new(sink.clone()));

        let _ = app.update(Message::SelectorClicked(2));

        let selected = sink.named("quote_selected");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0]["index"], 2);
        assert_eq!(selected[0]["source"], "click");
        let rotator = app.rotator.as_ref().expect("rotator attached");
        assert_eq!(rotator.surface().focused(), Some(2));
    }
}
