// src/app/update/keyboard.rs
//! Keyboard message handlers

use iced::Task;
use iced::keyboard::key::Named;
use iced::keyboard::{Key, Modifiers};
use serde_json::json;

use crate::app::message::Message;
use crate::app::state::App;
use crate::features::SelectorKey;
use crate::features::analytics::payload;

/// What a key press means for the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Act on the focused selector
    Selector(SelectorKey),
    /// Move selector focus forward (`1`) or backward (`-1`)
    MoveFocus(isize),
    /// Stop all rotator timers
    Cleanup,
}

/// Map a key press to a card action
pub fn key_action(key: &Key, modifiers: Modifiers) -> Option<KeyAction> {
    match key {
        Key::Named(Named::ArrowLeft) => Some(KeyAction::Selector(SelectorKey::Previous)),
        Key::Named(Named::ArrowRight) => Some(KeyAction::Selector(SelectorKey::Next)),
        Key::Named(Named::Enter) | Key::Named(Named::Space) => {
            Some(KeyAction::Selector(SelectorKey::Activate))
        }
        Key::Named(Named::Tab) if modifiers.shift() => Some(KeyAction::MoveFocus(-1)),
        Key::Named(Named::Tab) => Some(KeyAction::MoveFocus(1)),
        Key::Named(Named::Escape) => Some(KeyAction::Cleanup),
        Key::Character(c) if c.as_str() == " " => {
            Some(KeyAction::Selector(SelectorKey::Activate))
        }
        _ => None,
    }
}

impl App {
    /// Handle keyboard-related messages
    pub fn handle_keyboard(&mut self, message: &Message) -> Option<Task<Message>> {
        let Message::KeyPressed(key, modifiers) = message else {
            return None;
        };

        let Some(action) = key_action(key, *modifiers) else {
            return Some(Task::none());
        };

        if action == KeyAction::Cleanup {
            return Some(self.update(Message::CleanupRotator));
        }

        let Some(rotator) = self.rotator.as_mut() else {
            return Some(Task::none());
        };

        match action {
            KeyAction::MoveFocus(step) => rotator.surface_mut().cycle_focus(step),
            KeyAction::Selector(selector_key) => {
                let Some(index) = rotator.surface().keyboard_target() else {
                    return Some(Task::none());
                };
                if let Some(target) = rotator.key(index, selector_key) {
                    self.core.analytics.track(
                        "quote_selected",
                        payload([("index", json!(target)), ("source", json!("keyboard"))]),
                    );
                }
            }
            KeyAction::Cleanup => {}
        }

        Some(Task::none())
    }
}
