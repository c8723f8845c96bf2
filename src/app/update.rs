//! Message update handlers - thin dispatcher delegating to submodules

mod keyboard;
mod rotator;
mod window;

use iced::Task;

use super::{App, Message};

impl App {
    /// Handle messages by delegating to appropriate submodule handlers
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.dispatch(&message);
        // Timers scheduled while handling the message start now
        Task::batch([task, self.drain_timers()])
    }

    fn dispatch(&mut self, message: &Message) -> Task<Message> {
        // Try each handler in order until one handles the message
        if let Some(task) = self.handle_rotator(message) {
            return task;
        }
        if let Some(task) = self.handle_keyboard(message) {
            return task;
        }
        if let Some(task) = self.handle_window(message) {
            return task;
        }

        // Default: no task
        Task::none()
    }
}
