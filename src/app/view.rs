//! Application view rendering

use iced::time::Instant;
use iced::widget::container;
use iced::{Element, Fill};

use super::App;
use super::message::Message;
use crate::ui::{components, theme};

impl App {
    /// Build the view for a specific window
    pub fn view(&self, _window_id: iced::window::Id) -> Element<'_, Message> {
        let card = match &self.rotator {
            Some(rotator) => components::quote_card::view(rotator.surface(), Instant::now()),
            None => components::quote_card::view_unavailable(),
        };

        container(card)
            .center(Fill)
            .padding(32)
            .style(theme::page)
            .into()
    }
}
