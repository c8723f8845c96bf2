//! Row of selector dots, one per item

use iced::widget::{Row, Space, button};
use iced::{Alignment, Element};

use crate::ui::theme;

const DOT_SIZE: f32 = 10.0;
const DOT_SPACING: f32 = 10.0;

/// Build the dot row. `on_select` maps a dot index to the press message.
pub fn view<'a, Message: Clone + 'a>(
    count: usize,
    active: Option<usize>,
    focused: Option<usize>,
    on_select: impl Fn(usize) -> Message,
) -> Element<'a, Message> {
    let dots = (0..count).map(|index| {
        let is_active = active == Some(index);
        let is_focused = focused == Some(index);
        button(Space::new().width(DOT_SIZE).height(DOT_SIZE))
            .padding(0)
            .on_press(on_select(index))
            .style(move |theme, status| theme::selector_dot(theme, status, is_active, is_focused))
            .into()
    });

    Row::with_children(dots)
        .spacing(DOT_SPACING)
        .align_y(Alignment::Center)
        .into()
}
