//! Rotating quote card component
//!
//! Holds the rendered state the rotator writes into and builds the card view
//! with fade animation, loading hint and selector dots.

use iced::animation::Animation;
use iced::time::Instant;
use iced::widget::{Space, column, container, mouse_area, text};
use iced::{Alignment, Element, Fill, Padding};
use std::time::Duration;

use crate::app::Message;
use crate::features::Quote;
use crate::features::rotator::{Fade, MissingElement, QuoteSurface, SurfaceLayout};
use crate::ui::theme;
use crate::ui::widgets::selector_dots;

/// Vertical offset of the quote block while fully faded out
const FADE_SHIFT: f32 = 10.0;
const QUOTE_SIZE: f32 = 22.0;
const AUTHOR_SIZE: f32 = 15.0;
const CARD_MAX_WIDTH: f32 = 720.0;

/// Card state driven by the rotator
#[derive(Debug)]
pub struct QuoteCard {
    text: String,
    author: String,
    selectors: usize,
    active: Option<usize>,
    focused: Option<usize>,
    loading: bool,
    /// `true` = fully visible
    visibility: Animation<bool>,
    fade_duration: Duration,
}

impl QuoteCard {
    pub fn new(selectors: usize, fade_duration: Duration) -> Self {
        Self {
            text: String::new(),
            author: String::new(),
            selectors,
            active: None,
            focused: None,
            loading: false,
            visibility: Animation::new(true).duration(fade_duration),
            fade_duration,
        }
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[cfg(test)]
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Selector keyboard input applies to; falls back to the active dot
    pub fn keyboard_target(&self) -> Option<usize> {
        self.focused.or(self.active)
    }

    /// Move focus by `step` selectors, wrapping around
    pub fn cycle_focus(&mut self, step: isize) {
        if self.selectors == 0 {
            return;
        }
        let len = self.selectors as isize;
        let from = self.keyboard_target().unwrap_or(0) as isize;
        self.focused = Some((from + step).rem_euclid(len) as usize);
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.visibility.is_animating(now)
    }

    /// 0.0 = faded out, 1.0 = fully visible
    pub fn opacity(&self, now: Instant) -> f32 {
        self.visibility.interpolate(0.0_f32, 1.0_f32, now)
    }
}

impl QuoteSurface for QuoteCard {
    fn probe(&self) -> Result<SurfaceLayout, MissingElement> {
        if self.selectors == 0 {
            return Err(MissingElement("quote selectors"));
        }
        Ok(SurfaceLayout {
            selectors: self.selectors,
            has_loading_indicator: true,
        })
    }

    fn show_quote(&mut self, quote: &Quote) {
        self.text = quote.display_text();
        self.author = quote.display_author();
    }

    fn set_fade(&mut self, fade: Fade) {
        let now = Instant::now();
        match fade {
            Fade::Out => self.visibility.go_mut(false, now),
            Fade::In => self.visibility.go_mut(true, now),
        }
    }

    fn snap_visible(&mut self) {
        self.visibility = Animation::new(true).duration(self.fade_duration);
    }

    fn set_active_selector(&mut self, index: usize) {
        self.active = Some(index);
    }

    fn focus_selector(&mut self, index: usize) {
        self.focused = Some(index);
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }
}

/// Build the quote card
pub fn view(card: &QuoteCard, now: Instant) -> Element<'_, Message> {
    let opacity = card.opacity(now);

    let quote = text(card.text.as_str())
        .size(QUOTE_SIZE)
        .style(move |theme| text::Style {
            color: Some(theme::with_alpha(theme::text_primary(theme), opacity)),
        });

    let author = text(card.author.as_str())
        .size(AUTHOR_SIZE)
        .style(move |theme| text::Style {
            color: Some(theme::with_alpha(theme::text_secondary(theme), opacity)),
        });

    let loading = text(if card.is_loading() { "…" } else { " " })
        .size(AUTHOR_SIZE)
        .style(|theme| text::Style {
            color: Some(theme::text_muted(theme)),
        });

    let block = column![
        Space::new().height((1.0 - opacity) * FADE_SHIFT),
        quote,
        Space::new().height(16),
        author,
        loading,
    ]
    .align_x(Alignment::Center)
    .width(Fill);

    let dots = selector_dots::view(
        card.selectors,
        card.active,
        card.focused,
        Message::SelectorClicked,
    );

    let content = column![block, Space::new().height(24), dots]
        .align_x(Alignment::Center)
        .max_width(CARD_MAX_WIDTH);

    let card_container = container(content)
        .padding(Padding::new(32.0))
        .style(theme::quote_card);

    mouse_area(card_container)
        .on_enter(Message::PointerEntered)
        .on_exit(Message::PointerLeft)
        .into()
}

/// Shown when the rotator could not attach
pub fn view_unavailable<'a>() -> Element<'a, Message> {
    Space::new().width(0).height(0).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::quotes::catalogue;

    #[test]
    fn probe_reports_selectors() {
        let card = QuoteCard::new(6, Duration::from_millis(250));
        assert_eq!(
            card.probe(),
            Ok(SurfaceLayout {
                selectors: 6,
                has_loading_indicator: true
            })
        );
        assert_eq!(
            QuoteCard::new(0, Duration::from_millis(250)).probe(),
            Err(MissingElement("quote selectors"))
        );
    }

    #[test]
    fn show_quote_formats_text() {
        let mut card = QuoteCard::new(6, Duration::from_millis(250));
        card.show_quote(&catalogue()[2]);
        assert_eq!(
            card.text(),
            "\"Every next level will demand a different version of you.\""
        );
        assert_eq!(card.author(), "— Leonardo DiCaprio");
    }

    #[test]
    fn keyboard_target_prefers_focus() {
        let mut card = QuoteCard::new(6, Duration::from_millis(250));
        assert_eq!(card.keyboard_target(), None);
        card.set_active_selector(3);
        assert_eq!(card.keyboard_target(), Some(3));
        card.focus_selector(1);
        assert_eq!(card.keyboard_target(), Some(1));
    }

    #[test]
    fn cycle_focus_wraps() {
        let mut card = QuoteCard::new(6, Duration::from_millis(250));
        card.set_active_selector(5);
        card.cycle_focus(1);
        assert_eq!(card.focused(), Some(0));
        card.cycle_focus(-1);
        assert_eq!(card.focused(), Some(5));
    }

    #[test]
    fn snap_makes_card_visible() {
        let mut card = QuoteCard::new(6, Duration::from_millis(250));
        card.set_fade(Fade::Out);
        card.snap_visible();
        let now = Instant::now();
        assert!(!card.is_animating(now));
        assert_eq!(card.opacity(now), 1.0);
    }
}
