//! Theme system for the quote card
//! Supports both dark and light modes with consistent color palette

use iced::color;
use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// ============================================================================
// Color Palette - Dynamic based on theme
// ============================================================================

/// Check if theme is dark mode
fn is_dark(theme: &Theme) -> bool {
    matches!(theme, Theme::Dark)
}

// Dark mode colors
mod dark {
    use super::*;
    pub const BACKGROUND: Color = color!(0x0b0b0f);
    pub const SURFACE: Color = color!(0x16161d);
    pub const BORDER: Color = color!(0x282832);
    pub const DOT_IDLE: Color = color!(0x4b5563);
    pub const DOT_HOVER: Color = color!(0x9ca3af);
    pub const TEXT_MUTED: Color = color!(0x888888);
    pub const TEXT_SECONDARY: Color = color!(0xb3b3b3);
    pub const TEXT_PRIMARY: Color = color!(0xffffff);
}

// Light mode colors
mod light {
    use super::*;
    pub const BACKGROUND: Color = color!(0xfafafa);
    pub const SURFACE: Color = color!(0xffffff);
    pub const BORDER: Color = color!(0xe5e7eb);
    pub const DOT_IDLE: Color = color!(0xd1d5db);
    pub const DOT_HOVER: Color = color!(0x9ca3af);
    pub const TEXT_MUTED: Color = color!(0x777777);
    pub const TEXT_SECONDARY: Color = color!(0x555555);
    pub const TEXT_PRIMARY: Color = color!(0x1a1a1a);
}

/// Active selector color (same for both modes)
pub const ACCENT: Color = color!(0x3b82f6);

/// Get background color based on theme
pub fn background(theme: &Theme) -> Color {
    if is_dark(theme) {
        dark::BACKGROUND
    } else {
        light::BACKGROUND
    }
}

/// Get surface color based on theme
pub fn surface(theme: &Theme) -> Color {
    if is_dark(theme) {
        dark::SURFACE
    } else {
        light::SURFACE
    }
}

/// Get border color based on theme
pub fn border_color(theme: &Theme) -> Color {
    if is_dark(theme) {
        dark::BORDER
    } else {
        light::BORDER
    }
}

/// Get muted text color based on theme
pub fn text_muted(theme: &Theme) -> Color {
    if is_dark(theme) {
        dark::TEXT_MUTED
    } else {
        light::TEXT_MUTED
    }
}

/// Get secondary text color based on theme
pub fn text_secondary(theme: &Theme) -> Color {
    if is_dark(theme) {
        dark::TEXT_SECONDARY
    } else {
        light::TEXT_SECONDARY
    }
}

/// Get primary text color based on theme
pub fn text_primary(theme: &Theme) -> Color {
    if is_dark(theme) {
        dark::TEXT_PRIMARY
    } else {
        light::TEXT_PRIMARY
    }
}

fn dot_idle(theme: &Theme) -> Color {
    if is_dark(theme) {
        dark::DOT_IDLE
    } else {
        light::DOT_IDLE
    }
}

fn dot_hover(theme: &Theme) -> Color {
    if is_dark(theme) {
        dark::DOT_HOVER
    } else {
        light::DOT_HOVER
    }
}

/// Scale a color's alpha by `alpha` (0.0 - 1.0)
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha.clamp(0.0, 1.0),
        ..color
    }
}

/// Shadow color based on theme
pub fn shadow_color(theme: &Theme) -> Color {
    if is_dark(theme) {
        Color::from_rgba(0.0, 0.0, 0.0, 0.5)
    } else {
        Color::from_rgba(0.0, 0.0, 0.0, 0.12)
    }
}

// ============================================================================
// Container Styles
// ============================================================================

/// Window background
pub fn page(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(background(theme))),
        ..Default::default()
    }
}

/// Quote card surface
pub fn quote_card(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(surface(theme))),
        border: Border {
            radius: 16.0.into(),
            width: 1.0,
            color: border_color(theme),
        },
        shadow: Shadow {
            color: shadow_color(theme),
            offset: Vector::new(0.0, 6.0),
            blur_radius: 20.0,
        },
        ..Default::default()
    }
}

// ============================================================================
// Button Styles
// ============================================================================

/// Selector dot: accent when active, ring when focused
pub fn selector_dot(
    theme: &Theme,
    status: button::Status,
    is_active: bool,
    is_focused: bool,
) -> button::Style {
    let fill = if is_active {
        ACCENT
    } else {
        match status {
            button::Status::Hovered | button::Status::Pressed => dot_hover(theme),
            _ => dot_idle(theme),
        }
    };

    let ring = if is_focused {
        Border {
            radius: 5.0.into(),
            width: 2.0,
            color: text_primary(theme),
        }
    } else {
        Border {
            radius: 5.0.into(),
            ..Default::default()
        }
    };

    button::Style {
        background: Some(Background::Color(fill)),
        text_color: Color::TRANSPARENT,
        border: ring,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_alpha_scales_and_clamps() {
        let c = with_alpha(Color::WHITE, 0.5);
        assert_eq!(c.a, 0.5);
        assert_eq!(with_alpha(Color::WHITE, 2.0).a, 1.0);
        assert_eq!(with_alpha(Color::WHITE, -1.0).a, 0.0);
    }

    #[test]
    fn palette_follows_app_theme() {
        assert!(is_dark(&Theme::Dark));
        assert!(!is_dark(&Theme::Light));
        assert_eq!(background(&Theme::Dark), dark::BACKGROUND);
        assert_eq!(background(&Theme::Light), light::BACKGROUND);
    }

    #[test]
    fn active_dot_uses_accent() {
        let style = selector_dot(&Theme::Dark, button::Status::Active, true, false);
        assert_eq!(style.background, Some(Background::Color(ACCENT)));
    }
}
