//! Theme and Styling
//!
//! Colors and styles for the TUI interface, including one accent color
//! per analysis category.

use crate::models::Stage;
use ratatui::style::{Color, Modifier, Style};

/// Application theme
pub struct Theme;

impl Theme {
    // === Primary Colors ===

    /// Primary accent color (violet)
    pub const ACCENT: Color = Color::Rgb(167, 139, 250);

    /// Success (green)
    pub const SUCCESS: Color = Color::Rgb(52, 211, 153);

    /// Warning / in-progress (amber)
    pub const WARNING: Color = Color::Rgb(251, 191, 36);

    /// Error color (red)
    pub const ERROR: Color = Color::Rgb(248, 113, 113);

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(228, 228, 231);
    pub const TEXT_SECONDARY: Color = Color::Rgb(161, 161, 170);
    pub const TEXT_DIM: Color = Color::Rgb(82, 82, 91);

    // === Border Colors ===

    pub const BORDER: Color = Color::Rgb(63, 63, 70);
    pub const BORDER_FOCUSED: Color = Color::Rgb(129, 140, 248);

    // === Category Colors ===

    pub const MARKET: Color = Color::Rgb(96, 165, 250);
    pub const CLINICAL: Color = Color::Rgb(52, 211, 153);
    pub const PATENT: Color = Color::Rgb(251, 146, 60);
    pub const RESEARCH: Color = Color::Rgb(34, 211, 238);
    pub const SYNTHESIS: Color = Color::Rgb(167, 139, 250);

    // === Styles ===

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Active/in-progress indicator
    pub fn active() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    pub fn complete() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn pending() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    pub fn shortcut_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Section heading color for an analysis category.
    pub fn stage(stage: Stage) -> Style {
        let color = match stage {
            Stage::Market => Self::MARKET,
            Stage::Clinical => Self::CLINICAL,
            Stage::Patent => Self::PATENT,
            Stage::Research => Self::RESEARCH,
            Stage::Synthesis => Self::SYNTHESIS,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

/// Progress stage icons
pub struct Icons;

impl Icons {
    pub const COMPLETE: &'static str = "✓";
    pub const ACTIVE: &'static str = "●";
    pub const PENDING: &'static str = "○";
    pub const ERROR: &'static str = "✗";
    pub const ARROW: &'static str = "→";
    pub const SELECTED: &'static str = "▶";
    pub const DOT: &'static str = "•";
}
