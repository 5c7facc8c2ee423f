//! Color theme for the picker overlay

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the overlay
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the highlighted row
    pub highlight_bg: Color,
    /// Foreground color for the highlighted row
    pub highlight_fg: Color,
    /// Color for term and modifier identifiers
    pub identifier: Color,
    /// Color for borders
    pub border: Color,
    /// Color for descriptions, hints, and other dimmed text
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            highlight_bg: Color::Blue,
            highlight_fg: Color::White,
            identifier: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Style for the highlighted row
    #[must_use]
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .fg(self.highlight_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for unhighlighted rows
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for identifiers
    #[must_use]
    pub fn identifier_style(&self) -> Style {
        Style::default()
            .fg(self.identifier)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for descriptions and hint text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}
