//! Theme system for TUI colors and styles
//!
//! Colors match the CLI output in `display.rs`.

use iocraft::prelude::Color;

use crate::types::Difficulty;

const GRAY: Color = Color::Rgb {
    r: 120,
    g: 120,
    b: 120,
};

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Difficulty colors
    pub difficulty_beginner: Color,
    pub difficulty_intermediate: Color,
    pub difficulty_advanced: Color,

    // Card markers
    pub liked: Color,
    pub closed: Color,
    pub capacity: Color,
    pub tag: Color,
    pub pending: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub tab_active: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            difficulty_beginner: Color::Green,
            difficulty_intermediate: Color::Yellow,
            difficulty_advanced: Color::Red,

            liked: Color::Red,
            closed: GRAY,
            capacity: Color::Cyan,
            tag: Color::Magenta,
            pending: Color::Yellow,

            border: GRAY,
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: GRAY,
            highlight: Color::Blue,
            tab_active: Color::Cyan,
        }
    }
}

impl Theme {
    pub fn difficulty_color(&self, difficulty: Difficulty) -> Color {
        match difficulty {
            Difficulty::Beginner => self.difficulty_beginner,
            Difficulty::Intermediate => self.difficulty_intermediate,
            Difficulty::Advanced => self.difficulty_advanced,
        }
    }

    /// Color for a difficulty shown by its label on a card.
    pub fn difficulty_label_color(&self, label: &str) -> Color {
        label
            .parse::<Difficulty>()
            .map(|d| self.difficulty_color(d))
            .unwrap_or(self.text_dimmed)
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}
