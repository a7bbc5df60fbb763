//! Color theme and styling definitions using ratatui colors
//!
//! This module provides color themes for terminal rendering using ratatui's
//! color system directly to avoid unnecessary abstractions.

use crate::config::ThemeName;
use crate::waveform::store::DEFAULT_PALETTE;
use crate::waveform::DisplayColors;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Colors handed out to signals in the order they are enabled
    pub palette: Vec<Color>,

    /// Unknown and unrecognized values on waves
    pub error_text: Color,

    /// Timeline tick labels
    pub timeline: Color,

    /// Vertical cursor bar
    pub cursor: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Title of the focused list or pane
    pub focus: Style,

    /// Selected entry in the file and signal lists
    pub selection: Style,

    /// Directory entries in the file list
    pub directory: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            error_text: Color::LightRed,
            timeline: Color::Gray,
            cursor: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::Blue,
            status_fg: Color::White,
            focus: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            selection: Style::default().fg(Color::Black).bg(Color::Cyan),
            directory: Color::LightBlue,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            palette: vec![Color::White],
            error_text: Color::White,
            timeline: Color::White,
            cursor: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::Black,
            status_fg: Color::White,
            focus: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            selection: Style::default().add_modifier(Modifier::REVERSED),
            directory: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            palette: vec![
                Color::White,
                Color::LightYellow,
                Color::LightCyan,
                Color::LightGreen,
                Color::LightMagenta,
            ],
            error_text: Color::LightRed,
            timeline: Color::White,
            cursor: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::White,
            status_fg: Color::Black,
            focus: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            selection: Style::default().fg(Color::Black).bg(Color::LightYellow),
            directory: Color::LightCyan,
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self::default(),
            ThemeName::Monochrome => Self::monochrome(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Colors the waveform display draws with.
    pub fn display_colors(&self) -> DisplayColors {
        DisplayColors {
            error: self.error_text,
            timeline: self.timeline,
        }
    }
}
