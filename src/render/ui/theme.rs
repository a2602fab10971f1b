//! Color theme and styling definitions using ratatui colors
//!
//! This module provides color themes for the HUD using ratatui's color system directly to
//! avoid unnecessary abstractions.

use ratatui::style::{Color, Style};

/// Color theme for HUD elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Panel border color
    pub border: Color,

    /// Field labels ("pointer", "wheel", ...)
    pub label: Style,

    /// Field values
    pub value: Style,

    /// Marker drawn at the pointer position
    pub pointer_marker: Style,

    /// Held-button indicator
    pub button_held: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            label: Style::default().fg(Color::Cyan),
            value: Style::default().fg(Color::White),
            pointer_marker: Style::default().fg(Color::Black).bg(Color::Yellow),
            button_held: Style::default().fg(Color::Black).bg(Color::Green),
            status_bg: Color::Blue,
            status_fg: Color::White,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            border: Color::White,
            label: Style::default(),
            value: Style::default(),
            pointer_marker: Style::default().fg(Color::Black).bg(Color::White),
            button_held: Style::default().fg(Color::Black).bg(Color::White),
            status_bg: Color::Black,
            status_fg: Color::White,
        }
    }
}
