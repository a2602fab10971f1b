//! Terminal HUD engine.
//!
//! This module hosts the ratatui-backed engine the binary delivers frames to, along with its
//! state and styling.

pub mod state;
pub mod terminal;
pub mod theme;

pub use state::HudState;
pub use terminal::TerminalEngine;
pub use theme::ColorTheme;

pub use ratatui::style::{Color, Style};
