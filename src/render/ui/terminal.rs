//! Terminal HUD engine using ratatui
//!
//! A concrete `FrameEngine` for the binary: it folds every delivered batch into a `HudState`
//! and redraws the terminal once per frame. Until `initialize` is called it only keeps state,
//! which is what the tests rely on.

use crate::error::{FramefeedError, Result};
use crate::frame::ViewportSize;
use crate::input::{MouseButton, NormalizedEvent};
use crate::render::engine::FrameEngine;
use crate::render::ui::state::HudState;
use crate::render::ui::theme::ColorTheme;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal engine with ratatui backend
pub struct TerminalEngine {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
    hud: HudState,
    mouse_capture: bool,
    raw_enabled: bool,
    screen_entered: bool,
}

impl TerminalEngine {
    pub fn new(viewport: ViewportSize) -> Self {
        Self::with_theme(viewport, ColorTheme::default())
    }

    pub fn with_theme(viewport: ViewportSize, theme: ColorTheme) -> Self {
        Self {
            terminal: None,
            theme,
            hud: HudState::new(viewport),
            mouse_capture: true,
            raw_enabled: false,
            screen_entered: false,
        }
    }

    /// Startup routine handed to `FrameDispatcher::init`.
    pub fn start(viewport: ViewportSize, mouse_capture: bool) -> Result<Self> {
        let mut engine = Self::new(viewport);
        engine.mouse_capture = mouse_capture;
        engine.initialize()?;
        Ok(engine)
    }

    /// Enter raw mode and the alternate screen, optionally capturing the mouse
    ///
    /// On failure whatever was already switched on is restored before the error is returned.
    pub fn initialize(&mut self) -> Result<()> {
        enable_raw_mode().map_err(|err| FramefeedError::io("enable raw mode", err))?;
        self.raw_enabled = true;

        if let Err(err) = self.enter_screen() {
            let _ = self.cleanup();
            return Err(err);
        }
        Ok(())
    }

    fn enter_screen(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        self.screen_entered = true;
        if self.mouse_capture {
            execute!(stdout, EnableMouseCapture)?;
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    /// Restore the terminal
    pub fn cleanup(&mut self) -> Result<()> {
        self.terminal = None;
        if self.raw_enabled {
            self.raw_enabled = false;
            disable_raw_mode()?;
        }
        if self.screen_entered {
            self.screen_entered = false;
            if self.mouse_capture {
                execute!(io::stdout(), DisableMouseCapture)?;
            }
            execute!(io::stdout(), LeaveAlternateScreen)?;
        }
        Ok(())
    }

    pub fn hud(&self) -> &HudState {
        &self.hud
    }

    fn draw(&mut self) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let hud = &self.hud;
            let theme = &self.theme;
            terminal.draw(|frame| Self::render_hud(frame, hud, theme))?;
        }
        Ok(())
    }

    fn render_hud(frame: &mut Frame, hud: &HudState, theme: &ColorTheme) {
        let size = frame.size();

        // Split screen: panels and status line
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(size);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(rows[0]);

        Self::render_input_panel(frame, columns[0], hud, theme);
        Self::render_log_panel(frame, columns[1], hud, theme);
        Self::render_status(frame, rows[1], hud, theme);

        // Pointer marker at the last reported cell, if it is on screen
        if let Some((x, y)) = hud.pointer {
            let on_screen = x >= 0
                && y >= 0
                && (x as u32) < u32::from(size.width)
                && (y as u32) < u32::from(size.height);
            if on_screen {
                let cell = Rect::new(x as u16, y as u16, 1, 1);
                frame.render_widget(Paragraph::new("+").style(theme.pointer_marker), cell);
            }
        }
    }

    fn render_input_panel(frame: &mut Frame, area: Rect, hud: &HudState, theme: &ColorTheme) {
        let field = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("{label:<10}"), theme.label),
                Span::styled(value, theme.value),
            ])
        };

        let pointer = hud
            .pointer
            .map_or_else(|| "-".to_string(), |(x, y)| format!("({x}, {y})"));
        let buttons: Vec<Span> = [MouseButton::Left, MouseButton::Middle, MouseButton::Right]
            .into_iter()
            .map(|button| {
                let label = format!(" {button:?} ");
                if hud.buttons.contains(button) {
                    Span::styled(label, theme.button_held)
                } else {
                    Span::styled(label, theme.value)
                }
            })
            .collect();

        let mut lines = vec![
            field("pointer", pointer),
            field(
                "delta",
                format!("({}, {})", hud.last_delta.0, hud.last_delta.1),
            ),
            Line::from(
                std::iter::once(Span::styled(format!("{:<10}", "buttons"), theme.label))
                    .chain(buttons)
                    .collect::<Vec<_>>(),
            ),
            field("wheel", hud.wheel_total.to_string()),
            field(
                "key",
                hud.last_key.clone().unwrap_or_else(|| "-".to_string()),
            ),
            field(
                "viewport",
                format!("{}x{}", hud.viewport.width, hud.viewport.height),
            ),
            Line::from(""),
        ];
        lines.extend(
            hud.counts
                .iter()
                .map(|(kind, count)| field(*kind, count.to_string())),
        );

        let block = Block::default()
            .title(" input ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_log_panel(frame: &mut Frame, area: Rect, hud: &HudState, theme: &ColorTheme) {
        let lines: Vec<Line> = hud
            .recent
            .iter()
            .map(|entry| Line::from(Span::styled(entry.as_str(), theme.value)))
            .collect();

        let block = Block::default()
            .title(" recent events ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status(frame: &mut Frame, area: Rect, hud: &HudState, theme: &ColorTheme) {
        let status_text = format!(
            "frame {} | last batch {} | Esc or Ctrl-C to quit",
            hud.frames, hud.last_batch_len
        );
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        frame.render_widget(Paragraph::new(status_text).style(status_style), area);
    }
}

impl FrameEngine for TerminalEngine {
    fn run_frame(&mut self, events: Vec<NormalizedEvent>) -> Result<()> {
        self.hud.apply_batch(&events);
        let frame = self.hud.frames;
        self.draw()
            .map_err(|err| FramefeedError::delivery(frame, err.to_string()))
    }
}

impl Drop for TerminalEngine {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButtons;
    use ratatui::style::Color;

    #[test]
    fn test_engine_creation() {
        let engine = TerminalEngine::new(ViewportSize::new(80, 24));
        assert!(engine.terminal.is_none());
        assert_eq!(engine.hud().viewport, ViewportSize::new(80, 24));
        assert_eq!(engine.theme.status_bg, Color::Blue);

        let mono = TerminalEngine::with_theme(ViewportSize::new(80, 24), ColorTheme::monochrome());
        assert_eq!(mono.theme.status_bg, Color::Black);
    }

    #[test]
    fn test_run_frame_without_terminal_updates_hud() {
        let mut engine = TerminalEngine::new(ViewportSize::new(80, 24));
        engine
            .run_frame(vec![NormalizedEvent::MouseDown {
                x: 2,
                y: 3,
                buttons: PointerButtons::from_bits(1),
            }])
            .unwrap();
        engine.run_frame(Vec::new()).unwrap();

        assert_eq!(engine.hud().frames, 2);
        assert_eq!(engine.hud().pointer, Some((2, 3)));
        assert!(engine.hud().buttons.contains(MouseButton::Left));
    }

    #[test]
    fn test_cleanup_without_initialize_is_noop() {
        let mut engine = TerminalEngine::new(ViewportSize::new(80, 24));
        assert!(engine.cleanup().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_cleanup_restores_raw_mode_without_screen() {
        // State left behind when raw mode was enabled but entering the screen failed.
        let mut engine = TerminalEngine::new(ViewportSize::new(80, 24));
        engine.raw_enabled = true;

        assert!(engine.cleanup().is_ok());
        assert!(!engine.raw_enabled);
        assert!(!engine.screen_entered);
        assert!(engine.terminal.is_none());
    }
}
