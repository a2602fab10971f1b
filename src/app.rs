//! Application orchestration layer
//!
//! Wires the terminal host to the dispatch loop: resolves the starting viewport, starts the HUD
//! engine, spawns the input thread, and runs the loop until quit or the frame cap.

pub mod runtime;

use crate::config::LoopConfig;
use crate::error::Result;
use crate::frame::{SharedViewport, ViewportSize};
use crate::render::ui::TerminalEngine;
use crate::render::{run_dispatch_loop, FrameDispatcher, LoopSummary};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Application orchestrator
pub struct Application {
    config: LoopConfig,
}

impl Application {
    pub fn new(config: LoopConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Explicit configuration wins, then the live terminal size. `None` lets the dispatcher
    /// fall back to its default.
    fn resolve_viewport(&self) -> Option<ViewportSize> {
        self.config.initial_viewport.or_else(|| {
            match ratatui::crossterm::terminal::size() {
                Ok((width, height)) => Some(ViewportSize::new(u32::from(width), u32::from(height))),
                Err(err) => {
                    warn!("could not query terminal size: {err}");
                    None
                }
            }
        })
    }

    /// Run until the user quits or `max_frames` is reached.
    pub async fn run(&mut self) -> Result<LoopSummary> {
        let mouse_capture = self.config.mouse_capture;
        let mut dispatcher = FrameDispatcher::init(self.resolve_viewport(), |viewport| {
            TerminalEngine::start(viewport, mouse_capture)
        })?;

        let viewport = SharedViewport::new(dispatcher.viewport());
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (quit_tx, quit_rx) = watch::channel(false);
        let shutdown = Arc::new(AtomicBool::new(false));

        let input_thread = runtime::spawn_input_thread(
            event_tx,
            viewport.clone(),
            quit_tx,
            Arc::clone(&shutdown),
            self.config.input_poll_interval(),
        );

        let summary = run_dispatch_loop(
            &mut dispatcher,
            event_rx,
            &viewport,
            self.config.loop_options(),
            quit_rx,
        )
        .await;

        shutdown.store(true, Ordering::SeqCst);
        if input_thread.join().is_err() {
            warn!("input thread panicked");
        }

        dispatcher.engine_mut().cleanup()?;
        info!(
            "exited after {} frames, {} failed deliveries",
            summary.frames,
            dispatcher.failed_deliveries()
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FramefeedError;

    #[test]
    fn rejects_invalid_config() {
        let config = LoopConfig {
            refresh_rate_hz: 0,
            ..LoopConfig::default()
        };
        assert!(matches!(
            Application::new(config),
            Err(FramefeedError::ConfigError { .. })
        ));
    }

    #[test]
    fn configured_viewport_takes_precedence() {
        let config = LoopConfig {
            initial_viewport: Some(ViewportSize::new(320, 200)),
            ..LoopConfig::default()
        };
        let app = Application::new(config).unwrap();
        assert_eq!(app.resolve_viewport(), Some(ViewportSize::new(320, 200)));
        assert_eq!(app.config().refresh_rate_hz, 60);
    }
}
