use crate::frame::SharedViewport;
use crate::input::{RawDeviceEvent, TerminalSignal, TerminalTranslator};
use log::{debug, error};
use ratatui::crossterm::event;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;

/// What the input thread should do after handling one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Forward {
    Continue,
    Stop,
}

/// Ask the dispatch loop to stop. Returns `false` if it had already gone away.
pub(crate) fn request_quit(quit: &watch::Sender<bool>) -> bool {
    if quit.send(true).is_err() {
        debug!("dispatch loop already stopped; quit request dropped");
        return false;
    }
    true
}

/// Route one translated signal to the place that consumes it.
///
/// Device notifications go onto the event channel. Resizes only update the shared viewport,
/// which the dispatch loop polls on its next tick. Quit flips the shutdown watch.
pub(crate) fn forward_signal(
    signal: TerminalSignal,
    tx: &UnboundedSender<RawDeviceEvent>,
    viewport: &SharedViewport,
    quit: &watch::Sender<bool>,
) -> Forward {
    match signal {
        TerminalSignal::Device(raw) => {
            if tx.send(raw).is_err() {
                debug!("dispatch loop gone; input thread stopping");
                return Forward::Stop;
            }
            Forward::Continue
        }
        TerminalSignal::Resize(size) => {
            viewport.set(size);
            Forward::Continue
        }
        TerminalSignal::Quit => {
            request_quit(quit);
            Forward::Stop
        }
        TerminalSignal::Ignored => Forward::Continue,
    }
}

/// Spawn a blocking thread that collects terminal input and forwards it to the dispatch loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<RawDeviceEvent>,
    viewport: SharedViewport,
    quit: watch::Sender<bool>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut translator = TerminalTranslator::new();
        while !shutdown.load(Ordering::SeqCst) {
            match event::poll(poll_interval) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    error!("input thread error: {err}");
                    request_quit(&quit);
                    break;
                }
            }

            let terminal_event = match event::read() {
                Ok(terminal_event) => terminal_event,
                Err(err) => {
                    error!("input thread error: {err}");
                    request_quit(&quit);
                    break;
                }
            };

            let signal = translator.translate(terminal_event, Instant::now());
            if forward_signal(signal, &tx, &viewport, &quit) == Forward::Stop {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ViewportSize, ViewportSource};
    use tokio::sync::mpsc;

    fn key(text: &str) -> TerminalSignal {
        TerminalSignal::Device(RawDeviceEvent::KeyPress {
            key: text.into(),
            at: Instant::now(),
        })
    }

    #[test]
    fn device_signals_reach_the_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (quit, _quit_rx) = watch::channel(false);
        let viewport = SharedViewport::new(ViewportSize::new(80, 24));

        assert_eq!(forward_signal(key("a"), &tx, &viewport, &quit), Forward::Continue);
        assert!(matches!(
            rx.try_recv(),
            Ok(RawDeviceEvent::KeyPress { ref key, .. }) if key == "a"
        ));
    }

    #[test]
    fn resize_updates_viewport_without_queueing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (quit, _quit_rx) = watch::channel(false);
        let viewport = SharedViewport::new(ViewportSize::new(80, 24));

        let signal = TerminalSignal::Resize(ViewportSize::new(120, 40));
        assert_eq!(forward_signal(signal, &tx, &viewport, &quit), Forward::Continue);
        assert_eq!(viewport.current_size(), ViewportSize::new(120, 40));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn quit_signals_shutdown_and_stops() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (quit, quit_rx) = watch::channel(false);
        let viewport = SharedViewport::new(ViewportSize::new(80, 24));

        assert_eq!(
            forward_signal(TerminalSignal::Quit, &tx, &viewport, &quit),
            Forward::Stop
        );
        assert!(*quit_rx.borrow());
        assert!(request_quit(&quit));
    }

    #[test]
    fn quit_after_loop_exit_still_stops() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (quit, quit_rx) = watch::channel(false);
        drop(quit_rx);
        let viewport = SharedViewport::new(ViewportSize::new(80, 24));

        assert!(!request_quit(&quit));
        assert_eq!(
            forward_signal(TerminalSignal::Quit, &tx, &viewport, &quit),
            Forward::Stop
        );
    }

    #[test]
    fn closed_channel_stops_thread() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let (quit, _quit_rx) = watch::channel(false);
        let viewport = SharedViewport::new(ViewportSize::new(80, 24));

        assert_eq!(forward_signal(key("q"), &tx, &viewport, &quit), Forward::Stop);
        assert_eq!(
            forward_signal(TerminalSignal::Ignored, &tx, &viewport, &quit),
            Forward::Continue
        );
    }
}
