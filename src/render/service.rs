//! Render dispatch loop.
//!
//! [`FrameDispatcher`] owns every piece of per-frame state (normalizer, buffer, viewport
//! monitor) together with the engine handle, and runs the per-frame sequence.
//! [`run_dispatch_loop`] drives it from a single task: device notifications and refresh ticks
//! are handled one at a time inside one `select!`, so no two handlers ever overlap.

use crate::error::Result;
use crate::frame::{
    FrameEventBuffer, ViewportMonitor, ViewportSize, ViewportSource, DEFAULT_VIEWPORT,
};
use crate::input::{EventNormalizer, NormalizedEvent, RawDeviceEvent};
use crate::render::engine::FrameEngine;
use log::{debug, info, trace, warn};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::watch;

/// Where the loop is in its two-state cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Idle,
    Dispatching,
}

/// Outcome of one dispatched frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Zero-based frame number.
    pub frame: u64,
    /// Number of events handed to the engine, resize included.
    pub events: usize,
    pub resized: Option<ViewportSize>,
    pub delivered: bool,
}

/// Per-frame state plus the engine handle.
pub struct FrameDispatcher<E> {
    normalizer: EventNormalizer,
    buffer: FrameEventBuffer,
    viewport: ViewportMonitor,
    engine: E,
    phase: LoopPhase,
    frames: u64,
    failed_deliveries: u64,
}

impl<E: FrameEngine> FrameDispatcher<E> {
    /// Resolve the initial viewport, start the engine with it, and return the handle.
    ///
    /// `None` falls back to [`DEFAULT_VIEWPORT`]. The resolved size seeds the viewport monitor,
    /// so the first frame only reports a resize if the live size differs from it.
    pub fn init<F>(initial: Option<ViewportSize>, start: F) -> Result<Self>
    where
        F: FnOnce(ViewportSize) -> Result<E>,
    {
        let viewport = initial.unwrap_or(DEFAULT_VIEWPORT);
        let engine = start(viewport)?;
        info!(
            "engine started with viewport {}x{}",
            viewport.width, viewport.height
        );
        Ok(Self::with_engine(engine, viewport))
    }

    pub fn with_engine(engine: E, viewport: ViewportSize) -> Self {
        Self {
            normalizer: EventNormalizer::new(Instant::now()),
            buffer: FrameEventBuffer::new(),
            viewport: ViewportMonitor::new(viewport),
            engine,
            phase: LoopPhase::Idle,
            frames: 0,
            failed_deliveries: 0,
        }
    }

    /// Normalize one device notification and queue it for the next frame.
    pub fn handle_device_event(&mut self, raw: RawDeviceEvent) {
        debug_assert_eq!(self.phase, LoopPhase::Idle);
        let event = self.normalizer.normalize(raw);
        trace!("queued {}", event.kind());
        self.buffer.append(event);
    }

    /// Run the per-frame sequence: poll viewport, drain, deliver, return to idle.
    pub fn dispatch_frame(&mut self, current: ViewportSize) -> FrameReport {
        self.phase = LoopPhase::Dispatching;
        let frame = self.frames;

        let resized = self
            .viewport
            .poll(current.width, current.height)
            .map(|event| {
                self.buffer.append(event);
                current
            });

        let batch = self.buffer.drain();
        let events = batch.len();

        let delivered = match self.engine.run_frame(batch) {
            Ok(()) => true,
            Err(err) => {
                self.failed_deliveries += 1;
                warn!("frame {frame}: delivery of {events} events failed: {err}");
                false
            }
        };

        self.frames += 1;
        self.phase = LoopPhase::Idle;

        FrameReport {
            frame,
            events,
            resized,
            delivered,
        }
    }

    /// Forget pointer position and restart the input clocks.
    pub fn reset_input(&mut self, now: Instant) {
        self.normalizer.reset(now);
    }

    /// Drop whatever was buffered but never delivered, returning how many events were lost.
    pub fn discard_pending(&mut self) -> usize {
        let discarded = self.buffer.drain().len();
        if discarded > 0 {
            debug!("discarding {discarded} undelivered events");
        }
        discarded
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn failed_deliveries(&self) -> u64 {
        self.failed_deliveries
    }

    pub fn pending(&self) -> &[NormalizedEvent] {
        self.buffer.pending()
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport.state()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

/// Loop timing parameters.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub refresh_interval: Duration,
    pub max_frames: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_micros(16_667),
            max_frames: None,
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Shutdown,
    FrameLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub exit: LoopExit,
    pub frames: u64,
    pub discarded: usize,
}

/// Normalize the notifications queued right now, without waiting for more.
///
/// Only the messages present on entry are taken, so a producer that keeps the channel full
/// cannot hold the caller here. Closure is left for `recv` to report. Returns how many were
/// taken.
fn drain_queued<E: FrameEngine>(
    dispatcher: &mut FrameDispatcher<E>,
    events: &mut UnboundedReceiver<RawDeviceEvent>,
) -> usize {
    let queued = events.len();
    for taken in 0..queued {
        match events.try_recv() {
            Ok(raw) => dispatcher.handle_device_event(raw),
            Err(_) => return taken,
        }
    }
    queued
}

/// Drive `dispatcher` until shutdown is signalled (or the shutdown sender goes away) or the
/// frame cap is reached.
///
/// The tick is polled ahead of device notifications so a busy channel never delays a frame.
/// When it fires, notifications already queued are normalized first, so they belong to that
/// frame. The tick is a one-shot timer re-armed after every dispatch; stopping the loop
/// simply never re-arms it.
pub async fn run_dispatch_loop<E, V>(
    dispatcher: &mut FrameDispatcher<E>,
    mut events: UnboundedReceiver<RawDeviceEvent>,
    viewport: &V,
    options: LoopOptions,
    mut shutdown: watch::Receiver<bool>,
) -> LoopSummary
where
    E: FrameEngine,
    V: ViewportSource + ?Sized,
{
    info!(
        "dispatch loop running every {:?}",
        options.refresh_interval
    );

    let tick = tokio::time::sleep(options.refresh_interval);
    tokio::pin!(tick);
    let mut events_open = true;

    let exit = loop {
        tokio::select! {
            biased;

            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break LoopExit::Shutdown;
                }
            }

            () = &mut tick => {
                if events_open {
                    drain_queued(dispatcher, &mut events);
                }

                let report = dispatcher.dispatch_frame(viewport.current_size());
                trace!("frame {} delivered {} events", report.frame, report.events);

                if options
                    .max_frames
                    .is_some_and(|max| dispatcher.frames() >= max)
                {
                    break LoopExit::FrameLimit;
                }

                tick.as_mut()
                    .reset(tokio::time::Instant::now() + options.refresh_interval);
            }

            raw = events.recv(), if events_open => match raw {
                Some(raw) => dispatcher.handle_device_event(raw),
                None => {
                    debug!("device event source closed");
                    events_open = false;
                }
            },
        }
    };

    let discarded = dispatcher.discard_pending();
    info!(
        "dispatch loop stopped after {} frames ({:?})",
        dispatcher.frames(),
        exit
    );

    LoopSummary {
        exit,
        frames: dispatcher.frames(),
        discarded,
    }
}
