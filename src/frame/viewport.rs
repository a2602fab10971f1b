//! Viewport monitoring.
//!
//! The viewport size is polled once per frame rather than pushed; a change since the last poll
//! turns into a single `ViewportResize` event appended at the end of that frame's batch.

use crate::input::NormalizedEvent;
use parking_lot::Mutex;
use std::sync::Arc;

/// Used when neither the caller nor the host provides an initial size.
pub const DEFAULT_VIEWPORT: ViewportSize = ViewportSize {
    width: 800,
    height: 600,
};

/// Width and height of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        DEFAULT_VIEWPORT
    }
}

/// Anything that can report the live viewport size synchronously.
pub trait ViewportSource {
    fn current_size(&self) -> ViewportSize;
}

/// A fixed size, for hosts that never resize.
impl ViewportSource for ViewportSize {
    fn current_size(&self) -> ViewportSize {
        *self
    }
}

/// Viewport size written by the input thread and read by the dispatch loop.
#[derive(Debug, Clone)]
pub struct SharedViewport {
    inner: Arc<Mutex<ViewportSize>>,
}

impl SharedViewport {
    pub fn new(size: ViewportSize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(size)),
        }
    }

    pub fn set(&self, size: ViewportSize) {
        *self.inner.lock() = size;
    }
}

impl ViewportSource for SharedViewport {
    fn current_size(&self) -> ViewportSize {
        *self.inner.lock()
    }
}

/// Last size reported to the engine.
pub type ViewportState = ViewportSize;

/// Compares the live size against the last recorded one.
#[derive(Debug, Clone)]
pub struct ViewportMonitor {
    state: ViewportState,
}

impl ViewportMonitor {
    pub fn new(initial: ViewportSize) -> Self {
        Self { state: initial }
    }

    /// Return a resize event carrying the new size if it differs from the recorded one.
    pub fn poll(&mut self, current_width: u32, current_height: u32) -> Option<NormalizedEvent> {
        let current = ViewportSize::new(current_width, current_height);
        if current == self.state {
            return None;
        }

        self.state = current;
        Some(NormalizedEvent::ViewportResize {
            width: current_width,
            height: current_height,
        })
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_size_produces_nothing() {
        let mut monitor = ViewportMonitor::new(ViewportSize::new(800, 600));
        for _ in 0..5 {
            assert_eq!(monitor.poll(800, 600), None);
        }
    }

    #[test]
    fn resize_is_reported_exactly_once() {
        let mut monitor = ViewportMonitor::new(ViewportSize::new(800, 600));

        assert_eq!(
            monitor.poll(1024, 768),
            Some(NormalizedEvent::ViewportResize {
                width: 1024,
                height: 768
            })
        );
        assert_eq!(monitor.state(), ViewportSize::new(1024, 768));
        assert_eq!(monitor.poll(1024, 768), None);
    }

    #[test]
    fn zero_sized_viewport_is_not_rejected() {
        let mut monitor = ViewportMonitor::new(DEFAULT_VIEWPORT);
        assert_eq!(
            monitor.poll(0, 0),
            Some(NormalizedEvent::ViewportResize {
                width: 0,
                height: 0
            })
        );
    }

    #[test]
    fn shared_viewport_reflects_latest_write() {
        let shared = SharedViewport::new(ViewportSize::new(80, 24));
        let reader = shared.clone();
        shared.set(ViewportSize::new(100, 30));
        assert_eq!(reader.current_size(), ViewportSize::new(100, 30));
    }

    #[test]
    fn default_viewport_is_800_by_600() {
        assert_eq!(ViewportSize::default(), ViewportSize::new(800, 600));
    }
}
