//! Per-frame collection: the pending event buffer and the polled viewport monitor.

pub mod buffer;
pub mod viewport;

pub use buffer::FrameEventBuffer;
pub use viewport::{
    SharedViewport, ViewportMonitor, ViewportSize, ViewportSource, ViewportState, DEFAULT_VIEWPORT,
};
