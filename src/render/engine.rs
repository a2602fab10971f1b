//! Engine boundary.
//!
//! This module defines the `FrameEngine` trait the dispatch loop delivers batches to. The
//! simulation/render engine behind it is external; the loop only knows this per-frame entry
//! point.

use crate::error::Result;
use crate::input::NormalizedEvent;

/// Core trait for the external engine's per-frame entry point
pub trait FrameEngine {
    /// Consume the ordered batch of events for the elapsed frame.
    ///
    /// Called at most once per refresh tick. An empty batch is a normal idle frame.
    /// Returning an error does not stop the loop; the failure is logged and the next tick
    /// is scheduled as usual.
    fn run_frame(&mut self, events: Vec<NormalizedEvent>) -> Result<()>;
}

impl<E: FrameEngine + ?Sized> FrameEngine for Box<E> {
    fn run_frame(&mut self, events: Vec<NormalizedEvent>) -> Result<()> {
        (**self).run_frame(events)
    }
}
