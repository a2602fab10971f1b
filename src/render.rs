//! Rendering subsystem.
//!
//! Holds the engine boundary, the per-frame dispatch loop, and a terminal HUD engine used by
//! the binary.

pub mod engine;
pub mod service;
pub mod ui;

pub use engine::FrameEngine;
pub use service::{
    run_dispatch_loop, FrameDispatcher, FrameReport, LoopExit, LoopOptions, LoopPhase, LoopSummary,
};
