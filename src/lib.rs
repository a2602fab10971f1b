//! # framefeed - Frame-Synchronized Input Dispatch
//!
//! Collects raw pointer, wheel and keyboard notifications as they arrive, normalizes them into
//! engine-ready events, and hands each refresh tick's events to an external simulation/render
//! engine as one ordered batch.
//!
//! ## Features
//!
//! - **Normalization**: Pointer deltas and inter-event timing computed on arrival
//! - **Frame Batching**: Events buffered between ticks and delivered exactly once, in order
//! - **Viewport Monitoring**: Size changes detected by polling and appended to the batch
//! - **Terminal Host**: A ratatui HUD engine driven by crossterm input
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`input`] - Raw device notifications and the normalizer
//! - [`frame`] - The pending event buffer and viewport monitor
//! - [`render`] - Engine boundary, dispatch loop and the terminal HUD engine
//! - [`config`] - Loop configuration
//! - [`app`] - Application core and component coordination

// Core modules
pub mod config;
pub mod error;

pub mod frame;
pub mod input;
pub mod render;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{FramefeedError, Result};

// Public API surface for external usage
pub use app::Application;
pub use config::LoopConfig;
pub use frame::{SharedViewport, ViewportSize, ViewportSource};
pub use input::{NormalizedEvent, PointerButtons, RawDeviceEvent};
pub use render::{run_dispatch_loop, FrameDispatcher, FrameEngine, LoopOptions, LoopSummary};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
