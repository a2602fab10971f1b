//! Input subsystem.
//!
//! Raw device notifications come in through [`raw`], get normalized into
//! [`NormalizedEvent`]s by [`normalizer`], and wait in the frame buffer until the next tick.

pub mod event;
pub mod normalizer;
pub mod raw;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use event::{MouseButton, NormalizedEvent, PointerButtons};
pub use normalizer::{normalize, EventNormalizer, InputState, PointerState, WheelState};
pub use raw::{RawDeviceEvent, TerminalSignal, TerminalTranslator, WHEEL_NOTCH_DELTA};
