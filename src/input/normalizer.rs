//! Event normalization.
//!
//! Turns timestamped raw device notifications into [`NormalizedEvent`]s while keeping the
//! running pointer and wheel state needed for deltas. The state lives in [`InputState`] and is
//! passed in by reference, so [`normalize`] is a plain function of `(raw event, state)`.

use crate::input::event::NormalizedEvent;
use crate::input::raw::RawDeviceEvent;
use std::time::Instant;

/// Last known pointer position and the shared (non-wheel) event clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub last_x: Option<i32>,
    pub last_y: Option<i32>,
    pub last_event_time: Instant,
}

impl PointerState {
    pub fn new(now: Instant) -> Self {
        Self {
            last_x: None,
            last_y: None,
            last_event_time: now,
        }
    }
}

/// Clock for wheel deltas, independent of pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelState {
    pub last_wheel_time: Instant,
}

impl WheelState {
    pub fn new(now: Instant) -> Self {
        Self {
            last_wheel_time: now,
        }
    }
}

/// All running state the normalizer owns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    pub pointer: PointerState,
    pub wheel: WheelState,
}

impl InputState {
    pub fn new(now: Instant) -> Self {
        Self {
            pointer: PointerState::new(now),
            wheel: WheelState::new(now),
        }
    }
}

fn elapsed_ms(since: Instant, at: Instant) -> f64 {
    at.saturating_duration_since(since).as_secs_f64() * 1000.0
}

/// Produce exactly one normalized event for `raw`, updating `state` before returning.
pub fn normalize(raw: RawDeviceEvent, state: &mut InputState) -> NormalizedEvent {
    match raw {
        RawDeviceEvent::PointerMove { x, y, buttons, at } => {
            let pointer = &mut state.pointer;
            // First move after (re)initialization reports a zero delta. Deltas clamp at the i32
            // bounds rather than wrapping.
            let last_x = *pointer.last_x.get_or_insert(x);
            let last_y = *pointer.last_y.get_or_insert(y);

            let event = NormalizedEvent::MouseMove {
                x,
                y,
                delta_x: x.saturating_sub(last_x),
                delta_y: y.saturating_sub(last_y),
                delta_time_ms: elapsed_ms(pointer.last_event_time, at),
                buttons,
            };

            pointer.last_x = Some(x);
            pointer.last_y = Some(y);
            pointer.last_event_time = at;
            event
        }
        RawDeviceEvent::PointerDown { x, y, buttons, at } => {
            state.pointer.last_event_time = at;
            NormalizedEvent::MouseDown { x, y, buttons }
        }
        RawDeviceEvent::PointerUp { x, y, buttons, at } => {
            state.pointer.last_event_time = at;
            NormalizedEvent::MouseUp { x, y, buttons }
        }
        RawDeviceEvent::Wheel { delta_y, at } => {
            let delta_time_ms = elapsed_ms(state.wheel.last_wheel_time, at);
            state.wheel.last_wheel_time = at;
            NormalizedEvent::Wheel {
                delta_y,
                delta_time_ms,
            }
        }
        RawDeviceEvent::KeyPress { key, .. } => NormalizedEvent::KeyPress { key },
    }
}

/// Owner of [`InputState`] for the dispatch loop.
#[derive(Debug, Clone)]
pub struct EventNormalizer {
    state: InputState,
}

impl EventNormalizer {
    pub fn new(now: Instant) -> Self {
        Self {
            state: InputState::new(now),
        }
    }

    pub fn normalize(&mut self, raw: RawDeviceEvent) -> NormalizedEvent {
        normalize(raw, &mut self.state)
    }

    /// Forget the pointer position and restart both clocks at `now`.
    pub fn reset(&mut self, now: Instant) {
        self.state = InputState::new(now);
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }
}
