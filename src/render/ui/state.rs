//! HUD state folded from delivered batches.
//!
//! This is what the terminal engine "simulates": it keeps a running picture of the input it has
//! been fed so the screen can show it.

use crate::frame::ViewportSize;
use crate::input::{NormalizedEvent, PointerButtons};
use std::collections::{BTreeMap, VecDeque};

/// Number of recent events kept for the log panel.
const RECENT_EVENT_CAPACITY: usize = 12;

#[derive(Debug, Clone)]
pub struct HudState {
    pub frames: u64,
    pub viewport: ViewportSize,
    pub pointer: Option<(i32, i32)>,
    pub last_delta: (i32, i32),
    pub buttons: PointerButtons,
    /// Sum of all wheel deltas seen so far.
    pub wheel_total: i64,
    pub last_key: Option<String>,
    pub counts: BTreeMap<&'static str, u64>,
    pub recent: VecDeque<String>,
    pub last_batch_len: usize,
}

impl HudState {
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            frames: 0,
            viewport,
            pointer: None,
            last_delta: (0, 0),
            buttons: PointerButtons::NONE,
            wheel_total: 0,
            last_key: None,
            counts: BTreeMap::new(),
            recent: VecDeque::with_capacity(RECENT_EVENT_CAPACITY),
            last_batch_len: 0,
        }
    }

    /// Apply one frame's batch in order.
    pub fn apply_batch(&mut self, events: &[NormalizedEvent]) {
        self.frames += 1;
        self.last_batch_len = events.len();
        for event in events {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: &NormalizedEvent) {
        *self.counts.entry(event.kind()).or_insert(0) += 1;

        match event {
            NormalizedEvent::MouseMove {
                x,
                y,
                delta_x,
                delta_y,
                buttons,
                ..
            } => {
                self.pointer = Some((*x, *y));
                self.last_delta = (*delta_x, *delta_y);
                self.buttons = *buttons;
            }
            NormalizedEvent::MouseDown { x, y, buttons }
            | NormalizedEvent::MouseUp { x, y, buttons } => {
                self.pointer = Some((*x, *y));
                self.buttons = *buttons;
            }
            NormalizedEvent::Wheel { delta_y, .. } => {
                self.wheel_total += i64::from(*delta_y);
            }
            NormalizedEvent::KeyPress { key } => {
                self.last_key = Some(key.clone());
            }
            NormalizedEvent::ViewportResize { width, height } => {
                self.viewport = ViewportSize::new(*width, *height);
            }
        }

        if !matches!(event, NormalizedEvent::MouseMove { .. }) {
            if self.recent.len() == RECENT_EVENT_CAPACITY {
                self.recent.pop_front();
            }
            self.recent.push_back(describe(event));
        }
    }

    pub fn count(&self, kind: &str) -> u64 {
        self.counts.get(kind).copied().unwrap_or(0)
    }
}

/// One-line description for the log panel.
pub fn describe(event: &NormalizedEvent) -> String {
    match event {
        NormalizedEvent::MouseMove { x, y, delta_x, delta_y, .. } => {
            format!("move ({x}, {y}) d=({delta_x}, {delta_y})")
        }
        NormalizedEvent::MouseDown { x, y, buttons } => {
            format!("down ({x}, {y}) buttons={:#05b}", buttons.bits())
        }
        NormalizedEvent::MouseUp { x, y, buttons } => {
            format!("up ({x}, {y}) buttons={:#05b}", buttons.bits())
        }
        NormalizedEvent::Wheel {
            delta_y,
            delta_time_ms,
        } => format!("wheel {delta_y} after {delta_time_ms:.0}ms"),
        NormalizedEvent::KeyPress { key } => format!("key {key:?}"),
        NormalizedEvent::ViewportResize { width, height } => format!("resize {width}x{height}"),
    }
}
