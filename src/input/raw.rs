//! Low-level input: raw device notifications and the crossterm translation that produces them.
//!
//! Raw notifications are timestamped when they arrive so deltas can be computed later, on the
//! dispatch loop, without looking at the wall clock again.

use crate::frame::viewport::ViewportSize;
use crate::input::event::{MouseButton, PointerButtons};
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as TermMouseButton,
    MouseEvent, MouseEventKind,
};
use std::time::Instant;

/// Wheel delta reported for a single scroll notch.
pub const WHEEL_NOTCH_DELTA: i32 = 120;

/// One unprocessed notification from the pointer, wheel or keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDeviceEvent {
    PointerMove {
        x: i32,
        y: i32,
        buttons: PointerButtons,
        at: Instant,
    },
    PointerDown {
        x: i32,
        y: i32,
        buttons: PointerButtons,
        at: Instant,
    },
    PointerUp {
        x: i32,
        y: i32,
        buttons: PointerButtons,
        at: Instant,
    },
    Wheel {
        delta_y: i32,
        at: Instant,
    },
    KeyPress {
        key: String,
        at: Instant,
    },
}

/// Result of translating one terminal event.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalSignal {
    Device(RawDeviceEvent),
    /// New terminal size; feeds the polled viewport source, never the event stream.
    Resize(ViewportSize),
    Quit,
    Ignored,
}

/// Translates crossterm events into raw device notifications.
///
/// Terminals report which button changed rather than the full set of held buttons, so the
/// translator keeps the bitmask itself.
#[derive(Debug, Default)]
pub struct TerminalTranslator {
    held: PointerButtons,
}

impl TerminalTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held_buttons(&self) -> PointerButtons {
        self.held
    }

    pub fn translate(&mut self, event: Event, at: Instant) -> TerminalSignal {
        match event {
            Event::Key(key_event) => self.translate_key(key_event, at),
            Event::Mouse(mouse_event) => self.translate_mouse(mouse_event, at),
            Event::Resize(width, height) => {
                TerminalSignal::Resize(ViewportSize::new(u32::from(width), u32::from(height)))
            }
            _ => TerminalSignal::Ignored,
        }
    }

    fn translate_key(&self, key_event: KeyEvent, at: Instant) -> TerminalSignal {
        if key_event.kind != KeyEventKind::Press {
            return TerminalSignal::Ignored;
        }

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                TerminalSignal::Quit
            }
            (code, _) => match key_identifier(code) {
                Some(key) => TerminalSignal::Device(RawDeviceEvent::KeyPress { key, at }),
                None => TerminalSignal::Ignored,
            },
        }
    }

    fn translate_mouse(&mut self, mouse_event: MouseEvent, at: Instant) -> TerminalSignal {
        let x = i32::from(mouse_event.column);
        let y = i32::from(mouse_event.row);

        let raw = match mouse_event.kind {
            MouseEventKind::Down(button) => {
                self.held.insert(map_button(button));
                RawDeviceEvent::PointerDown {
                    x,
                    y,
                    buttons: self.held,
                    at,
                }
            }
            MouseEventKind::Up(button) => {
                self.held.remove(map_button(button));
                RawDeviceEvent::PointerUp {
                    x,
                    y,
                    buttons: self.held,
                    at,
                }
            }
            MouseEventKind::Drag(button) => {
                self.held.insert(map_button(button));
                RawDeviceEvent::PointerMove {
                    x,
                    y,
                    buttons: self.held,
                    at,
                }
            }
            MouseEventKind::Moved => RawDeviceEvent::PointerMove {
                x,
                y,
                buttons: self.held,
                at,
            },
            MouseEventKind::ScrollDown => RawDeviceEvent::Wheel {
                delta_y: WHEEL_NOTCH_DELTA,
                at,
            },
            MouseEventKind::ScrollUp => RawDeviceEvent::Wheel {
                delta_y: -WHEEL_NOTCH_DELTA,
                at,
            },
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
                return TerminalSignal::Ignored
            }
        };

        TerminalSignal::Device(raw)
    }
}

fn map_button(button: TermMouseButton) -> MouseButton {
    match button {
        TermMouseButton::Left => MouseButton::Left,
        TermMouseButton::Right => MouseButton::Right,
        TermMouseButton::Middle => MouseButton::Middle,
    }
}

/// Opaque key identifier: the character itself for printable keys, a name otherwise.
fn key_identifier(code: KeyCode) -> Option<String> {
    let key = match code {
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key_press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn tracks_held_buttons_across_down_drag_up() {
        let mut translator = TerminalTranslator::new();
        let at = Instant::now();

        let down = translator.translate(mouse(MouseEventKind::Down(TermMouseButton::Right), 3, 4), at);
        assert_eq!(
            down,
            TerminalSignal::Device(RawDeviceEvent::PointerDown {
                x: 3,
                y: 4,
                buttons: PointerButtons::from_bits(2),
                at,
            })
        );

        let drag = translator.translate(mouse(MouseEventKind::Drag(TermMouseButton::Right), 5, 4), at);
        assert!(matches!(
            drag,
            TerminalSignal::Device(RawDeviceEvent::PointerMove { x: 5, buttons, .. })
                if buttons.contains(MouseButton::Right)
        ));

        let up = translator.translate(mouse(MouseEventKind::Up(TermMouseButton::Right), 5, 4), at);
        assert!(matches!(
            up,
            TerminalSignal::Device(RawDeviceEvent::PointerUp { buttons, .. }) if buttons.is_empty()
        ));
        assert!(translator.held_buttons().is_empty());
    }

    #[test]
    fn vertical_scroll_maps_to_wheel_notches() {
        let mut translator = TerminalTranslator::new();
        let at = Instant::now();

        assert_eq!(
            translator.translate(mouse(MouseEventKind::ScrollUp, 0, 0), at),
            TerminalSignal::Device(RawDeviceEvent::Wheel { delta_y: -120, at })
        );
        assert_eq!(
            translator.translate(mouse(MouseEventKind::ScrollDown, 0, 0), at),
            TerminalSignal::Device(RawDeviceEvent::Wheel { delta_y: 120, at })
        );
        assert_eq!(
            translator.translate(mouse(MouseEventKind::ScrollLeft, 0, 0), at),
            TerminalSignal::Ignored
        );
    }

    #[test]
    fn key_presses_become_identifiers() {
        let mut translator = TerminalTranslator::new();
        let at = Instant::now();

        assert_eq!(
            translator.translate(key_press(KeyCode::Char('w')), at),
            TerminalSignal::Device(RawDeviceEvent::KeyPress {
                key: "w".into(),
                at
            })
        );
        assert_eq!(
            translator.translate(key_press(KeyCode::Up), at),
            TerminalSignal::Device(RawDeviceEvent::KeyPress {
                key: "ArrowUp".into(),
                at
            })
        );
        assert_eq!(
            translator.translate(key_press(KeyCode::CapsLock), at),
            TerminalSignal::Ignored
        );
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut translator = TerminalTranslator::new();
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        assert_eq!(
            translator.translate(Event::Key(release), Instant::now()),
            TerminalSignal::Ignored
        );
    }

    #[test]
    fn quit_keys_and_resize() {
        let mut translator = TerminalTranslator::new();
        let at = Instant::now();

        assert_eq!(
            translator.translate(
                Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
                at
            ),
            TerminalSignal::Quit
        );
        assert_eq!(translator.translate(key_press(KeyCode::Esc), at), TerminalSignal::Quit);
        assert_eq!(
            translator.translate(Event::Resize(120, 40), at),
            TerminalSignal::Resize(ViewportSize::new(120, 40))
        );
        assert_eq!(
            translator.translate(Event::FocusGained, at),
            TerminalSignal::Ignored
        );
    }
}
