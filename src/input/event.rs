//! Normalized event records delivered to the engine once per frame.

/// Individual pointer buttons, numbered the way the bitmask encodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Bit this button occupies in a [`PointerButtons`] mask.
    pub fn bit(self) -> u16 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}

/// Bitmask of the pointer buttons currently held down.
///
/// Bits outside the three known buttons are kept as-is; the mask is never validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PointerButtons(u16);

impl PointerButtons {
    pub const NONE: PointerButtons = PointerButtons(0);

    pub fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.bit();
    }

    /// Decode the known buttons in the mask, in bit order.
    pub fn pressed(self) -> Vec<MouseButton> {
        [MouseButton::Left, MouseButton::Right, MouseButton::Middle]
            .into_iter()
            .filter(|button| self.contains(*button))
            .collect()
    }
}

impl From<MouseButton> for PointerButtons {
    fn from(button: MouseButton) -> Self {
        Self(button.bit())
    }
}

/// Canonical, immutable representation of one input occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedEvent {
    MouseMove {
        x: i32,
        y: i32,
        delta_x: i32,
        delta_y: i32,
        delta_time_ms: f64,
        buttons: PointerButtons,
    },
    MouseDown {
        x: i32,
        y: i32,
        buttons: PointerButtons,
    },
    MouseUp {
        x: i32,
        y: i32,
        buttons: PointerButtons,
    },
    Wheel {
        delta_y: i32,
        delta_time_ms: f64,
    },
    KeyPress {
        key: String,
    },
    ViewportResize {
        width: u32,
        height: u32,
    },
}

impl NormalizedEvent {
    /// Short name of the variant, used for logging and the HUD.
    pub fn kind(&self) -> &'static str {
        match self {
            NormalizedEvent::MouseMove { .. } => "mouse_move",
            NormalizedEvent::MouseDown { .. } => "mouse_down",
            NormalizedEvent::MouseUp { .. } => "mouse_up",
            NormalizedEvent::Wheel { .. } => "wheel",
            NormalizedEvent::KeyPress { .. } => "key_press",
            NormalizedEvent::ViewportResize { .. } => "viewport_resize",
        }
    }

    pub fn is_resize(&self) -> bool {
        matches!(self, NormalizedEvent::ViewportResize { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove_update_mask() {
        let mut buttons = PointerButtons::NONE;
        buttons.insert(MouseButton::Left);
        buttons.insert(MouseButton::Middle);
        assert_eq!(buttons.bits(), 5);

        buttons.remove(MouseButton::Left);
        assert!(!buttons.contains(MouseButton::Left));
        assert!(buttons.contains(MouseButton::Middle));
    }

    #[test]
    fn pressed_decodes_known_bits_in_order() {
        assert!(PointerButtons::from_bits(0).pressed().is_empty());
        assert_eq!(
            PointerButtons::from_bits(3).pressed(),
            vec![MouseButton::Left, MouseButton::Right]
        );
        assert_eq!(
            PointerButtons::from_bits(7).pressed(),
            vec![MouseButton::Left, MouseButton::Right, MouseButton::Middle]
        );
    }

    #[test]
    fn unknown_bits_pass_through() {
        let buttons = PointerButtons::from_bits(0b1000_0001);
        assert_eq!(buttons.bits(), 0b1000_0001);
        assert_eq!(buttons.pressed(), vec![MouseButton::Left]);
        assert!(!buttons.is_empty());
    }

    #[test]
    fn kind_names_each_variant() {
        let resize = NormalizedEvent::ViewportResize {
            width: 1,
            height: 1,
        };
        assert_eq!(resize.kind(), "viewport_resize");
        assert!(resize.is_resize());

        let key = NormalizedEvent::KeyPress { key: "w".into() };
        assert_eq!(key.kind(), "key_press");
        assert!(!key.is_resize());
    }
}
