use log::warn;

use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// Tracks which of the keys 0..F are held, plus the most recent fresh key press. The latter is
/// only ever consumed by the wait-for-key instruction and is cleared after every CPU cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    held: [bool; KEY_COUNT],
    pressed: Option<u8>,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    fn valid(key: u8) -> bool {
        if usize::from(key) < KEY_COUNT {
            true
        } else {
            warn!("ignoring key {:#04X}; the keypad only has keys 0x0..=0xF", key);
            false
        }
    }

    /// Set the held status of `key`
    pub fn set_held(&mut self, key: u8, held: bool) {
        if Keypad::valid(key) {
            self.held[usize::from(key)] = held;
        }
    }

    /// Whether `key` is held; values past 0xF are never held
    pub fn is_held(&self, key: u8) -> bool {
        self.held.get(usize::from(key)).copied().unwrap_or(false)
    }

    /// Record a fresh key-down edge
    pub fn notify_pressed(&mut self, key: u8) {
        if Keypad::valid(key) {
            self.pressed = Some(key);
        }
    }

    /// Consume the key pressed since the last cycle, if any
    pub fn take_pressed(&mut self) -> Option<u8> {
        self.pressed.take()
    }

    pub fn clear_pressed(&mut self) {
        self.pressed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys() {
        let mut keypad = Keypad::new();
        keypad.set_held(0xA, true);
        assert!(keypad.is_held(0xA));
        keypad.set_held(0xA, false);
        assert!(!keypad.is_held(0xA));
    }

    #[test]
    fn test_out_of_range_keys_are_ignored() {
        let mut keypad = Keypad::new();
        keypad.set_held(0x10, true);
        keypad.notify_pressed(0x10);
        assert!(!keypad.is_held(0x10));
        assert_eq!(keypad.take_pressed(), None);
    }

    #[test]
    fn test_pressed_key_is_consumed_once() {
        let mut keypad = Keypad::new();
        keypad.notify_pressed(0x3);
        keypad.notify_pressed(0x7);
        assert_eq!(keypad.take_pressed(), Some(0x7));
        assert_eq!(keypad.take_pressed(), None);
    }
}
