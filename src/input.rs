//! Logical keys and held-key polling
//!
//! Frontends feed raw key codes into [`HeldKeys`]; the simulation only ever
//! asks "is this logical key down right now?" through [`KeyQuery`].

use serde::{Deserialize, Serialize};

/// Keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalKey {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

impl LogicalKey {
    pub const ALL: [LogicalKey; 4] = [
        LogicalKey::RotateLeft,
        LogicalKey::RotateRight,
        LogicalKey::Thrust,
        LogicalKey::Fire,
    ];

    /// Map a DOM `KeyboardEvent.code` to a logical key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(LogicalKey::RotateLeft),
            "ArrowRight" | "KeyD" => Some(LogicalKey::RotateRight),
            "ArrowUp" | "KeyW" => Some(LogicalKey::Thrust),
            "Space" => Some(LogicalKey::Fire),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            LogicalKey::RotateLeft => 1 << 0,
            LogicalKey::RotateRight => 1 << 1,
            LogicalKey::Thrust => 1 << 2,
            LogicalKey::Fire => 1 << 3,
        }
    }
}

/// "Is logical key K currently pressed" query
pub trait KeyQuery {
    fn is_pressed(&self, key: LogicalKey) -> bool;
}

/// Set of currently held logical keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    mask: u8,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a key set from an explicit list (handy for scripted input)
    pub fn with(keys: &[LogicalKey]) -> Self {
        let mut held = Self::new();
        for &key in keys {
            held.press(key);
        }
        held
    }

    pub fn press(&mut self, key: LogicalKey) {
        self.mask |= key.bit();
    }

    pub fn release(&mut self, key: LogicalKey) {
        self.mask &= !key.bit();
    }

    /// Handle a key-down code; returns true if the code was one of ours
    pub fn key_down(&mut self, code: &str) -> bool {
        match LogicalKey::from_code(code) {
            Some(key) => {
                self.press(key);
                true
            }
            None => false,
        }
    }

    /// Handle a key-up code; returns true if the code was one of ours
    pub fn key_up(&mut self, code: &str) -> bool {
        match LogicalKey::from_code(code) {
            Some(key) => {
                self.release(key);
                true
            }
            None => false,
        }
    }

    /// Drop everything (window lost focus, key-ups will never arrive)
    pub fn clear(&mut self) {
        self.mask = 0;
    }
}

impl KeyQuery for HeldKeys {
    fn is_pressed(&self, key: LogicalKey) -> bool {
        self.mask & key.bit() != 0
    }
}
