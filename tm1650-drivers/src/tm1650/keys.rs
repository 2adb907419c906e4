//! Key scanner
//!
//! Reads the key register through the display driver (the chip shares one
//! bus for both) and notifies each configured key's listener when its
//! state changes.

use heapless::Vec;
use tm1650_core::config::{ConfigError, MAX_KEYS};
use tm1650_core::traits::{FrameWriter, KeyListener};
use tm1650_core::KeyState;

use super::display::Tm1650;
use crate::bus::ByteBus;

struct Key<L> {
    state: KeyState,
    listener: L,
}

/// Per-key change detection over the key register
pub struct KeyScanner<L> {
    keys: Vec<Key<L>, MAX_KEYS>,
    /// Most recent successful read
    mask: u16,
}

impl<L: KeyListener> Default for KeyScanner<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: KeyListener> KeyScanner<L> {
    /// Create a scanner with no keys
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            mask: 0,
        }
    }

    /// Observe a key
    ///
    /// The key starts released, so a key already held at the first scan
    /// reports a press.
    pub fn add_key(&mut self, code: u8, listener: L) -> Result<(), ConfigError> {
        let state = KeyState::new(code)?;
        self.keys
            .push(Key { state, listener })
            .map_err(|_| ConfigError::TooManyKeys)
    }

    /// Number of observed keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no key is observed
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key bitmask from the last successful scan
    pub fn last_mask(&self) -> u16 {
        self.mask
    }

    /// Last reported state of a keycode, if observed
    pub fn is_pressed(&self, code: u8) -> Option<bool> {
        self.keys
            .iter()
            .find(|k| k.state.code() == code)
            .map(|k| k.state.is_pressed())
    }

    /// Read the keys once and notify changes
    ///
    /// A failed read notifies nobody and leaves every key unchanged; the
    /// failure is counted in the display's bus statistics. Returns the
    /// number of notifications sent.
    pub fn scan<B: ByteBus, W: FrameWriter>(&mut self, display: &mut Tm1650<B, W>) -> usize {
        match display.read_keys() {
            Ok(mask) => self.process(mask),
            Err(_) => 0,
        }
    }

    /// Apply a key bitmask and notify changes
    pub fn process(&mut self, mask: u16) -> usize {
        self.mask = mask;
        let mut changes = 0;
        for key in self.keys.iter_mut() {
            if let Some(pressed) = key.state.update(mask) {
                #[cfg(feature = "defmt")]
                defmt::debug!("Key {} {}", key.state.code(), if pressed { "pressed" } else { "released" });
                key.listener.on_change(pressed);
                changes += 1;
            }
        }
        changes
    }
}
