//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Channel capacity for key events
const KEY_CHANNEL_SIZE: usize = 8;

/// A key changed state
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct KeyEvent {
    /// Keycode (bit position in the key bitmask)
    pub code: u8,
    /// New state
    pub pressed: bool,
}

/// Key events from the key task (press and release)
pub static KEY_CHANNEL: Channel<CriticalSectionRawMutex, KeyEvent, KEY_CHANNEL_SIZE> =
    Channel::new();
