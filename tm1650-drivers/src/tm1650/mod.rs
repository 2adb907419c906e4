//! TM1650 LED controller with key scan
//!
//! Drives up to six digit registers and reads a 16-key matrix over the
//! two-wire bus.

pub mod display;
pub mod keys;
pub mod registers;

pub use display::{PollReport, Tm1650};
pub use keys::KeyScanner;
pub use registers::{ControlWord, Registers};
