//! Hardware driver implementations
//!
//! This crate provides the layers between the core panel logic in
//! tm1650-core and the two GPIO lines wired to the chip:
//!
//! - Bit-banged two-wire bus transport
//! - TM1650 register protocol (digit, control and key registers)
//! - Display driver (framebuffer push with dirty tracking)
//! - Key scanner (per-key change notification)

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod tm1650;

pub use bus::{BusError, BusStats, ByteBus, TwoWireBus};
pub use tm1650::{KeyScanner, PollReport, Registers, Tm1650};
