//! RP2040-specific HAL for the TM1650 panel firmware
//!
//! This crate provides RP2040 implementations of the shared `tm1650-hal`
//! traits:
//!
//! - Open-drain bus lines over `embassy_rp::gpio::Flex`
//! - Pin string parsing for config files
//! - Dynamic pin allocation for config-driven setup

#![no_std]

pub mod gpio;
pub mod pins;

pub use gpio::{parse_pin_string, BusLine, PinSpec, GPIO_COUNT};
pub use pins::{PinBank, PinError};
