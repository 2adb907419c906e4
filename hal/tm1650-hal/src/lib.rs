//! TM1650 panel Hardware Abstraction Layer
//!
//! This crate defines the pin traits the bit-banged two-wire transport
//! needs. Chip-specific HALs (RP2040, host simulators, etc.) implement
//! them so the same driver code runs everywhere.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tm1650-drivers (two-wire transport)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tm1650-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  tm1650-hal-  │       │  test wire    │
//! │    rp2040     │       │  simulators   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::FlexPin`] - Direction-switching digital pin

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

// Re-export key types at crate root for convenience
pub use gpio::{FlexPin, Level};
