//! Board-agnostic core logic for the TM1650 panel driver
//!
//! This crate contains everything that does not depend on the bus or
//! the board:
//!
//! - Configuration types and validation
//! - Seven-segment font and board segment remapping
//! - Digit framebuffer with dirty tracking
//! - Poll cycle state machine
//! - Key change detection
//! - Writer and listener traits

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod font;
pub mod framebuffer;
pub mod keys;
pub mod state;
pub mod traits;

pub use framebuffer::Framebuffer;
pub use keys::KeyState;
