//! Poll cycle state machine
//!
//! The display driver is either idle between polls or updating the chip.
//! Transitions are explicit so a trigger arriving mid-update is visibly
//! dropped rather than nested.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
