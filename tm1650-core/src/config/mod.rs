//! Configuration types
//!
//! Board-agnostic configuration structures for the panel. Everything is
//! validated once at construction; nothing here touches hardware.

pub mod hardware;
pub mod segment_map;
pub mod types;

pub use hardware::*;
pub use segment_map::SegmentMap;
pub use types::*;
