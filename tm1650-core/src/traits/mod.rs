//! Extension traits
//!
//! These traits define the seams between the driver and the code around
//! it: who paints the framebuffer, and who hears about key changes.

pub mod display;
pub mod keys;

pub use display::{FrameWriter, NoWriter};
pub use keys::{KeyListener, NoListener};
