//! Content writer trait for the display poll

use crate::framebuffer::Framebuffer;

/// Paints the framebuffer once per display poll
///
/// The driver clears the framebuffer and homes the cursor before calling
/// [`render`](FrameWriter::render), so a writer always draws a complete
/// frame. It runs inline within the poll and must return promptly.
pub trait FrameWriter {
    /// Draw the next frame
    fn render(&mut self, fb: &mut Framebuffer);

    /// Whether the driver should invoke this writer at all
    ///
    /// Drivers without a writer keep whatever content was written through
    /// the framebuffer directly.
    fn is_active(&self) -> bool {
        true
    }
}

/// Writer used when content is written directly, not per poll
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWriter;

impl FrameWriter for NoWriter {
    fn render(&mut self, _fb: &mut Framebuffer) {}

    fn is_active(&self) -> bool {
        false
    }
}

// Blanket implementation for closures
impl<F: FnMut(&mut Framebuffer)> FrameWriter for F {
    fn render(&mut self, fb: &mut Framebuffer) {
        self(fb)
    }
}
