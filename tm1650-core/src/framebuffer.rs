//! Digit framebuffer
//!
//! Holds one segment bitmask per digit plus a text cursor. Content is kept
//! in the board's physical segment order (the segment map is applied on
//! write), so the driver can push it to the chip unchanged.
//!
//! Each position also remembers what was last pushed to the chip. A
//! position is dirty while its content differs from that copy, or while
//! the chip's copy is unknown (never pushed, or invalidated by a forced
//! refresh). Repainting identical content therefore costs no bus traffic.

use core::fmt;

use crate::config::{validate_length, ConfigError, DisplayConfig, SegmentMap, MAX_DIGITS};
use crate::font::{self, BLANK, SEG_DP};

/// Segment framebuffer for up to [`MAX_DIGITS`] digits
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Current content (physical segment order)
    segments: [u8; MAX_DIGITS],
    /// Content last pushed to the chip
    pushed: [u8; MAX_DIGITS],
    /// Bitmask of positions whose chip copy is known
    synced: u8,
    /// Number of digits fitted
    length: u8,
    /// Next position `write` fills (always < length)
    cursor: u8,
    /// Set once `write` has filled the last position
    full: bool,
    /// Position a following '.' attaches to
    dot_target: Option<u8>,
    /// Board wiring
    segment_map: SegmentMap,
}

impl Framebuffer {
    /// Create a blank framebuffer
    ///
    /// Fails if `length` is outside 1-6.
    pub fn new(length: u8, segment_map: SegmentMap) -> Result<Self, ConfigError> {
        validate_length(length)?;
        Ok(Self {
            segments: [BLANK; MAX_DIGITS],
            pushed: [BLANK; MAX_DIGITS],
            synced: 0,
            length,
            cursor: 0,
            full: false,
            dot_target: None,
            segment_map,
        })
    }

    /// Create a framebuffer sized and wired per the display config
    pub fn from_config(config: &DisplayConfig) -> Result<Self, ConfigError> {
        Self::new(config.length, config.segment_map)
    }

    /// Number of digits
    pub fn len(&self) -> usize {
        self.length as usize
    }

    /// Always false; a framebuffer holds at least one digit
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor as usize
    }

    /// Current content of every digit
    pub fn digits(&self) -> &[u8] {
        &self.segments[..self.len()]
    }

    /// Segments at a position
    pub fn digit(&self, pos: usize) -> Option<u8> {
        self.digits().get(pos).copied()
    }

    /// Store a raw (physical) segment mask
    ///
    /// Out-of-range positions are ignored.
    pub fn set_digit_raw(&mut self, pos: usize, segments: u8) {
        if pos < self.len() {
            self.segments[pos] = segments;
        }
    }

    /// Store logical segments (font order) through the segment map
    pub fn set_segments(&mut self, pos: usize, logical: u8) {
        let physical = self.segment_map.apply(logical);
        self.set_digit_raw(pos, physical);
    }

    /// Show a character at a position
    ///
    /// Characters the font cannot show are rendered blank.
    pub fn set_digit(&mut self, pos: usize, glyph: char) {
        self.set_segments(pos, lookup(glyph));
    }

    /// Light or clear the decimal point at a position
    pub fn set_dot(&mut self, pos: usize, on: bool) {
        let dot = self.segment_map.apply(SEG_DP);
        if let Some(current) = self.digit(pos) {
            let segments = if on { current | dot } else { current & !dot };
            self.set_digit_raw(pos, segments);
        }
    }

    /// Write text at the cursor, advancing it
    ///
    /// A `'.'` following a character lights that digit's decimal point
    /// instead of taking a position of its own. Characters past the last
    /// digit are dropped silently.
    ///
    /// Returns the number of positions written.
    pub fn write(&mut self, text: &str) -> usize {
        let mut written = 0;

        for ch in text.chars() {
            if ch == '.' {
                if let Some(target) = self.dot_target.take() {
                    self.set_dot(target as usize, true);
                    continue;
                }
            }

            if self.full {
                self.dot_target = None;
                break;
            }

            let pos = self.cursor;
            self.set_segments(pos as usize, lookup(ch));
            self.dot_target = Some(pos);
            written += 1;

            if pos + 1 >= self.length {
                self.full = true;
            } else {
                self.cursor = pos + 1;
            }
        }

        written
    }

    /// Move the cursor and write text from there
    pub fn print_at(&mut self, pos: usize, text: &str) -> usize {
        self.set_cursor(pos);
        self.write(text)
    }

    /// Move the cursor (clamped to the last digit)
    pub fn set_cursor(&mut self, pos: usize) {
        let last = self.len() - 1;
        self.cursor = pos.min(last) as u8;
        self.full = false;
        self.dot_target = None;
    }

    /// Blank every digit and home the cursor
    pub fn clear(&mut self) {
        self.segments = [BLANK; MAX_DIGITS];
        self.cursor = 0;
        self.full = false;
        self.dot_target = None;
    }

    /// Check if a position needs pushing
    pub fn is_dirty(&self, pos: usize) -> bool {
        if pos >= self.len() {
            return false;
        }
        self.synced & (1 << pos) == 0 || self.segments[pos] != self.pushed[pos]
    }

    /// Check if any position needs pushing
    pub fn has_dirty(&self) -> bool {
        (0..self.len()).any(|pos| self.is_dirty(pos))
    }

    /// Iterate over dirty positions
    pub fn dirty_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |&pos| self.is_dirty(pos))
    }

    /// Record that a position's content reached the chip
    pub fn mark_pushed(&mut self, pos: usize) {
        if pos < self.len() {
            self.pushed[pos] = self.segments[pos];
            self.synced |= 1 << pos;
        }
    }

    /// Forget what the chip holds so every digit is pushed again
    pub fn invalidate(&mut self) {
        self.synced = 0;
    }
}

impl fmt::Write for Framebuffer {
    /// Overflow is truncated, never an error
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}

fn lookup(ch: char) -> u8 {
    match font::glyph(ch) {
        Some(segments) => segments,
        None => {
            #[cfg(feature = "defmt")]
            defmt::debug!("No glyph for {=char}, showing blank", ch);
            BLANK
        }
    }
}
