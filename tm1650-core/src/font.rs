//! Seven-segment font
//!
//! ```text
//!      A
//!     ---
//!  F |   | B
//!     -G-
//!  E |   | C
//!     ---
//!      D   P
//! ```
//!
//! Glyphs use bit 0 = A through bit 6 = G, bit 7 = P (decimal point).
//! Characters without a readable seven-segment shape have no glyph and
//! are shown blank.

/// Segment A (top)
pub const SEG_A: u8 = 0x01;
/// Segment B (top right)
pub const SEG_B: u8 = 0x02;
/// Segment C (bottom right)
pub const SEG_C: u8 = 0x04;
/// Segment D (bottom)
pub const SEG_D: u8 = 0x08;
/// Segment E (bottom left)
pub const SEG_E: u8 = 0x10;
/// Segment F (top left)
pub const SEG_F: u8 = 0x20;
/// Segment G (middle)
pub const SEG_G: u8 = 0x40;
/// Decimal point
pub const SEG_DP: u8 = 0x80;

/// All segments off
pub const BLANK: u8 = 0x00;

/// Hex digit glyphs, indexed by value
pub const HEX_DIGITS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, // 0-7
    0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71, // 8-F
];

/// Look up the glyph for a character
///
/// Returns `None` for characters the font cannot show.
pub fn glyph(ch: char) -> Option<u8> {
    let segments = match ch {
        ' ' => BLANK,
        '0'..='9' => HEX_DIGITS[ch as usize - '0' as usize],

        // Letters with a distinct lowercase shape
        'c' => 0x58,
        'h' => 0x74,
        'i' => SEG_C,
        'o' => 0x5C,
        'u' => 0x1C,
        'v' => 0x1C,

        'A' | 'a' => 0x77,
        'B' | 'b' => 0x7C,
        'C' => 0x39,
        'D' | 'd' => 0x5E,
        'E' | 'e' => 0x79,
        'F' | 'f' => 0x71,
        'G' | 'g' => 0x3D,
        'H' => 0x76,
        'I' => 0x06,
        'J' | 'j' => 0x1E,
        'L' | 'l' => 0x38,
        'N' | 'n' => 0x54,
        'O' => 0x3F,
        'P' | 'p' => 0x73,
        'Q' | 'q' => 0x67,
        'R' | 'r' => 0x50,
        'S' | 's' => 0x6D,
        'T' | 't' => 0x78,
        'U' | 'V' => 0x3E,
        'Y' | 'y' => 0x6E,
        'Z' | 'z' => 0x5B,

        '-' => SEG_G,
        '_' => SEG_D,
        '=' => SEG_G | SEG_D,
        '.' | ',' => SEG_DP,
        '\'' | '`' => SEG_F,
        '"' => SEG_B | SEG_F,
        '|' => SEG_E | SEG_F,
        '[' | '(' => 0x39,
        ']' | ')' => 0x0F,
        '/' => 0x52,
        '\\' => 0x64,
        '?' => 0x53,
        '*' | '°' => 0x63,

        _ => return None,
    };
    Some(segments)
}

/// Encode a character, falling back to blank
pub fn encode(ch: char) -> u8 {
    glyph(ch).unwrap_or(BLANK)
}

/// Glyph for a hex digit value (0-15); larger values are blank
pub fn hex_digit(value: u8) -> u8 {
    HEX_DIGITS.get(value as usize).copied().unwrap_or(BLANK)
}
