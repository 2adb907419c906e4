//! Board segment wiring
//!
//! Font glyphs use the logical layout `bit 0 = A ... bit 6 = G, bit 7 = P`
//! (decimal point). Boards do not always wire the chip's segment outputs
//! in that order, so a map translates logical segments to physical bits.
//!
//! The text form lists one letter per physical bit, most significant bit
//! first. `"PGFEDCBA"` is the identity; a board that swaps the decimal
//! point and segment G would use `"GPFEDCBA"`. Shorter strings describe
//! the low bits only and leave the remaining logical segments unwired.

use super::types::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of segments per digit including the decimal point
pub const SEGMENTS_PER_DIGIT: usize = 8;

/// Logical to physical segment translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentMap {
    /// Physical bit mask for each logical segment (A..G, P)
    bits: [u8; SEGMENTS_PER_DIGIT],
}

impl Default for SegmentMap {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl SegmentMap {
    /// Segments wired in font order
    pub const IDENTITY: Self = Self {
        bits: [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80],
    };

    /// Parse the letter form (e.g. `"PGFEDCBA"`)
    pub fn parse(map: &str) -> Result<Self, ConfigError> {
        let len = map.chars().count();
        if len == 0 || len > SEGMENTS_PER_DIGIT {
            return Err(ConfigError::InvalidSegmentMap);
        }

        let mut bits = [0u8; SEGMENTS_PER_DIGIT];
        for (i, letter) in map.chars().enumerate() {
            let logical = logical_index(letter).ok_or(ConfigError::InvalidSegmentMap)?;
            if bits[logical] != 0 {
                return Err(ConfigError::InvalidSegmentMap);
            }
            let physical = len - 1 - i;
            bits[logical] = 1 << physical;
        }

        Ok(Self { bits })
    }

    /// Translate a logical segment mask into the board's physical mask
    pub fn apply(&self, logical: u8) -> u8 {
        let mut physical = 0;
        for (segment, &bit) in self.bits.iter().enumerate() {
            if logical & (1 << segment) != 0 {
                physical |= bit;
            }
        }
        physical
    }

    /// Check if this map changes nothing
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Logical segment index for a map letter
fn logical_index(letter: char) -> Option<usize> {
    match letter.to_ascii_uppercase() {
        c @ 'A'..='G' => Some(c as usize - 'A' as usize),
        'P' => Some(7),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_round_trip() {
        let map = SegmentMap::parse("PGFEDCBA").unwrap();
        assert!(map.is_identity());
        for mask in [0x00, 0x3F, 0x80, 0xFF, 0x5B] {
            assert_eq!(map.apply(mask), mask);
        }
    }

    #[test]
    fn test_swapped_dot_and_g() {
        let map = SegmentMap::parse("GPFEDCBA").unwrap();
        // G (bit 6) lands on physical bit 7, P (bit 7) on physical bit 6
        assert_eq!(map.apply(0x40), 0x80);
        assert_eq!(map.apply(0x80), 0x40);
        assert_eq!(map.apply(0x01), 0x01);
    }

    #[test]
    fn test_short_map_leaves_segments_unwired() {
        // Seven-segment board without a decimal point
        let map = SegmentMap::parse("GFEDCBA").unwrap();
        assert_eq!(map.apply(0x7F), 0x7F);
        assert_eq!(map.apply(0x80), 0x00);
    }

    #[test]
    fn test_lowercase_letters() {
        assert_eq!(SegmentMap::parse("pgfedcba"), Ok(SegmentMap::IDENTITY));
    }

    #[test]
    fn test_invalid_maps() {
        assert_eq!(SegmentMap::parse(""), Err(ConfigError::InvalidSegmentMap));
        assert_eq!(
            SegmentMap::parse("PGFEDCBAX"),
            Err(ConfigError::InvalidSegmentMap)
        );
        assert_eq!(SegmentMap::parse("PGFEDCBZ"), Err(ConfigError::InvalidSegmentMap));
        assert_eq!(SegmentMap::parse("AA"), Err(ConfigError::InvalidSegmentMap));
    }
}
