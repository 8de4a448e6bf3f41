//! Peripheral-facing newtypes.
//!
//! These zero-cost wrappers keep raw indices from crossing layer boundaries
//! unchecked:
//! - `RawKey`: a matrix key index, 0–15
//! - `DigitIndex`: a display cell position, 0–7

use crate::config::{DIGIT_COUNT, KEY_COUNT};

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u8,
    /// The inclusive maximum allowed value.
    pub max: u8,
}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "value {} exceeds maximum {}", self.value, self.max)
    }
}

// ── RawKey ───────────────────────────────────────────────────────────────────

/// Index of one key on the 4×4 matrix, as produced by a single scan pass.
///
/// Index layout is `sense_line * 4 + drive_line`, so the top-left key is 0
/// and the bottom-right key is 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct RawKey(u8);

impl RawKey {
    /// Highest valid key index.
    pub const MAX: u8 = (KEY_COUNT - 1) as u8;

    /// Create a `RawKey`, returning an error if `index > 15`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `index > 15`.
    pub const fn try_new(index: u8) -> Result<Self, OutOfRangeError> {
        if index > Self::MAX {
            Err(OutOfRangeError {
                value: index,
                max: Self::MAX,
            })
        } else {
            Ok(Self(index))
        }
    }

    /// Build a key from its matrix coordinates.
    ///
    /// Returns `None` when either coordinate is outside `0..4`.
    pub fn from_lines(drive: usize, sense: usize) -> Option<Self> {
        if drive >= 4 || sense >= 4 {
            return None;
        }
        // Both coordinates < 4, so the index is < 16.
        #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
        let index = (sense * 4 + drive) as u8;
        Some(Self(index))
    }

    /// Return the key index (0–15).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

// ── DigitIndex ───────────────────────────────────────────────────────────────

/// Position of one display cell, 0 (leftmost) to 7 (rightmost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct DigitIndex(u8);

impl DigitIndex {
    /// Leftmost cell.
    pub const FIRST: Self = Self(0);

    /// Rightmost cell.
    pub const LAST: Self = Self((DIGIT_COUNT - 1) as u8);

    /// Create a `DigitIndex`, returning an error if `position > 7`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `position > 7`.
    pub const fn try_new(position: u8) -> Result<Self, OutOfRangeError> {
        if position > Self::LAST.0 {
            Err(OutOfRangeError {
                value: position,
                max: Self::LAST.0,
            })
        } else {
            Ok(Self(position))
        }
    }

    /// The next position, wrapping from 7 back to 0.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.0 >= Self::LAST.0 {
            Self::FIRST
        } else {
            #[allow(clippy::arithmetic_side_effects)] // self.0 < 7
            Self(self.0 + 1)
        }
    }

    /// Return the position as a `u8`.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Return the position as a buffer index.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}
