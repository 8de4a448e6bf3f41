//! 7-segment glyph table.
//!
//! Bit layout (common cathode, 1 = lit):
//!
//! ```text
//!    --a--
//!   f     b
//!    --g--
//!   e     c
//!    --d--  .dp
//! ```
//!
//! bit 0 = a … bit 6 = g, bit 7 = dp.

/// One cell's segment pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Segments(u8);

/// Patterns for the nibble values 0–F.
const HEX: [u8; 16] = [
    0x3f, 0x06, 0x5b, 0x4f, // 0 1 2 3
    0x66, 0x6d, 0x7d, 0x07, // 4 5 6 7
    0x7f, 0x6f, 0x77, 0x7c, // 8 9 A b
    0x58, 0x5e, 0x79, 0x71, // c d E F
];

impl Segments {
    /// All segments off.
    pub const OFF: Self = Self(0x00);
    /// Centre bar, used as the minus sign.
    pub const MINUS: Self = Self(0x40);
    /// Decimal point bit.
    pub const DOT: Self = Self(0x80);

    /// Upper-case `A`.
    pub const A: Self = Self(0x77);
    /// `B`, drawn like an 8.
    pub const B: Self = Self(0x7f);
    /// Lower-case `b`.
    pub const LOWER_B: Self = Self(0x7c);
    /// Lower-case `c`.
    pub const LOWER_C: Self = Self(0x58);
    /// Lower-case `d`.
    pub const LOWER_D: Self = Self(0x5e);
    /// Upper-case `E`.
    pub const E: Self = Self(0x79);
    /// Lower-case `i` (dot-less).
    pub const LOWER_I: Self = Self(0x04);
    /// Lower-case `o`.
    pub const LOWER_O: Self = Self(0x5c);
    /// Upper-case `P`.
    pub const P: Self = Self(0x73);
    /// Lower-case `r`.
    pub const LOWER_R: Self = Self(0x50);
    /// `S`, same as a 5.
    pub const S: Self = Self(0x6d);
    /// Lower-case `t`.
    pub const LOWER_T: Self = Self(0x78);
    /// Lower-case `u`.
    pub const LOWER_U: Self = Self(0x1c);

    /// Wrap a raw pattern.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw pattern.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The glyph for a digit value; only the low nibble is used.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // masked to 0..16
    pub const fn for_nibble(value: u8) -> Self {
        Self(HEX[(value & 0x0f) as usize])
    }

    /// This pattern with the decimal point lit.
    #[must_use]
    pub const fn with_dot(self) -> Self {
        Self(self.0 | Self::DOT.0)
    }

    /// Whether the decimal point is lit.
    #[must_use]
    pub const fn has_dot(self) -> bool {
        self.0 & Self::DOT.0 != 0
    }
}
