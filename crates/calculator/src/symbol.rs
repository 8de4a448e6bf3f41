//! Calculator symbols and the keypad map.
//!
//! ```text
//!     TAP             HOLD
//! -----------     -----------
//! | 7 8 9 / |     | M . . A |
//! | 4 5 6 * |     | . . . B |
//! | 1 2 3 - |     | . . . C |
//! | 0 H = + |     | . F E D |
//! -----------     -----------
//! ```
//!
//! Held keys marked `.` decode to [`Symbol::Blank`].

use platform::RawKey;

/// Active numeric radix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Base {
    /// Base 10
    #[default]
    Decimal,
    /// Base 16
    Hex,
    /// Base 2
    Binary,
}

impl Base {
    /// The radix as a number.
    #[must_use]
    pub const fn radix(self) -> u8 {
        match self {
            Self::Decimal => 10,
            Self::Hex => 16,
            Self::Binary => 2,
        }
    }

    /// The next base in the mode-key cycle 10 → 16 → 2 → 10.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Decimal => Self::Hex,
            Self::Hex => Self::Binary,
            Self::Binary => Self::Decimal,
        }
    }
}

/// A digit glyph `0`–`F`.
///
/// Whether a digit may be entered depends on the active [`Base`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Digit(u8);

impl Digit {
    /// Create a digit from its value, or `None` if `value > 15`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value < 16 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The digit value, 0–15.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this digit can appear in a number of base `base`.
    #[must_use]
    pub const fn is_valid_in(self, base: Base) -> bool {
        self.0 < base.radix()
    }

    /// The ASCII character for this digit (`0`–`9`, `A`–`F`).
    #[must_use]
    pub const fn as_char(self) -> char {
        match char::from_digit(self.0 as u32, 16) {
            Some(c) => c.to_ascii_uppercase(),
            None => '?',
        }
    }
}

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operator {
    /// `+`
    Add,
    /// `-` (also the unary sign marker)
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl Operator {
    /// `*` and `/` bind tighter than `+` and `-`.
    #[must_use]
    pub const fn binds_tighter(self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }

    /// The ASCII character for this operator.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }
}

/// One decoded calculator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// `0`–`F`
    Digit(Digit),
    /// `+ - * /`
    Op(Operator),
    /// `=`: evaluate the expression
    Equals,
    /// `M`: cycle the active base
    Mode,
    /// `H`: recall the next older result
    History,
    /// Unmapped held key; does nothing
    Blank,
}

impl Symbol {
    /// Parse the character form used by the keypad legend.
    ///
    /// Hex letters are accepted in either case; anything else is `None`.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let symbol = match c {
            '+' => Self::Op(Operator::Add),
            '-' => Self::Op(Operator::Sub),
            '*' | 'x' => Self::Op(Operator::Mul),
            '/' => Self::Op(Operator::Div),
            '=' => Self::Equals,
            'M' | 'm' => Self::Mode,
            'H' | 'h' => Self::History,
            ' ' => Self::Blank,
            _ => {
                let value = c.to_digit(16)?;
                Self::Digit(Digit::new(u8::try_from(value).ok()?)?)
            }
        };
        Some(symbol)
    }
}

const fn d(value: u8) -> Symbol {
    Symbol::Digit(Digit(value))
}

const fn op(o: Operator) -> Symbol {
    Symbol::Op(o)
}

/// Symbols for a short press, indexed by [`RawKey::index`].
#[rustfmt::skip]
const TAP_MAP: [Symbol; 16] = [
    d(7), d(8), d(9), op(Operator::Div),
    d(4), d(5), d(6), op(Operator::Mul),
    d(1), d(2), d(3), op(Operator::Sub),
    d(0), Symbol::History, Symbol::Equals, op(Operator::Add),
];

/// Symbols for a press-and-hold, indexed by [`RawKey::index`].
#[rustfmt::skip]
const HOLD_MAP: [Symbol; 16] = [
    Symbol::Mode, Symbol::Blank, Symbol::Blank, d(0xA),
    Symbol::Blank, Symbol::Blank, Symbol::Blank, d(0xB),
    Symbol::Blank, Symbol::Blank, Symbol::Blank, d(0xC),
    Symbol::Blank, d(0xF), d(0xE), d(0xD),
];

/// Map a classified key press to its symbol.
#[must_use]
pub fn decode(key: RawKey, held: bool) -> Symbol {
    let map = if held { &HOLD_MAP } else { &TAP_MAP };
    map.get(usize::from(key.index()))
        .copied()
        .unwrap_or(Symbol::Blank)
}

/// The key (and whether it must be held) that produces `symbol`.
///
/// The inverse of [`decode`]; `Blank` has no unique key and returns `None`.
#[must_use]
pub fn key_for(symbol: Symbol) -> Option<(RawKey, bool)> {
    if symbol == Symbol::Blank {
        return None;
    }
    for (held, map) in [(false, &TAP_MAP), (true, &HOLD_MAP)] {
        if let Some(pos) = map.iter().position(|s| *s == symbol) {
            let key = RawKey::try_new(u8::try_from(pos).ok()?).ok()?;
            return Some((key, held));
        }
    }
    None
}
