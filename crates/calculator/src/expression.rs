//! Expression buffer: the bounded infix expression being typed.
//!
//! Besides the terms themselves the buffer tracks the *live number*: the most
//! recent run of digits interpreted in the active base, which is what the
//! display shows while typing. An operator, `=`, or a mode change resets it.
//!
//! Every append reports an [`Admission`]. Rejections are silent to the user
//! (nothing on the display changes) but visible to callers and tests.

use heapless::Vec;
use platform::config::{DIGIT_COUNT, EXPRESSION_CAPACITY};

use crate::render;
use crate::symbol::{Base, Digit, Operator};

/// Why a symbol was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rejection {
    /// The expression buffer is full.
    BufferFull,
    /// The digit does not exist in the active base.
    InvalidDigit,
    /// The live number would no longer fit on the display.
    NumberTooWide,
    /// History recall with no stored results.
    HistoryEmpty,
    /// `=` with nothing typed.
    EmptyExpression,
    /// The symbol has no function (unmapped held key).
    NoOp,
}

impl Rejection {
    /// Short description for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BufferFull => "expression buffer full",
            Self::InvalidDigit => "digit not valid in base",
            Self::NumberTooWide => "number wider than display",
            Self::HistoryEmpty => "history empty",
            Self::EmptyExpression => "empty expression",
            Self::NoOp => "no-op",
        }
    }
}

/// Outcome of feeding one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Admission {
    /// The symbol took effect.
    Accepted,
    /// The symbol was dropped; state and display are unchanged.
    Rejected(Rejection),
}

impl Admission {
    /// `true` for [`Admission::Accepted`].
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// One element of an infix expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Term {
    /// A digit of a number
    Digit(Digit),
    /// An operator (binary, or a unary minus depending on position)
    Op(Operator),
}

/// Bounded infix expression plus the live number being typed.
#[derive(Debug, Clone, Default)]
pub struct ExpressionBuffer {
    terms: Vec<Term, EXPRESSION_CAPACITY>,
    live: i64,
}

impl ExpressionBuffer {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            terms: Vec::new(),
            live: 0,
        }
    }

    /// Append a digit if it is valid in `base`, fits in the buffer, and keeps
    /// the live number within the display width.
    pub fn push_digit(&mut self, digit: Digit, base: Base) -> Admission {
        if !digit.is_valid_in(base) {
            return Admission::Rejected(Rejection::InvalidDigit);
        }
        if self.terms.is_full() {
            return Admission::Rejected(Rejection::BufferFull);
        }
        let live = match self
            .live
            .checked_mul(i64::from(base.radix()))
            .and_then(|v| v.checked_add(i64::from(digit.value())))
        {
            Some(v) if render::digits_needed(v, base) <= DIGIT_COUNT => v,
            _ => return Admission::Rejected(Rejection::NumberTooWide),
        };
        if self.terms.push(Term::Digit(digit)).is_err() {
            return Admission::Rejected(Rejection::BufferFull);
        }
        self.live = live;
        Admission::Accepted
    }

    /// Append an operator and reset the live number.
    pub fn push_operator(&mut self, op: Operator) -> Admission {
        if self.terms.push(Term::Op(op)).is_err() {
            return Admission::Rejected(Rejection::BufferFull);
        }
        self.live = 0;
        Admission::Accepted
    }

    /// Empty the buffer and reset the live number.
    pub fn clear(&mut self) {
        self.terms.clear();
        self.live = 0;
    }

    /// The terms typed so far.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The live number (most recent digit run in the active base).
    pub fn live(&self) -> i64 {
        self.live
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// `true` when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Maximum number of terms.
    pub const fn capacity(&self) -> usize {
        EXPRESSION_CAPACITY
    }
}
