//! Calculator engine for a 4×4 keypad and an 8-digit 7-segment display
//!
//! Everything between a raw key index and the glyphs on the display:
//!
//! ```text
//! KeyMatrix ──► KeypadDecoder ──► Symbol ──► Calculator ──► DisplayBuffer ──► FrameCell
//!                                             │  ExpressionBuffer                 │
//!                                             │  evaluate()                       ▼
//!                                             └─ HistoryRing              Multiplexer ──► SegmentDriver
//! ```
//!
//! The foreground side (decoder and [`Calculator`]) is blocking and owns all
//! calculator state. The refresh side ([`Multiplexer`]) only ever sees the
//! [`FrameCell`], one cell per tick.
//!
//! # Example
//!
//! ```
//! use calculator::{Calculator, Symbol};
//! use calculator::render::render_value;
//! use calculator::symbol::Base;
//!
//! let mut calc = Calculator::new();
//! for c in "7+3*2=".chars() {
//!     if let Some(symbol) = Symbol::from_char(c) {
//!         calc.handle(symbol);
//!     }
//! }
//! assert_eq!(Ok(calc.display()), render_value(13, Base::Decimal, None));
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod eval;
pub mod expression;
pub mod frame;
pub mod glyph;
pub mod history;
pub mod keypad;
pub mod multiplex;
pub mod render;
pub mod symbol;

pub use engine::Calculator;
pub use eval::{EvalError, EvalResult};
pub use expression::{Admission, Rejection};
pub use frame::FrameCell;
pub use glyph::Segments;
pub use keypad::{KeyPress, KeypadConfig, KeypadDecoder};
pub use multiplex::Multiplexer;
pub use render::{DisplayBuffer, RenderError};
pub use symbol::{Base, Symbol};
