//! Peripheral abstraction layer for the keypad calculator
//!
//! This crate provides trait-based abstractions for the three peripherals the
//! calculator engine touches, enabling development and testing without the
//! board.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: foreground loop, refresh task)
//!         ↓
//! Calculator engine (calculator crate)
//!         ↓
//! Peripheral abstraction (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (embedded-hal pins, Embassy HAL)
//! ```
//!
//! # Peripherals
//!
//! - [`KeyMatrix`] - one raw scan of the 4×4 keypad
//! - [`AuxButton`] - optional extra push button
//! - [`SegmentDriver`] - segment and digit-select output lines
//!
//! # Features
//!
//! - `std`: host mocks in [`mocks`]
//! - `defmt`: `defmt::Format` derives on all platform types
//!
//! # Example
//!
//! ```no_run
//! use platform::{KeyMatrix, RawKey};
//!
//! fn first_key<M: KeyMatrix>(matrix: &mut M) -> Result<RawKey, M::Error> {
//!     loop {
//!         if let Some(key) = matrix.scan()? {
//!             return Ok(key);
//!         }
//!     }
//! }
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
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod config;
pub mod keypad;
pub mod mocks;
pub mod segment;
pub mod types;

pub use keypad::{AuxButton, AuxScanError, KeyMatrix, WithAuxButton};
pub use segment::SegmentDriver;
pub use types::{DigitIndex, OutOfRangeError, RawKey};
