//! Keypad calculator firmware
//!
//! Application layer for the 4×4-keypad, 8-digit 7-segment calculator.
//!
//! # Architecture
//!
//! ```text
//! Foreground (thread mode, blocking)        Refresh (interrupt executor, 250 Hz)
//!   App::run                                  Multiplexer::on_tick
//!     KeypadDecoder ─► Calculator ─► FrameCell ◄─┘
//!         ↑                                        ↓
//!   MatrixKeypad (GPIO)                      SegmentPort (GPIO)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for the STM32H7 target (embassy, defmt)
//! - `emulator` - Build the desktop emulator (tokio, tracing)
//! - `std` - Enable standard library (for emulator and testing)
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf --features hardware
//! ```
//!
//! ## Emulator Target
//!
//! ```bash
//! cargo run --example calculator_emulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// unsafe fn body is not implicitly unsafe block
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

pub mod app;
pub mod gpio;

#[cfg(feature = "emulator")]
pub mod emulator;

pub use app::App;
pub use gpio::{KeypadPinError, MatrixKeypad, PinButton, SegmentPort};
