//! Application configuration and constants
//!
//! Central build-time configuration used across the calculator. Nothing here
//! is runtime-adjustable and nothing is persisted; every value resets with
//! the MCU.

use embassy_time::Duration;

/// The application name
pub const APP_NAME: &str = "Keypad Calculator";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Display ──────────────────────────────────────────────────────────────────

/// Number of 7-segment cells on the display.
pub const DIGIT_COUNT: usize = 8;

/// Multiplexer tick frequency. Each cell is lit `REFRESH_HZ / DIGIT_COUNT`
/// times per second (~31 Hz at 250 Hz).
pub const REFRESH_HZ: u64 = 250;

/// Tick period of the display multiplexer.
pub const fn refresh_period() -> Duration {
    Duration::from_hz(REFRESH_HZ)
}

// ── Keypad ───────────────────────────────────────────────────────────────────

/// Keys on the matrix (4 drive × 4 sense lines).
pub const KEY_COUNT: usize = 16;

/// Consecutive identical samples required to accept a key.
pub const DEBOUNCE_SAMPLES: u16 = 10;

/// "Still pressed" samples above which a press counts as a hold.
pub const HOLD_THRESHOLD: u16 = 1000;

/// Delay between two keypad samples, in microseconds.
///
/// With [`HOLD_THRESHOLD`] this puts the tap/hold boundary at ~0.5 s.
pub const SAMPLE_INTERVAL_US: u32 = 500;

// ── Calculator ───────────────────────────────────────────────────────────────

/// Maximum symbols in one expression.
pub const EXPRESSION_CAPACITY: usize = 15;

/// Depth of the evaluator's operand and operator stacks.
pub const STACK_CAPACITY: usize = 8;

/// Results kept in the history ring.
pub const HISTORY_CAPACITY: usize = 3;

/// Full application title
pub const fn app_title() -> &'static str {
    APP_NAME
}
