//! Keypad decoder: debounce, tap/hold classification, symbol lookup.
//!
//! # Protocol
//!
//! ```text
//!            key k            k × DEBOUNCE          any key         none
//!   Idle ──────────► Sampling ───────────► Confirmed ─────► AwaitingRelease ─────► press
//!    ▲                  │ none                  │ none          (held += 1)
//!    └──────────────────┘                       └──────────────────────────────────► press
//! ```
//!
//! A press is a *hold* when more than [`KeypadConfig::hold_threshold`]
//! "still pressed" samples were seen before release, otherwise a *tap*.
//! Exactly one [`KeyPress`] is produced per physical actuation.
//!
//! [`KeyScanner`] is the state machine on its own, fed one sample at a time.
//! [`KeypadDecoder`] wraps it in the blocking loop the foreground thread
//! runs: it owns the thread until a full press-release cycle completes and
//! has no timeout.

use embedded_hal::delay::DelayNs;
use platform::config::{DEBOUNCE_SAMPLES, HOLD_THRESHOLD, SAMPLE_INTERVAL_US};
use platform::{KeyMatrix, RawKey};

use crate::symbol::{self, Symbol};

// ---------------------------------------------------------------------------
// KeypadConfig
// ---------------------------------------------------------------------------

/// Timing parameters for the keypad decoder.
///
/// ```
/// use calculator::keypad::KeypadConfig;
///
/// let config = KeypadConfig::default()
///     .with_debounce_samples(5)
///     .with_hold_threshold(200);
/// assert_eq!(config.debounce_samples(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeypadConfig {
    debounce_samples: u16,
    hold_threshold: u16,
    sample_interval_us: u32,
}

impl KeypadConfig {
    /// Set the number of identical samples that confirm a key.
    ///
    /// Values below 1 are raised to 1.
    #[must_use]
    pub fn with_debounce_samples(mut self, samples: u16) -> Self {
        self.debounce_samples = samples.max(1);
        self
    }

    /// Set the "still pressed" count above which a press is a hold.
    #[must_use]
    pub fn with_hold_threshold(mut self, samples: u16) -> Self {
        self.hold_threshold = samples;
        self
    }

    /// Set the delay between samples.
    #[must_use]
    pub fn with_sample_interval_us(mut self, micros: u32) -> Self {
        self.sample_interval_us = micros;
        self
    }

    /// Identical samples that confirm a key.
    pub fn debounce_samples(&self) -> u16 {
        self.debounce_samples
    }

    /// "Still pressed" samples above which a press is a hold.
    pub fn hold_threshold(&self) -> u16 {
        self.hold_threshold
    }

    /// Delay between samples in microseconds.
    pub fn sample_interval_us(&self) -> u32 {
        self.sample_interval_us
    }
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            debounce_samples: DEBOUNCE_SAMPLES,
            hold_threshold: HOLD_THRESHOLD,
            sample_interval_us: SAMPLE_INTERVAL_US,
        }
    }
}

// ---------------------------------------------------------------------------
// KeyScanner — explicit state machine
// ---------------------------------------------------------------------------

/// A classified key actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPress {
    /// The key that was pressed.
    pub key: RawKey,
    /// `true` for press-and-hold, `false` for a tap.
    pub held: bool,
}

impl KeyPress {
    /// The calculator symbol for this press.
    #[must_use]
    pub fn symbol(self) -> Symbol {
        symbol::decode(self.key, self.held)
    }
}

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanState {
    /// No key down.
    Idle,
    /// `key` seen `count` times in a row.
    Sampling {
        /// Candidate key.
        key: RawKey,
        /// Consecutive matching samples so far.
        count: u16,
    },
    /// `key` passed debouncing; nothing counted toward a hold yet.
    Confirmed {
        /// Debounced key.
        key: RawKey,
    },
    /// Waiting for release while counting samples with a key still down.
    AwaitingRelease {
        /// Debounced key.
        key: RawKey,
        /// "Still pressed" samples so far.
        held: u16,
    },
}

/// Debounce and tap/hold state machine, fed one raw sample at a time.
#[derive(Debug, Clone)]
pub struct KeyScanner {
    config: KeypadConfig,
    state: ScanState,
}

impl KeyScanner {
    /// Create an idle scanner.
    pub fn new(config: KeypadConfig) -> Self {
        Self {
            config,
            state: ScanState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Timing parameters.
    pub fn config(&self) -> &KeypadConfig {
        &self.config
    }

    /// Drop any press in progress.
    pub fn reset(&mut self) {
        self.state = ScanState::Idle;
    }

    /// Advance with one raw sample; returns a press once the key is released.
    pub fn feed(&mut self, sample: Option<RawKey>) -> Option<KeyPress> {
        let (next, press) = match (self.state, sample) {
            (ScanState::Idle, None) => (ScanState::Idle, None),
            (ScanState::Idle, Some(key)) => (self.sampling(key, 0), None),

            // Release while bouncing: treat as a glitch.
            (ScanState::Sampling { .. }, None) => (ScanState::Idle, None),
            (ScanState::Sampling { key, count }, Some(seen)) if seen == key => {
                (self.sampling(key, count), None)
            }
            // A different key restarts debouncing with that key.
            (ScanState::Sampling { .. }, Some(seen)) => (self.sampling(seen, 0), None),

            (ScanState::Confirmed { key }, None) => {
                (ScanState::Idle, Some(KeyPress { key, held: false }))
            }
            (ScanState::Confirmed { key }, Some(_)) => {
                (ScanState::AwaitingRelease { key, held: 1 }, None)
            }

            (ScanState::AwaitingRelease { key, held }, None) => (
                ScanState::Idle,
                Some(KeyPress {
                    key,
                    held: held > self.config.hold_threshold,
                }),
            ),
            (ScanState::AwaitingRelease { key, held }, Some(_)) => (
                ScanState::AwaitingRelease {
                    key,
                    held: held.saturating_add(1),
                },
                None,
            ),
        };

        #[cfg(feature = "defmt")]
        if next != self.state {
            defmt::trace!("keypad: {} -> {}", self.state, next);
        }

        self.state = next;
        press
    }

    /// One more matching sample of `key` after `count` matches.
    fn sampling(&self, key: RawKey, count: u16) -> ScanState {
        let count = count.saturating_add(1);
        if count >= self.config.debounce_samples {
            ScanState::Confirmed { key }
        } else {
            ScanState::Sampling { key, count }
        }
    }
}

impl Default for KeyScanner {
    fn default() -> Self {
        Self::new(KeypadConfig::default())
    }
}

// ---------------------------------------------------------------------------
// KeypadDecoder — blocking foreground driver
// ---------------------------------------------------------------------------

/// Blocking keypad decoder over a [`KeyMatrix`].
///
/// Sleeps [`KeypadConfig::sample_interval_us`] between samples through the
/// supplied [`DelayNs`], which sets how long a hold actually is.
pub struct KeypadDecoder<M, D> {
    matrix: M,
    delay: D,
    scanner: KeyScanner,
}

impl<M: KeyMatrix, D: DelayNs> KeypadDecoder<M, D> {
    /// Create a decoder with default timing.
    pub fn new(matrix: M, delay: D) -> Self {
        Self::with_config(matrix, delay, KeypadConfig::default())
    }

    /// Create a decoder with explicit timing.
    pub fn with_config(matrix: M, delay: D, config: KeypadConfig) -> Self {
        Self {
            matrix,
            delay,
            scanner: KeyScanner::new(config),
        }
    }

    /// Block until one key has been pressed and released, then classify it.
    ///
    /// # Errors
    ///
    /// Propagates the first matrix scan error; the press in progress is
    /// discarded.
    pub fn poll_press(&mut self) -> Result<KeyPress, M::Error> {
        loop {
            let sample = match self.matrix.scan() {
                Ok(sample) => sample,
                Err(e) => {
                    self.scanner.reset();
                    return Err(e);
                }
            };
            if let Some(press) = self.scanner.feed(sample) {
                #[cfg(feature = "defmt")]
                defmt::debug!("keypad: key={} held={}", press.key, press.held);
                return Ok(press);
            }
            self.delay.delay_us(self.scanner.config().sample_interval_us());
        }
    }

    /// Block until one key has been pressed and released, then decode it.
    ///
    /// # Errors
    ///
    /// Propagates matrix scan errors, see [`poll_press`](Self::poll_press).
    pub fn poll_key(&mut self) -> Result<Symbol, M::Error> {
        self.poll_press().map(KeyPress::symbol)
    }

    /// Access the underlying matrix.
    pub fn matrix_mut(&mut self) -> &mut M {
        &mut self.matrix
    }

    /// Split back into the matrix and the delay.
    pub fn release(self) -> (M, D) {
        (self.matrix, self.delay)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn key(i: u8) -> RawKey {
        RawKey::try_new(i).unwrap()
    }

    fn feed_n(scanner: &mut KeyScanner, sample: Option<RawKey>, n: usize) -> Option<KeyPress> {
        let mut out = None;
        for _ in 0..n {
            if let Some(p) = scanner.feed(sample) {
                out = Some(p);
            }
        }
        out
    }

    #[test]
    fn test_scanner_confirms_after_debounce_samples() {
        let mut s = KeyScanner::new(KeypadConfig::default().with_debounce_samples(3));
        s.feed(Some(key(4)));
        s.feed(Some(key(4)));
        assert!(matches!(s.state(), ScanState::Sampling { count: 2, .. }));
        s.feed(Some(key(4)));
        assert_eq!(s.state(), ScanState::Confirmed { key: key(4) });
    }

    #[test]
    fn test_scanner_release_while_bouncing_is_glitch() {
        let mut s = KeyScanner::default();
        assert!(feed_n(&mut s, Some(key(1)), 5).is_none());
        assert!(s.feed(None).is_none());
        assert_eq!(s.state(), ScanState::Idle);
    }

    #[test]
    fn test_scanner_other_key_restarts_debounce() {
        let mut s = KeyScanner::default();
        feed_n(&mut s, Some(key(1)), 5);
        s.feed(Some(key(2)));
        assert_eq!(
            s.state(),
            ScanState::Sampling {
                key: key(2),
                count: 1
            }
        );
    }

    #[test]
    fn test_scanner_tap() {
        let mut s = KeyScanner::default();
        assert!(feed_n(&mut s, Some(key(7)), 20).is_none());
        let press = s.feed(None).unwrap();
        assert_eq!(
            press,
            KeyPress {
                key: key(7),
                held: false
            }
        );
        assert_eq!(s.state(), ScanState::Idle);
    }

    #[test]
    fn test_scanner_hold_needs_more_than_threshold() {
        let config = KeypadConfig::default()
            .with_debounce_samples(2)
            .with_hold_threshold(5);

        // 2 debounce + exactly 5 still-pressed samples: not a hold
        let mut s = KeyScanner::new(config);
        feed_n(&mut s, Some(key(0)), 7);
        assert!(!s.feed(None).unwrap().held);

        // one more still-pressed sample tips it over
        let mut s = KeyScanner::new(config);
        feed_n(&mut s, Some(key(0)), 8);
        assert!(s.feed(None).unwrap().held);
    }

    #[test]
    fn test_scanner_counts_any_key_while_awaiting_release() {
        let config = KeypadConfig::default()
            .with_debounce_samples(1)
            .with_hold_threshold(2);
        let mut s = KeyScanner::new(config);
        s.feed(Some(key(0)));
        feed_n(&mut s, Some(key(9)), 3);
        let press = s.feed(None).unwrap();
        assert_eq!(press.key, key(0));
        assert!(press.held);
    }

    #[test]
    fn test_scan_error_mid_press_discards_the_press() {
        use embedded_hal_mock::eh1::delay::NoopDelay;
        use platform::mocks::{ScriptExhausted, ScriptedMatrix};

        // key 3 confirmed and still down when the matrix fails
        let mut matrix = ScriptedMatrix::new();
        for _ in 0..ScriptedMatrix::TAP_SAMPLES {
            matrix.sample(Some(key(3)));
        }
        let mut decoder = KeypadDecoder::new(matrix, NoopDelay::new());
        assert_eq!(decoder.poll_press(), Err(ScriptExhausted));

        // the next press decodes on its own instead of finishing key 3
        decoder.matrix_mut().tap(key(5));
        assert_eq!(
            decoder.poll_press().unwrap(),
            KeyPress {
                key: key(5),
                held: false
            }
        );
    }

    #[test]
    fn test_config_debounce_floor_is_one() {
        assert_eq!(
            KeypadConfig::default()
                .with_debounce_samples(0)
                .debounce_samples(),
            1
        );
    }
}
