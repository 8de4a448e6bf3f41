//! Desktop emulator peripherals.
//!
//! [`ChannelKeypad`] turns characters typed on the terminal into the raw
//! sample stream a physical press would produce, so the real decoder
//! (debounce, tap/hold) runs unchanged. [`TerminalSegments`] latches what the
//! multiplexer drives and renders the lit cells as ASCII art.

use std::collections::VecDeque;

use calculator::symbol::key_for;
use calculator::Symbol;
use platform::config::{DEBOUNCE_SAMPLES, DIGIT_COUNT, HOLD_THRESHOLD};
use platform::{DigitIndex, KeyMatrix, RawKey, SegmentDriver};
use tokio::sync::mpsc;

/// The sending side hung up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputClosed;

impl core::fmt::Display for InputClosed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("keyboard input closed")
    }
}

impl std::error::Error for InputClosed {}

/// Keypad fed by characters from a channel.
///
/// Keypad legend characters (`0`-`9`, `A`-`F`, `+ - * / = M H`) become a
/// press of the matching key; keys that live on the hold layer are held.
/// Anything else is ignored.
pub struct ChannelKeypad {
    rx: mpsc::Receiver<char>,
    pending: VecDeque<Option<RawKey>>,
}

impl ChannelKeypad {
    /// Read characters from `rx`.
    pub fn new(rx: mpsc::Receiver<char>) -> Self {
        Self {
            rx,
            pending: VecDeque::new(),
        }
    }

    /// Queue the samples for one press of the key that types `c`.
    /// Returns `false` when `c` is not on the keypad.
    pub fn press_char(&mut self, c: char) -> bool {
        let Some((key, held)) = Symbol::from_char(c).and_then(key_for) else {
            return false;
        };
        let down = usize::from(DEBOUNCE_SAMPLES).saturating_add(if held {
            usize::from(HOLD_THRESHOLD).saturating_add(1)
        } else {
            1
        });
        self.pending
            .extend(core::iter::repeat(Some(key)).take(down));
        self.pending.push_back(None);
        true
    }
}

impl KeyMatrix for ChannelKeypad {
    type Error = InputClosed;

    fn scan(&mut self) -> Result<Option<RawKey>, Self::Error> {
        while self.pending.is_empty() {
            let c = self.rx.blocking_recv().ok_or(InputClosed)?;
            if !self.press_char(c) && !c.is_whitespace() {
                tracing::warn!(%c, "not a keypad key");
            }
        }
        Ok(self.pending.pop_front().flatten())
    }
}

/// Segment sink that remembers the pattern last lit on every cell.
#[derive(Debug, Default, Clone)]
pub struct TerminalSegments {
    pattern: u8,
    lit: [u8; DIGIT_COUNT],
}

impl TerminalSegments {
    /// All cells dark.
    pub fn new() -> Self {
        Self::default()
    }

    /// Patterns as last lit, leftmost first.
    pub fn lit(&self) -> [u8; DIGIT_COUNT] {
        self.lit
    }

    /// Render the lit cells as three lines of ASCII art.
    pub fn render(&self) -> String {
        segment_art(&self.lit)
    }
}

impl SegmentDriver for TerminalSegments {
    type Error = core::convert::Infallible;

    fn drive_segments(&mut self, pattern: u8) -> Result<(), Self::Error> {
        self.pattern = pattern;
        Ok(())
    }

    fn select_digit(&mut self, position: DigitIndex) -> Result<(), Self::Error> {
        if let Some(cell) = self.lit.get_mut(position.as_usize()) {
            *cell = self.pattern;
        }
        Ok(())
    }
}

/// Draw 7-segment patterns as three text rows.
///
/// ```text
///  _       _
/// |_|  |   _|
///  _|  |. |_
/// ```
pub fn segment_art(cells: &[u8]) -> String {
    let on = |bits: u8, mask: u8, c: char| if bits & mask != 0 { c } else { ' ' };
    let mut rows = [String::new(), String::new(), String::new()];
    for &bits in cells {
        let [top, middle, bottom] = &mut rows;
        top.extend([' ', on(bits, 0x01, '_'), ' ', ' ']);
        middle.extend([on(bits, 0x20, '|'), on(bits, 0x40, '_'), on(bits, 0x02, '|'), ' ']);
        bottom.extend([on(bits, 0x10, '|'), on(bits, 0x08, '_'), on(bits, 0x04, '|'), on(bits, 0x80, '.')]);
    }
    let [top, middle, bottom] = rows;
    format!("{}\n{}\n{}", top.trim_end(), middle.trim_end(), bottom.trim_end())
}
