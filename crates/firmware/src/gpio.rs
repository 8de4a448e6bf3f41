//! GPIO-backed peripherals over `embedded-hal` 1.0 pins.
//!
//! # Wiring
//!
//! | Signal             | Lines | Notes                                         |
//! |--------------------|-------|-----------------------------------------------|
//! | Keypad drive       | 4     | push-pull, idle high, pulled low one at a time |
//! | Keypad sense       | 4     | input with pull-up; low = key at crossing      |
//! | Segments a..g, dp  | 8     | high = lit (common cathode)                    |
//! | Digit select       | 3     | binary cell index into a 3-to-8 decoder        |
//! | Auxiliary button   | 1     | optional; either polarity                      |

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use platform::{AuxButton, DigitIndex, KeyMatrix, RawKey, SegmentDriver};

/// Keypad drive/sense lines per side.
pub const MATRIX_LINES: usize = 4;

/// Segment output lines: a..g then dp.
pub const SEGMENT_LINES: usize = 8;

/// Digit-select lines.
pub const SELECT_LINES: usize = 3;

const SEGMENT_MASKS: [u8; SEGMENT_LINES] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80];
const SELECT_MASKS: [u8; SELECT_LINES] = [0x01, 0x02, 0x04];

// ---------------------------------------------------------------------------
// MatrixKeypad
// ---------------------------------------------------------------------------

/// A pin failed while scanning the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeypadPinError<D, S> {
    /// Driving a drive line failed.
    Drive(D),
    /// Reading a sense line failed.
    Sense(S),
}

/// 4×4 keypad scanned by pulling one drive line low at a time.
///
/// The first key found wins; the drive line is released before returning.
pub struct MatrixKeypad<O, I> {
    drive: [O; MATRIX_LINES],
    sense: [I; MATRIX_LINES],
}

impl<O: OutputPin, I: InputPin> MatrixKeypad<O, I> {
    /// Take ownership of the drive and sense lines. Drive lines must start
    /// high.
    pub fn new(drive: [O; MATRIX_LINES], sense: [I; MATRIX_LINES]) -> Self {
        Self { drive, sense }
    }

    /// Give the pins back.
    pub fn release(self) -> ([O; MATRIX_LINES], [I; MATRIX_LINES]) {
        (self.drive, self.sense)
    }

    fn first_low(sense: &mut [I; MATRIX_LINES]) -> Result<Option<usize>, I::Error> {
        for (line, pin) in sense.iter_mut().enumerate() {
            if pin.is_low()? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}

impl<O: OutputPin, I: InputPin> KeyMatrix for MatrixKeypad<O, I> {
    type Error = KeypadPinError<O::Error, I::Error>;

    fn scan(&mut self) -> Result<Option<RawKey>, Self::Error> {
        for (drive, line) in self.drive.iter_mut().enumerate() {
            line.set_low().map_err(KeypadPinError::Drive)?;
            let hit = Self::first_low(&mut self.sense);
            line.set_high().map_err(KeypadPinError::Drive)?;
            if let Some(sense) = hit.map_err(KeypadPinError::Sense)? {
                return Ok(RawKey::from_lines(drive, sense));
            }
        }
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// PinButton
// ---------------------------------------------------------------------------

/// One push button on an input pin, used as the keypad's auxiliary key.
pub struct PinButton<I> {
    pin: I,
    active_high: bool,
}

impl<I: InputPin> PinButton<I> {
    /// A button that reads high while pressed (external pull-down).
    pub fn active_high(pin: I) -> Self {
        Self {
            pin,
            active_high: true,
        }
    }

    /// A button that reads low while pressed (pull-up).
    pub fn active_low(pin: I) -> Self {
        Self {
            pin,
            active_high: false,
        }
    }

    /// Give the pin back.
    pub fn release(self) -> I {
        self.pin
    }
}

impl<I: InputPin> AuxButton for PinButton<I> {
    type Error = I::Error;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pin.is_high()? == self.active_high)
    }
}

// ---------------------------------------------------------------------------
// SegmentPort
// ---------------------------------------------------------------------------

/// Segment and digit-select output lines.
pub struct SegmentPort<P> {
    segments: [P; SEGMENT_LINES],
    select: [P; SELECT_LINES],
}

impl<P: OutputPin> SegmentPort<P> {
    /// Take ownership of the segment lines (a first) and the select lines
    /// (least significant bit first).
    pub fn new(segments: [P; SEGMENT_LINES], select: [P; SELECT_LINES]) -> Self {
        Self { segments, select }
    }

    /// Give the pins back.
    pub fn release(self) -> ([P; SEGMENT_LINES], [P; SELECT_LINES]) {
        (self.segments, self.select)
    }
}

impl<P: OutputPin> SegmentDriver for SegmentPort<P> {
    type Error = P::Error;

    fn drive_segments(&mut self, pattern: u8) -> Result<(), Self::Error> {
        for (pin, mask) in self.segments.iter_mut().zip(SEGMENT_MASKS) {
            pin.set_state(PinState::from(pattern & mask != 0))?;
        }
        Ok(())
    }

    fn select_digit(&mut self, position: DigitIndex) -> Result<(), Self::Error> {
        for (pin, mask) in self.select.iter_mut().zip(SELECT_MASKS) {
            pin.set_state(PinState::from(position.get() & mask != 0))?;
        }
        Ok(())
    }
}
