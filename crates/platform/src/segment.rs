//! Seven-segment output abstraction

use crate::types::DigitIndex;

/// Output sinks for one multiplexed 7-segment display.
///
/// Only one cell is lit at a time. The refresh task calls
/// [`drive_segments`](SegmentDriver::drive_segments) followed by
/// [`select_digit`](SegmentDriver::select_digit) once per tick.
pub trait SegmentDriver {
    /// Error type
    type Error;

    /// Put `pattern` on the segment lines.
    ///
    /// Bit 0 is segment a, bit 6 is segment g, bit 7 is the decimal point.
    /// A pattern of 0 turns every segment off.
    fn drive_segments(&mut self, pattern: u8) -> Result<(), Self::Error>;

    /// Latch the digit-select lines to `position`.
    fn select_digit(&mut self, position: DigitIndex) -> Result<(), Self::Error>;
}

impl<T: SegmentDriver + ?Sized> SegmentDriver for &mut T {
    type Error = T::Error;

    fn drive_segments(&mut self, pattern: u8) -> Result<(), Self::Error> {
        (**self).drive_segments(pattern)
    }

    fn select_digit(&mut self, position: DigitIndex) -> Result<(), Self::Error> {
        (**self).select_digit(position)
    }
}
