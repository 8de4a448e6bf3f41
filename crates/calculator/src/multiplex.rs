//! Display multiplexer: one cell per refresh tick.
//!
//! Each tick puts the current cell's pattern on the segment lines, latches
//! the digit-select lines to that cell, and advances to the next cell,
//! wrapping after the last. The display is fully refreshed every
//! [`DIGIT_COUNT`](platform::config::DIGIT_COUNT) ticks.

use platform::{DigitIndex, SegmentDriver};

use crate::frame::FrameCell;

/// Drives a [`SegmentDriver`] from a [`FrameCell`].
pub struct Multiplexer<S> {
    driver: S,
    position: DigitIndex,
}

impl<S: SegmentDriver> Multiplexer<S> {
    /// Start at the leftmost cell.
    pub fn new(driver: S) -> Self {
        Self {
            driver,
            position: DigitIndex::FIRST,
        }
    }

    /// Light the next cell. A blank cell drives every segment off.
    ///
    /// # Errors
    ///
    /// Propagates driver errors. The position still advances so one bad
    /// line does not freeze the scan on a single cell.
    pub fn on_tick(&mut self, frame: &FrameCell) -> Result<(), S::Error> {
        let position = self.position;
        self.position = position.next();
        let pattern = frame.cell(position).map_or(0, |glyph| glyph.bits());
        self.driver.drive_segments(pattern)?;
        self.driver.select_digit(position)
    }

    /// The cell the next tick lights.
    pub fn position(&self) -> DigitIndex {
        self.position
    }

    /// Access the driver.
    pub fn driver_mut(&mut self) -> &mut S {
        &mut self.driver
    }

    /// Give back the driver.
    pub fn release(self) -> S {
        self.driver
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use platform::mocks::{RecordingSegments, SegmentEvent};

    use super::*;
    use crate::render::{render_literal, render_value, Word};
    use crate::symbol::Base;

    #[test]
    fn test_tick_drives_then_selects() {
        let frame = FrameCell::new();
        frame.publish(render_value(5, Base::Decimal, None).unwrap());
        let mut mux = Multiplexer::new(RecordingSegments::new());
        for _ in 0..8 {
            mux.on_tick(&frame).unwrap();
        }
        let events = mux.driver_mut().events().to_vec();
        assert_eq!(events.len(), 16);
        assert_eq!(events[0], SegmentEvent::Segments(0));
        assert_eq!(events[1], SegmentEvent::Select(DigitIndex::FIRST));
        assert_eq!(events[14], SegmentEvent::Segments(0x6d));
        assert_eq!(events[15], SegmentEvent::Select(DigitIndex::LAST));
    }

    #[test]
    fn test_position_wraps() {
        let frame = FrameCell::new();
        let mut mux = Multiplexer::new(RecordingSegments::new());
        for _ in 0..9 {
            mux.on_tick(&frame).unwrap();
        }
        assert_eq!(mux.position(), DigitIndex::try_new(1).unwrap());
    }

    #[test]
    fn test_full_cycle_shows_frame() {
        let frame = FrameCell::new();
        frame.publish(render_literal(Word::Error));
        let mut mux = Multiplexer::new(RecordingSegments::new());
        for _ in 0..8 {
            mux.on_tick(&frame).unwrap();
        }
        assert_eq!(
            mux.driver_mut().lit(),
            [0x00, 0x00, 0x00, 0x79, 0x50, 0x50, 0x5c, 0x50]
        );
    }
}
