//! Shared display frame between the foreground loop and the refresh task.
//!
//! The foreground publishes a whole [`DisplayBuffer`] at once; the refresh
//! task reads one cell per tick. Both sides go through a critical section,
//! so a reader never observes half of an update.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use platform::DigitIndex;

use crate::glyph::Segments;
use crate::render::DisplayBuffer;

#[derive(Clone, Copy)]
struct Published {
    buffer: DisplayBuffer,
    generation: u32,
}

/// Display buffer behind a critical-section mutex.
///
/// Declare one as a `static` and hand `&'static FrameCell` to both sides.
///
/// ```
/// use calculator::frame::FrameCell;
/// use calculator::render::{render_value, DisplayBuffer};
/// use calculator::symbol::Base;
///
/// static FRAME: FrameCell = FrameCell::new();
///
/// let buf = render_value(42, Base::Decimal, None).unwrap_or(DisplayBuffer::BLANK);
/// FRAME.publish(buf);
/// assert_eq!(FRAME.snapshot(), buf);
/// ```
pub struct FrameCell {
    inner: Mutex<CriticalSectionRawMutex, Cell<Published>>,
}

impl FrameCell {
    /// A blank frame.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(Published {
                buffer: DisplayBuffer::BLANK,
                generation: 0,
            })),
        }
    }

    /// Replace the whole frame.
    pub fn publish(&self, buffer: DisplayBuffer) {
        self.inner.lock(|cell| {
            let previous = cell.get();
            cell.set(Published {
                buffer,
                generation: previous.generation.wrapping_add(1),
            });
        });
    }

    /// One cell of the current frame; `None` is blank.
    pub fn cell(&self, position: DigitIndex) -> Option<Segments> {
        self.inner
            .lock(|cell| cell.get().buffer.cell(position.as_usize()))
    }

    /// A copy of the current frame.
    pub fn snapshot(&self) -> DisplayBuffer {
        self.inner.lock(|cell| cell.get().buffer)
    }

    /// Number of publishes so far, wrapping.
    pub fn generation(&self) -> u32 {
        self.inner.lock(|cell| cell.get().generation)
    }
}

impl Default for FrameCell {
    fn default() -> Self {
        Self::new()
    }
}
