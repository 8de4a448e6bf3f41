//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use std::collections::VecDeque;
use std::vec::Vec;

use crate::config::{DEBOUNCE_SAMPLES, HOLD_THRESHOLD};
use crate::{AuxButton, DigitIndex, KeyMatrix, RawKey, SegmentDriver};

/// Returned by [`ScriptedMatrix`] once every scripted sample has been consumed.
///
/// A blocking decoder would otherwise spin forever on an idle keypad; ending
/// the script with an error lets tests terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptExhausted;

/// Mock key matrix that replays a fixed sequence of scan results.
#[derive(Debug, Default, Clone)]
pub struct ScriptedMatrix {
    samples: VecDeque<Option<RawKey>>,
    scans: usize,
}

impl ScriptedMatrix {
    /// Samples a key stays down for a tap: past debounce, well below a hold.
    pub const TAP_SAMPLES: usize = DEBOUNCE_SAMPLES as usize + 5;

    /// Samples a key stays down for a hold: past debounce and threshold.
    pub const HOLD_SAMPLES: usize = DEBOUNCE_SAMPLES as usize + HOLD_THRESHOLD as usize + 5;

    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one raw sample.
    pub fn sample(&mut self, key: Option<RawKey>) -> &mut Self {
        self.samples.push_back(key);
        self
    }

    /// Append `count` samples with `key` down, followed by one release sample.
    pub fn press_for(&mut self, key: RawKey, count: usize) -> &mut Self {
        self.samples
            .extend(core::iter::repeat(Some(key)).take(count));
        self.samples.push_back(None);
        self
    }

    /// Append a short press of `key`.
    pub fn tap(&mut self, key: RawKey) -> &mut Self {
        self.press_for(key, Self::TAP_SAMPLES)
    }

    /// Append a press-and-hold of `key`.
    pub fn hold(&mut self, key: RawKey) -> &mut Self {
        self.press_for(key, Self::HOLD_SAMPLES)
    }

    /// Number of scripted samples not yet consumed.
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }

    /// Total scans performed so far.
    pub fn scans(&self) -> usize {
        self.scans
    }
}

impl KeyMatrix for ScriptedMatrix {
    type Error = ScriptExhausted;

    fn scan(&mut self) -> Result<Option<RawKey>, Self::Error> {
        self.scans = self.scans.saturating_add(1);
        self.samples.pop_front().ok_or(ScriptExhausted)
    }
}

/// Mock auxiliary button that replays a sequence of levels.
///
/// Reports "released" once the sequence runs out.
#[derive(Debug, Default, Clone)]
pub struct MockAuxButton {
    levels: VecDeque<bool>,
}

impl MockAuxButton {
    /// Create a button that is never pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `count` readings of `pressed`.
    pub fn push_levels(&mut self, pressed: bool, count: usize) -> &mut Self {
        self.levels
            .extend(core::iter::repeat(pressed).take(count));
        self
    }
}

impl AuxButton for MockAuxButton {
    type Error = core::convert::Infallible;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        Ok(self.levels.pop_front().unwrap_or(false))
    }
}

/// One call observed by [`RecordingSegments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEvent {
    /// `drive_segments(pattern)`
    Segments(u8),
    /// `select_digit(position)`
    Select(DigitIndex),
}

/// Mock segment driver that records every call.
#[derive(Debug, Default, Clone)]
pub struct RecordingSegments {
    events: Vec<SegmentEvent>,
    pattern: u8,
    lit: [u8; crate::config::DIGIT_COUNT],
}

impl RecordingSegments {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in order.
    pub fn events(&self) -> &[SegmentEvent] {
        &self.events
    }

    /// The pattern most recently latched into each cell.
    ///
    /// After one full refresh cycle this mirrors what a viewer would see.
    pub fn lit(&self) -> [u8; crate::config::DIGIT_COUNT] {
        self.lit
    }

    /// Forget all recorded calls.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl SegmentDriver for RecordingSegments {
    type Error = core::convert::Infallible;

    fn drive_segments(&mut self, pattern: u8) -> Result<(), Self::Error> {
        self.pattern = pattern;
        self.events.push(SegmentEvent::Segments(pattern));
        Ok(())
    }

    fn select_digit(&mut self, position: DigitIndex) -> Result<(), Self::Error> {
        if let Some(cell) = self.lit.get_mut(position.as_usize()) {
            *cell = self.pattern;
        }
        self.events.push(SegmentEvent::Select(position));
        Ok(())
    }
}
