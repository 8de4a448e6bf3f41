//! Keypad input abstraction

use crate::types::RawKey;

/// A 4×4 key matrix that can be scanned once.
///
/// One call to [`scan`](KeyMatrix::scan) is one pass over all drive lines with
/// no debouncing; the calculator's decoder samples repeatedly to debounce and
/// to measure how long a key is held.
pub trait KeyMatrix {
    /// Error type
    type Error;

    /// Return the currently pressed key, or `None` when no key is down.
    ///
    /// When several keys are down, the first one found in scan order wins.
    fn scan(&mut self) -> Result<Option<RawKey>, Self::Error>;
}

impl<T: KeyMatrix + ?Sized> KeyMatrix for &mut T {
    type Error = T::Error;

    fn scan(&mut self) -> Result<Option<RawKey>, Self::Error> {
        (**self).scan()
    }
}

/// A single extra push button outside the matrix.
pub trait AuxButton {
    /// Error type
    type Error;

    /// `true` while the button is held down.
    fn is_pressed(&mut self) -> Result<bool, Self::Error>;
}

/// Errors from a [`WithAuxButton`] scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuxScanError<M, B> {
    /// The key matrix failed.
    Matrix(M),
    /// The auxiliary button failed.
    Button(B),
}

/// A key matrix with an auxiliary button that acts as one extra key source.
///
/// The matrix has priority; the button is only consulted when no matrix key
/// is down, and then reports as `alias`.
pub struct WithAuxButton<M, B> {
    matrix: M,
    button: B,
    alias: RawKey,
}

impl<M, B> WithAuxButton<M, B> {
    /// Combine `matrix` and `button`; the button reports as `alias`.
    pub fn new(matrix: M, button: B, alias: RawKey) -> Self {
        Self {
            matrix,
            button,
            alias,
        }
    }

    /// The key index the button reports as.
    pub fn alias(&self) -> RawKey {
        self.alias
    }

    /// Split back into the matrix and the button.
    pub fn release(self) -> (M, B) {
        (self.matrix, self.button)
    }
}

impl<M: KeyMatrix, B: AuxButton> KeyMatrix for WithAuxButton<M, B> {
    type Error = AuxScanError<M::Error, B::Error>;

    fn scan(&mut self) -> Result<Option<RawKey>, Self::Error> {
        if let Some(key) = self.matrix.scan().map_err(AuxScanError::Matrix)? {
            return Ok(Some(key));
        }
        let pressed = self.button.is_pressed().map_err(AuxScanError::Button)?;
        Ok(pressed.then_some(self.alias))
    }
}
