//! The foreground loop.
//!
//! Blocks on the keypad for one symbol, hands it to the [`Calculator`], and
//! publishes the new display buffer whenever the symbol was accepted. This is
//! the only writer of the [`FrameCell`]; the refresh task only reads it.

use core::convert::Infallible;

use calculator::{Admission, Calculator, FrameCell, KeypadDecoder, Symbol};
use embedded_hal::delay::DelayNs;
use platform::KeyMatrix;

/// Foreground state: keypad decoder, calculator, and the shared frame.
pub struct App<'a, M, D> {
    decoder: KeypadDecoder<M, D>,
    calculator: Calculator,
    frame: &'a FrameCell,
}

impl<'a, M: KeyMatrix, D: DelayNs> App<'a, M, D> {
    /// Wire a decoder to `frame` with a fresh calculator.
    pub fn new(decoder: KeypadDecoder<M, D>, frame: &'a FrameCell) -> Self {
        let calculator = Calculator::new();
        frame.publish(calculator.display());
        Self {
            decoder,
            calculator,
            frame,
        }
    }

    /// Handle one key press.
    ///
    /// # Errors
    ///
    /// Keypad scan errors; calculator state is untouched.
    pub fn step(&mut self) -> Result<(Symbol, Admission), M::Error> {
        let symbol = self.decoder.poll_key()?;
        let admission = self.apply(symbol);
        Ok((symbol, admission))
    }

    /// Feed `symbol` as if it had been typed.
    pub fn apply(&mut self, symbol: Symbol) -> Admission {
        let admission = self.calculator.handle(symbol);
        if admission.is_accepted() {
            self.frame.publish(self.calculator.display());
        }

        #[cfg(feature = "emulator")]
        tracing::debug!(?symbol, ?admission, "key handled");

        admission
    }

    /// Run forever, returning only on a keypad error.
    ///
    /// # Errors
    ///
    /// The first keypad scan error.
    pub fn run(&mut self) -> Result<Infallible, M::Error> {
        loop {
            self.step()?;
        }
    }

    /// The calculator state.
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }
}
