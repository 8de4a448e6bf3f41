//! The calculator dispatcher.
//!
//! [`Calculator`] owns every piece of foreground state: the active base, the
//! expression being typed, the result history, and the display buffer it
//! last rendered. [`Calculator::handle`] feeds it one decoded symbol and
//! reports whether that symbol took effect. Accepted symbols always leave a
//! freshly rendered buffer in [`Calculator::display`]; rejected ones leave
//! everything untouched.

use platform::config::HISTORY_CAPACITY;

use crate::eval::{self, EvalError, EvalResult};
use crate::expression::{Admission, ExpressionBuffer, Rejection};
use crate::history::HistoryRing;
use crate::render::{self, render_literal, DisplayBuffer, Word};
use crate::symbol::{Base, Digit, Operator, Symbol};

/// Foreground calculator state.
#[derive(Debug, Clone)]
pub struct Calculator {
    base: Base,
    expression: ExpressionBuffer,
    history: HistoryRing<EvalResult, HISTORY_CAPACITY>,
    display: DisplayBuffer,
    showing_error: bool,
}

impl Calculator {
    /// Base 10, nothing typed, blank display.
    pub const fn new() -> Self {
        Self {
            base: Base::Decimal,
            expression: ExpressionBuffer::new(),
            history: HistoryRing::new(),
            display: DisplayBuffer::BLANK,
            showing_error: false,
        }
    }

    /// Apply one symbol.
    pub fn handle(&mut self, symbol: Symbol) -> Admission {
        let admission = match symbol {
            Symbol::Digit(digit) => self.enter_digit(digit),
            Symbol::Op(op) => self.enter_operator(op),
            Symbol::Equals => self.equals(),
            Symbol::Mode => self.cycle_base(),
            Symbol::History => self.recall(),
            Symbol::Blank => Admission::Rejected(Rejection::NoOp),
        };

        #[cfg(feature = "defmt")]
        match admission {
            Admission::Accepted => defmt::trace!("calculator: {} accepted", symbol),
            Admission::Rejected(reason) => {
                defmt::debug!("calculator: {} rejected ({})", symbol, reason.as_str());
            }
        }

        admission
    }

    fn enter_digit(&mut self, digit: Digit) -> Admission {
        let admission = self.expression.push_digit(digit, self.base);
        if admission.is_accepted() {
            self.show(render::render_value(self.expression.live(), self.base, None).ok());
        }
        admission
    }

    fn enter_operator(&mut self, op: Operator) -> Admission {
        let admission = self.expression.push_operator(op);
        if admission.is_accepted() {
            self.show(Some(render_literal(Word::for_operator(op))));
        }
        admission
    }

    fn equals(&mut self) -> Admission {
        if self.expression.is_empty() {
            return Admission::Rejected(Rejection::EmptyExpression);
        }
        let outcome = eval::evaluate(self.expression.terms(), self.base);
        self.expression.clear();

        match outcome {
            Ok(result) => match render::render_result(&result, self.base) {
                Ok(buffer) => {
                    self.history.push(result);
                    self.show(Some(buffer));
                }
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("calculator: result {} does not fit: {}", result.value, _e);
                    self.show(None);
                }
            },
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("calculator: evaluation failed: {}", _e);
                self.show(None);
            }
        }
        Admission::Accepted
    }

    fn cycle_base(&mut self) -> Admission {
        self.base = self.base.next();
        self.expression.clear();
        #[cfg(feature = "defmt")]
        defmt::info!("calculator: base {}", self.base.radix());
        self.show(Some(render_literal(Word::Base(self.base))));
        Admission::Accepted
    }

    fn recall(&mut self) -> Admission {
        match self.history.scroll_back() {
            Some(result) => {
                self.show(render::render_result(&result, self.base).ok());
                Admission::Accepted
            }
            None => Admission::Rejected(Rejection::HistoryEmpty),
        }
    }

    /// Install `buffer`, or "Error" when there is nothing renderable.
    fn show(&mut self, buffer: Option<DisplayBuffer>) {
        self.showing_error = buffer.is_none();
        self.display = buffer.unwrap_or_else(|| render_literal(Word::Error));
    }

    /// The last rendered buffer.
    pub fn display(&self) -> DisplayBuffer {
        self.display
    }

    /// The active base.
    pub fn base(&self) -> Base {
        self.base
    }

    /// The expression typed so far.
    pub fn expression(&self) -> &ExpressionBuffer {
        &self.expression
    }

    /// Past results.
    pub fn history(&self) -> &HistoryRing<EvalResult, HISTORY_CAPACITY> {
        &self.history
    }

    /// `true` while "Error" is on the display.
    pub fn is_showing_error(&self) -> bool {
        self.showing_error
    }

    /// Evaluate the current expression without consuming it.
    ///
    /// # Errors
    ///
    /// Any [`EvalError`]; an empty expression is [`EvalError::Empty`].
    pub fn preview(&self) -> Result<EvalResult, EvalError> {
        eval::evaluate(self.expression.terms(), self.base)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::glyph::Segments;

    fn feed(calc: &mut Calculator, input: &str) -> Admission {
        let mut last = Admission::Accepted;
        for c in input.chars() {
            last = calc.handle(Symbol::from_char(c).unwrap());
        }
        last
    }

    fn value_display(value: i64, base: Base) -> DisplayBuffer {
        render::render_value(value, base, None).unwrap()
    }

    #[test]
    fn test_digits_show_live_number() {
        let mut calc = Calculator::new();
        feed(&mut calc, "42");
        assert_eq!(calc.display(), value_display(42, Base::Decimal));
    }

    #[test]
    fn test_operator_shows_mnemonic() {
        let mut calc = Calculator::new();
        feed(&mut calc, "4*");
        assert_eq!(calc.display(), render_literal(Word::Product));
    }

    #[test]
    fn test_equals_renders_and_records() {
        let mut calc = Calculator::new();
        feed(&mut calc, "7+3*2=");
        assert_eq!(calc.display(), value_display(13, Base::Decimal));
        assert_eq!(calc.history().newest(), Some(EvalResult::whole(13)));
        assert!(calc.expression().is_empty());
    }

    #[test]
    fn test_division_by_zero_shows_error_then_recovers() {
        let mut calc = Calculator::new();
        feed(&mut calc, "8/0=");
        assert!(calc.is_showing_error());
        assert_eq!(calc.display(), render_literal(Word::Error));
        assert!(calc.history().is_empty());

        feed(&mut calc, "5");
        assert!(!calc.is_showing_error());
        assert_eq!(calc.display(), value_display(5, Base::Decimal));
        assert_eq!(calc.expression().len(), 1);
    }

    #[test]
    fn test_result_too_wide_is_error() {
        let mut calc = Calculator::new();
        feed(&mut calc, "99999999*99=");
        assert!(calc.is_showing_error());
        assert!(calc.history().is_empty());
    }

    #[test]
    fn test_rejected_symbol_keeps_display() {
        let mut calc = Calculator::new();
        feed(&mut calc, "MM1");
        let before = calc.display();
        assert_eq!(
            calc.handle(Symbol::from_char('2').unwrap()),
            Admission::Rejected(Rejection::InvalidDigit)
        );
        assert_eq!(calc.display(), before);
    }

    #[test]
    fn test_empty_equals_and_history_rejected() {
        let mut calc = Calculator::new();
        assert_eq!(
            calc.handle(Symbol::Equals),
            Admission::Rejected(Rejection::EmptyExpression)
        );
        assert_eq!(
            calc.handle(Symbol::History),
            Admission::Rejected(Rejection::HistoryEmpty)
        );
        assert_eq!(
            calc.handle(Symbol::Blank),
            Admission::Rejected(Rejection::NoOp)
        );
        assert!(calc.display().is_blank());
    }

    #[test]
    fn test_mode_cycles_and_clears() {
        let mut calc = Calculator::new();
        feed(&mut calc, "12+");
        feed(&mut calc, "M");
        assert_eq!(calc.base(), Base::Hex);
        assert!(calc.expression().is_empty());
        assert_eq!(calc.expression().live(), 0);
        assert_eq!(calc.display(), render_literal(Word::Base(Base::Hex)));
        feed(&mut calc, "MM");
        assert_eq!(calc.base(), Base::Decimal);
    }

    #[test]
    fn test_history_recall_in_current_base() {
        let mut calc = Calculator::new();
        feed(&mut calc, "-7/2=");
        feed(&mut calc, "H");
        let shown = calc.display();
        assert_eq!(shown.cell(7), Some(Segments::for_nibble(5)));
        assert_eq!(shown.cell(6), Some(Segments::for_nibble(3).with_dot()));
        assert_eq!(shown.cell(5), Some(Segments::MINUS));

        feed(&mut calc, "M");
        feed(&mut calc, "H");
        assert_eq!(calc.display(), value_display(-3, Base::Hex));
    }

    #[test]
    fn test_preview_leaves_expression() {
        let mut calc = Calculator::new();
        feed(&mut calc, "2*3");
        assert_eq!(calc.preview(), Ok(EvalResult::whole(6)));
        assert_eq!(calc.expression().len(), 3);
    }
}
