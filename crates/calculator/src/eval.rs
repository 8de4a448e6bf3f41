//! Infix evaluator.
//!
//! A single left-to-right pass over the expression with an operand stack and
//! an operator stack:
//!
//! - digits accumulate into a magnitude in the active radix;
//! - a `-` at the start or right after another operator is a sign marker for
//!   the next number, not a binary operator;
//! - an operator pushes the pending number, then reduces the operator stack
//!   while its top binds at least as tightly (`+`/`-` reduce everything,
//!   `*`/`/` reduce only `*`/`/`), then pushes itself;
//! - at the end the remaining operators are reduced from the top.
//!
//! This gives `*`/`/` precedence over `+`/`-` and left-to-right associativity
//! within each level. Both stacks live on the evaluator's own stack frame for
//! the duration of one call.

use heapless::Vec;
use platform::config::STACK_CAPACITY;
use thiserror_no_std::Error;

use crate::expression::Term;
use crate::symbol::{Base, Operator};

/// Largest displayed fraction, in thousandths.
const FRACTION_MAX: u16 = 999;

/// Evaluation failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EvalError {
    /// A `/` whose right operand is zero.
    #[error("division by zero")]
    DivisionByZero,
    /// A binary operator without an operand on one side.
    #[error("operator is missing an operand")]
    MissingOperand,
    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow")]
    Overflow,
    /// The operand stack is full.
    #[error("operand stack overflow")]
    StackOverflow,
    /// Nothing to evaluate.
    #[error("empty expression")]
    Empty,
}

/// The value of an evaluated expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EvalResult {
    /// Integer part, truncated toward zero.
    pub value: i64,
    /// Sign-stripped fractional part in thousandths, present only when the
    /// last reduction was a division with a remainder. Display only; it never
    /// feeds further arithmetic.
    pub fraction: Option<u16>,
    /// The exact quotient was below zero. Differs from `value < 0` only when
    /// a negative quotient truncates to zero, as in `-1/2`.
    pub negative: bool,
}

impl EvalResult {
    /// A whole-number result.
    pub const fn whole(value: i64) -> Self {
        Self {
            value,
            fraction: None,
            negative: value < 0,
        }
    }
}

/// Evaluate `terms` in radix `base`.
///
/// # Errors
///
/// Any [`EvalError`]. Evaluation stops at the first error and the partial
/// stack state is discarded.
pub fn evaluate(terms: &[Term], base: Base) -> Result<EvalResult, EvalError> {
    if terms.is_empty() {
        return Err(EvalError::Empty);
    }

    let radix = i64::from(base.radix());
    let mut operands: Vec<EvalResult, STACK_CAPACITY> = Vec::new();
    let mut operators: Vec<Operator, STACK_CAPACITY> = Vec::new();
    let mut magnitude: i64 = 0;
    let mut negative = false;
    let mut pending_digits = false;
    let mut previous: Option<Term> = None;

    for &term in terms {
        match term {
            Term::Digit(digit) => {
                magnitude = magnitude
                    .checked_mul(radix)
                    .and_then(|m| m.checked_add(i64::from(digit.value())))
                    .ok_or(EvalError::Overflow)?;
                pending_digits = true;
            }
            Term::Op(Operator::Sub) if matches!(previous, None | Some(Term::Op(_))) => {
                negative = true;
            }
            Term::Op(op) => {
                push_operand(&mut operands, signed(magnitude, negative)?)?;
                magnitude = 0;
                negative = false;
                pending_digits = false;

                while let Some(&top) = operators.last() {
                    if op.binds_tighter() && !top.binds_tighter() {
                        break;
                    }
                    operators.pop();
                    reduce(&mut operands, top)?;
                }
                // A full operator stack drops the operator; unreachable with
                // the current precedence rules, which keep it at depth 2.
                let _ = operators.push(op);
            }
        }
        previous = Some(term);
    }

    if pending_digits {
        push_operand(&mut operands, signed(magnitude, negative)?)?;
    }

    while let Some(op) = operators.pop() {
        reduce(&mut operands, op)?;
    }

    match operands.as_slice() {
        [result] => Ok(*result),
        // a lone sign marker with no number after it
        _ => Err(EvalError::MissingOperand),
    }
}

fn signed(magnitude: i64, negative: bool) -> Result<EvalResult, EvalError> {
    let value = if negative {
        magnitude.checked_neg().ok_or(EvalError::Overflow)?
    } else {
        magnitude
    };
    Ok(EvalResult::whole(value))
}

fn push_operand(
    operands: &mut Vec<EvalResult, STACK_CAPACITY>,
    operand: EvalResult,
) -> Result<(), EvalError> {
    operands
        .push(operand)
        .map_err(|_| EvalError::StackOverflow)
}

/// Pop two operands, apply `op`, push the result.
fn reduce(operands: &mut Vec<EvalResult, STACK_CAPACITY>, op: Operator) -> Result<(), EvalError> {
    let b = operands.pop().ok_or(EvalError::MissingOperand)?;
    let a = operands.pop().ok_or(EvalError::MissingOperand)?;
    let result = calc(a.value, b.value, op)?;
    push_operand(operands, result)
}

/// Apply one binary operator.
///
/// # Errors
///
/// [`EvalError::DivisionByZero`] when `op` is `/` and `b == 0`;
/// [`EvalError::Overflow`] when the result does not fit in an `i64`.
pub fn calc(a: i64, b: i64, op: Operator) -> Result<EvalResult, EvalError> {
    let value = match op {
        Operator::Add => a.checked_add(b),
        Operator::Sub => a.checked_sub(b),
        Operator::Mul => a.checked_mul(b),
        Operator::Div => return divide(a, b),
    };
    value.map(EvalResult::whole).ok_or(EvalError::Overflow)
}

fn divide(a: i64, b: i64) -> Result<EvalResult, EvalError> {
    if b == 0 {
        return Err(EvalError::DivisionByZero);
    }
    let quotient = a.checked_div(b).ok_or(EvalError::Overflow)?;
    let remainder = a.checked_rem(b).ok_or(EvalError::Overflow)?;
    let fraction = thousandths(remainder.unsigned_abs(), b.unsigned_abs());
    Ok(EvalResult {
        value: quotient,
        fraction,
        negative: quotient < 0 || (fraction.is_some() && (a < 0) != (b < 0)),
    })
}

/// `round(rem / div * 1000)`, clamped to 999; `None` when it rounds to zero.
fn thousandths(rem: u64, div: u64) -> Option<u16> {
    // rem < div, so rem * 2000 only overflows for divisors near u64::MAX
    let scaled = u128::from(rem)
        .checked_mul(2000)?
        .checked_add(u128::from(div))?
        .checked_div(u128::from(div).checked_mul(2)?)?;
    let clamped = u16::try_from(scaled).unwrap_or(FRACTION_MAX).min(FRACTION_MAX);
    (clamped != 0).then_some(clamped)
}
