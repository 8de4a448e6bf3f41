//! Property-based tests for the evaluator, renderer, and history ring.
//! Verifies invariants hold for ALL generated inputs, not just fixed examples.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use calculator::eval::evaluate;
use calculator::expression::Term;
use calculator::history::HistoryRing;
use calculator::render::render_value;
use calculator::symbol::{Base, Digit, Operator};
use calculator::{EvalError, Segments};
use proptest::prelude::*;

fn operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Sub),
        Just(Operator::Mul),
        Just(Operator::Div),
    ]
}

/// Digits of `n` in `base`, most significant first.
fn digits(mut n: u64, base: Base) -> Vec<Term> {
    let radix = u64::from(base.radix());
    let mut out = Vec::new();
    loop {
        out.push(Term::Digit(Digit::new((n % radix) as u8).unwrap()));
        n /= radix;
        if n == 0 {
            break;
        }
    }
    out.reverse();
    out
}

fn terms(first: u64, rest: &[(Operator, u64)], base: Base) -> Vec<Term> {
    let mut out = digits(first, base);
    for &(op, n) in rest {
        out.push(Term::Op(op));
        out.extend(digits(n, base));
    }
    out
}

/// Sum of products: `*` and `/` fold into the current term, `+`/`-` start a
/// new one. Division truncates toward zero.
fn reference(first: u64, rest: &[(Operator, u64)]) -> Option<i64> {
    let mut sum: i64 = 0;
    let mut term = first as i64;
    for &(op, n) in rest {
        let n = n as i64;
        match op {
            Operator::Mul => term *= n,
            Operator::Div => term = term.checked_div(n)?,
            Operator::Add => {
                sum += term;
                term = n;
            }
            Operator::Sub => {
                sum += term;
                term = -n;
            }
        }
    }
    Some(sum + term)
}

fn base() -> impl Strategy<Value = Base> {
    prop_oneof![Just(Base::Decimal), Just(Base::Hex), Just(Base::Binary)]
}

/// Read a rendered buffer back as an integer, ignoring any fraction.
fn read_back(cells: &[Option<Segments>], base: Base) -> i64 {
    let radix = i64::from(base.radix());
    let mut value = 0i64;
    let mut negative = false;
    for cell in cells.iter().flatten() {
        if *cell == Segments::MINUS {
            negative = true;
            continue;
        }
        let nibble = (0..16u8)
            .find(|&n| Segments::for_nibble(n) == Segments::from_bits(cell.bits() & 0x7f))
            .unwrap();
        value = value * radix + i64::from(nibble);
    }
    if negative {
        -value
    } else {
        value
    }
}

proptest! {
    /// The stack evaluator agrees with a sum-of-products reference in every base.
    #[test]
    fn evaluate_matches_reference(
        base in base(),
        first in 0u64..100,
        rest in prop::collection::vec((operator(), 1u64..100), 0..6),
    ) {
        let expected = reference(first, &rest).unwrap();
        let result = evaluate(&terms(first, &rest, base), base).unwrap();
        prop_assert_eq!(result.value, expected);
    }

    /// A zero divisor anywhere is always reported.
    #[test]
    fn zero_divisor_always_errors(
        first in 0u64..100,
        before in prop::collection::vec((operator(), 1u64..100), 0..3),
        after in prop::collection::vec((operator(), 1u64..100), 0..3),
    ) {
        let mut rest = before;
        rest.push((Operator::Div, 0));
        rest.extend(after);
        let result = evaluate(&terms(first, &rest, Base::Decimal), Base::Decimal);
        prop_assert_eq!(result, Err(EvalError::DivisionByZero));
    }

    /// A lone number evaluates to itself.
    #[test]
    fn single_number_is_identity(base in base(), n in 0u64..0xFF_FFFF) {
        let result = evaluate(&digits(n, base), base).unwrap();
        prop_assert_eq!(result.value, n as i64);
        prop_assert_eq!(result.fraction, None);
    }

    /// Every value that fits renders right-aligned and reads back unchanged.
    #[test]
    fn render_reads_back(value in -9_999_999i64..=99_999_999) {
        let buf = render_value(value, Base::Decimal, None).unwrap();
        prop_assert_eq!(read_back(buf.cells(), Base::Decimal), value);
        prop_assert!(buf.cell(7).is_some());
    }

    /// Hex rendering reads back too.
    #[test]
    fn render_hex_reads_back(value in 0i64..=0xFFFF_FFFF) {
        let buf = render_value(value, Base::Hex, None).unwrap();
        prop_assert_eq!(read_back(buf.cells(), Base::Hex), value);
    }

    /// The ring holds the newest `N` values and scrolls through them newest
    /// first, then wraps.
    #[test]
    fn history_keeps_newest(values in prop::collection::vec(any::<i32>(), 1..20)) {
        let mut ring: HistoryRing<i32, 3> = HistoryRing::new();
        for &v in &values {
            ring.push(v);
        }
        let kept: Vec<i32> = values.iter().rev().take(3).copied().collect();
        prop_assert_eq!(ring.len(), kept.len());
        prop_assert_eq!(ring.iter_newest_first().collect::<Vec<_>>(), kept.clone());

        let scrolled: Vec<i32> = (0..kept.len() + 1).filter_map(|_| ring.scroll_back()).collect();
        prop_assert_eq!(&scrolled[..kept.len()], &kept[..]);
        prop_assert_eq!(scrolled[kept.len()], kept[0]);
    }
}
