//! Foreground loop tests — scripted key presses through `App` into the
//! shared frame.
//!
//! Run with: cargo test -p firmware --test app_loop

#![allow(clippy::unwrap_used)]

use calculator::render::{render_literal, render_value, Word};
use calculator::symbol::{key_for, Base};
use calculator::{Admission, FrameCell, KeypadDecoder, Rejection, Symbol};
use embedded_hal_mock::eh1::delay::NoopDelay;
use firmware::App;
use platform::mocks::{ScriptExhausted, ScriptedMatrix};

fn script(input: &str) -> ScriptedMatrix {
    let mut matrix = ScriptedMatrix::new();
    for c in input.chars() {
        let (key, held) = key_for(Symbol::from_char(c).unwrap()).unwrap();
        if held {
            matrix.hold(key);
        } else {
            matrix.tap(key);
        }
    }
    matrix
}

fn app<'a>(input: &str, frame: &'a FrameCell) -> App<'a, ScriptedMatrix, NoopDelay> {
    App::new(KeypadDecoder::new(script(input), NoopDelay::new()), frame)
}

#[test]
fn test_new_publishes_blank_frame() {
    let frame = FrameCell::new();
    let _app = app("", &frame);
    assert_eq!(frame.generation(), 1);
    assert!(frame.snapshot().is_blank());
}

#[test]
fn test_step_publishes_accepted_symbols() {
    let frame = FrameCell::new();
    let mut app = app("7+3*2=", &frame);
    for _ in 0..6 {
        let (_, admission) = app.step().unwrap();
        assert_eq!(admission, Admission::Accepted);
    }
    assert_eq!(frame.snapshot(), render_value(13, Base::Decimal, None).unwrap());
    assert_eq!(frame.generation(), 7);
}

#[test]
fn test_rejected_symbol_does_not_publish() {
    let frame = FrameCell::new();
    let mut app = app("H", &frame);
    let before = frame.generation();
    let (symbol, admission) = app.step().unwrap();
    assert_eq!(symbol, Symbol::History);
    assert_eq!(admission, Admission::Rejected(Rejection::HistoryEmpty));
    assert_eq!(frame.generation(), before);
}

#[test]
fn test_run_returns_keypad_error() {
    let frame = FrameCell::new();
    let mut app = app("8/0=", &frame);
    assert_eq!(app.run().unwrap_err(), ScriptExhausted);
    assert_eq!(frame.snapshot(), render_literal(Word::Error));
    assert!(app.calculator().is_showing_error());
}
