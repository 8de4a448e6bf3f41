//! Display renderer: values and fixed words into an 8-cell glyph buffer.
//!
//! Numbers are right-aligned. Digits are produced least-significant first by
//! repeated `value mod base`, filling cells from the rightmost leftwards. A
//! negative value gets a minus glyph one cell left of its most significant
//! digit. A fractional part (base 10 only) takes the rightmost cells and the
//! integer's units cell gets the decimal point. Unused cells are blank.

use platform::config::DIGIT_COUNT;
use thiserror_no_std::Error;

use crate::eval::EvalResult;
use crate::glyph::Segments;
use crate::symbol::{Base, Operator};

/// Fraction digits shown, in thousandths.
const FRACTION_WIDTH: usize = 3;

/// The 8 display cells; `None` is a blank cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    cells: [Option<Segments>; DIGIT_COUNT],
}

impl DisplayBuffer {
    /// All cells blank.
    pub const BLANK: Self = Self {
        cells: [None; DIGIT_COUNT],
    };

    /// Build from explicit cells.
    pub const fn from_cells(cells: [Option<Segments>; DIGIT_COUNT]) -> Self {
        Self { cells }
    }

    /// The cell at `index`, or `None` when blank or out of range.
    pub fn cell(&self, index: usize) -> Option<Segments> {
        self.cells.get(index).copied().flatten()
    }

    /// All cells, leftmost first.
    pub fn cells(&self) -> &[Option<Segments>; DIGIT_COUNT] {
        &self.cells
    }

    /// Raw segment patterns with blank cells as 0.
    pub fn patterns(&self) -> [u8; DIGIT_COUNT] {
        self.cells.map(|c| c.map_or(0, Segments::bits))
    }

    /// `true` when every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    fn set(&mut self, index: usize, glyph: Segments) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Some(glyph);
        }
    }
}

/// Rendering failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// The value needs more cells than the display has.
    #[error("value needs {needed} cells")]
    DoesNotFit {
        /// Cells the value needs.
        needed: usize,
    },
}

/// Fixed words shown for modes, operators, and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Word {
    /// "Add"
    Add,
    /// "Sub"
    Sub,
    /// "Product"
    Product,
    /// "Div"
    Div,
    /// "Error"
    Error,
    /// "BASE" followed by the radix
    Base(Base),
}

impl Word {
    /// The mnemonic shown when `op` is entered.
    pub const fn for_operator(op: Operator) -> Self {
        match op {
            Operator::Add => Self::Add,
            Operator::Sub => Self::Sub,
            Operator::Mul => Self::Product,
            Operator::Div => Self::Div,
        }
    }

    fn letters(self) -> &'static [Segments] {
        use Segments as S;
        match self {
            Self::Add => &[S::A, S::LOWER_D, S::LOWER_D],
            Self::Sub => &[S::S, S::LOWER_U, S::LOWER_B],
            Self::Product => &[
                S::P,
                S::LOWER_R,
                S::LOWER_O,
                S::LOWER_D,
                S::LOWER_U,
                S::LOWER_C,
                S::LOWER_T,
            ],
            Self::Div => &[S::LOWER_D, S::LOWER_I, S::LOWER_U],
            Self::Error => &[S::E, S::LOWER_R, S::LOWER_R, S::LOWER_O, S::LOWER_R],
            Self::Base(_) => &[S::B, S::A, S::S, S::E],
        }
    }
}

/// Render a fixed word.
///
/// Words are right-aligned, except "BASE", which starts at the leftmost cell
/// with the radix right-aligned in decimal.
pub fn render_literal(word: Word) -> DisplayBuffer {
    let letters = word.letters();
    let mut buf = DisplayBuffer::BLANK;
    match word {
        Word::Base(base) => {
            for (i, &glyph) in letters.iter().enumerate() {
                buf.set(i, glyph);
            }
            fill_digits(&mut buf, u64::from(base.radix()), 10, DIGIT_COUNT, 1, false);
        }
        _ => {
            let start = DIGIT_COUNT.saturating_sub(letters.len());
            for (i, &glyph) in letters.iter().enumerate() {
                buf.set(start.saturating_add(i), glyph);
            }
        }
    }
    buf
}

/// Cells `value` needs in `base`, counting the minus sign.
pub fn digits_needed(value: i64, base: Base) -> usize {
    let count = magnitude_width(value.unsigned_abs(), u64::from(base.radix()));
    if value < 0 {
        count.saturating_add(1)
    } else {
        count
    }
}

fn magnitude_width(mut magnitude: u64, radix: u64) -> usize {
    let mut count: usize = 1;
    while magnitude >= radix {
        magnitude = magnitude.checked_div(radix).unwrap_or(0);
        count = count.saturating_add(1);
    }
    count
}

/// Render a number in `base`, with an optional fraction in thousandths.
///
/// The fraction is shown only in base 10, as up to three digits with
/// trailing zeros trimmed, and is dropped if it does not fit next to the
/// integer part.
///
/// # Errors
///
/// [`RenderError::DoesNotFit`] when the integer part and sign need more than 8 cells.
pub fn render_value(
    value: i64,
    base: Base,
    fraction: Option<u16>,
) -> Result<DisplayBuffer, RenderError> {
    render_signed(value < 0, value.unsigned_abs(), base, fraction)
}

/// Render an evaluation result in `base`.
///
/// The minus sign follows [`EvalResult::negative`], so a quotient that
/// truncates to zero (`-1/2`) still shows as negative.
///
/// # Errors
///
/// [`RenderError::DoesNotFit`], see [`render_value`].
pub fn render_result(result: &EvalResult, base: Base) -> Result<DisplayBuffer, RenderError> {
    render_signed(
        result.negative,
        result.value.unsigned_abs(),
        base,
        result.fraction,
    )
}

fn render_signed(
    negative: bool,
    magnitude: u64,
    base: Base,
    fraction: Option<u16>,
) -> Result<DisplayBuffer, RenderError> {
    let radix = u64::from(base.radix());
    let mut integer_width = magnitude_width(magnitude, radix);
    if negative {
        integer_width = integer_width.saturating_add(1);
    }
    if integer_width > DIGIT_COUNT {
        return Err(RenderError::DoesNotFit {
            needed: integer_width,
        });
    }

    let fraction = match (base, fraction) {
        (Base::Decimal, Some(f)) if f != 0 => trim_fraction(f),
        _ => None,
    }
    .filter(|&(_, width)| integer_width.saturating_add(width) <= DIGIT_COUNT);
    // no "-0" once the fraction is gone
    let negative = negative && (magnitude != 0 || fraction.is_some());

    let mut buf = DisplayBuffer::BLANK;
    let mut end = DIGIT_COUNT;
    if let Some((digits, width)) = fraction {
        fill_digits(&mut buf, u64::from(digits), 10, end, width, false);
        end = end.saturating_sub(width);
    }
    let next = fill_digits(&mut buf, magnitude, radix, end, 1, fraction.is_some());
    if negative {
        if let Some(sign) = next.checked_sub(1) {
            buf.set(sign, Segments::MINUS);
        }
    }
    Ok(buf)
}

/// Thousandths without trailing zeros: `500 → (5, 1)`, `50 → (5, 2)`.
fn trim_fraction(thousandths: u16) -> Option<(u16, usize)> {
    let mut digits = thousandths;
    let mut width = FRACTION_WIDTH;
    while width > 1 && digits.checked_rem(10) == Some(0) {
        digits = digits.checked_div(10).unwrap_or(0);
        width = width.saturating_sub(1);
    }
    (digits != 0).then_some((digits, width))
}

/// Write `magnitude` in `radix` into the cells left of `end`, zero-padded
/// to at least `min_digits` digits. Only the units cell gets the decimal
/// point when `dot` is set. Returns the index of the leftmost cell written.
fn fill_digits(
    buf: &mut DisplayBuffer,
    magnitude: u64,
    radix: u64,
    end: usize,
    min_digits: usize,
    dot: bool,
) -> usize {
    let mut remaining = magnitude;
    let mut index = end;
    let mut units = true;
    let mut written: usize = 0;
    loop {
        let Some(i) = index.checked_sub(1) else {
            break;
        };
        index = i;
        let nibble = u8::try_from(remaining.checked_rem(radix).unwrap_or(0)).unwrap_or(0);
        let glyph = Segments::for_nibble(nibble);
        buf.set(index, if units && dot { glyph.with_dot() } else { glyph });
        units = false;
        written = written.saturating_add(1);
        remaining = remaining.checked_div(radix).unwrap_or(0);
        if remaining == 0 && written >= min_digits {
            break;
        }
    }
    index
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn digit(n: u8) -> Option<Segments> {
        Some(Segments::for_nibble(n))
    }

    #[test]
    fn test_number_right_aligned() {
        let buf = render_value(13, Base::Decimal, None).unwrap();
        assert_eq!(
            buf.cells(),
            &[None, None, None, None, None, None, digit(1), digit(3)]
        );
    }

    #[test]
    fn test_zero_renders_one_digit() {
        let buf = render_value(0, Base::Decimal, None).unwrap();
        assert_eq!(buf.cell(7), digit(0));
        assert_eq!(buf.cell(6), None);
    }

    #[test]
    fn test_negative_sign_left_of_msd() {
        let buf = render_value(-42, Base::Decimal, None).unwrap();
        assert_eq!(buf.cell(5), Some(Segments::MINUS));
        assert_eq!(buf.cell(6), digit(4));
        assert_eq!(buf.cell(7), digit(2));
        assert_eq!(buf.cell(4), None);
    }

    #[test]
    fn test_hex_and_binary() {
        let hex = render_value(0x15, Base::Hex, None).unwrap();
        assert_eq!(hex.cell(6), digit(1));
        assert_eq!(hex.cell(7), digit(5));

        let bin = render_value(5, Base::Binary, None).unwrap();
        assert_eq!(&bin.cells()[5..], &[digit(1), digit(0), digit(1)]);
    }

    #[test]
    fn test_fraction_with_decimal_point() {
        // 3.5
        let buf = render_value(3, Base::Decimal, Some(500)).unwrap();
        assert_eq!(buf.cell(7), digit(5));
        assert_eq!(buf.cell(6), Some(Segments::for_nibble(3).with_dot()));
        assert_eq!(buf.cell(5), None);
    }

    #[test]
    fn test_fraction_keeps_leading_zeros() {
        // -12.05
        let buf = render_value(-12, Base::Decimal, Some(50)).unwrap();
        assert_eq!(
            &buf.cells()[3..],
            &[
                Some(Segments::MINUS),
                digit(1),
                Some(Segments::for_nibble(2).with_dot()),
                digit(0),
                digit(5),
            ]
        );
    }

    #[test]
    fn test_fraction_zero_padded_to_width() {
        // 0.05 and 0.005
        let hundredths = render_value(0, Base::Decimal, Some(50)).unwrap();
        assert_eq!(
            &hundredths.cells()[5..],
            &[Some(Segments::for_nibble(0).with_dot()), digit(0), digit(5)]
        );
        let thousandths = render_value(0, Base::Decimal, Some(5)).unwrap();
        assert_eq!(
            &thousandths.cells()[4..],
            &[
                Some(Segments::for_nibble(0).with_dot()),
                digit(0),
                digit(0),
                digit(5)
            ]
        );
    }

    #[test]
    fn test_negative_result_below_one_keeps_sign() {
        let result = EvalResult {
            value: 0,
            fraction: Some(500),
            negative: true,
        };
        let buf = render_result(&result, Base::Decimal).unwrap();
        assert_eq!(
            &buf.cells()[5..],
            &[
                Some(Segments::MINUS),
                Some(Segments::for_nibble(0).with_dot()),
                digit(5)
            ]
        );
        assert_eq!(buf.cell(4), None);

        // hex has no fraction to carry the sign
        let hex = render_result(&result, Base::Hex).unwrap();
        assert_eq!(hex.cells(), render_value(0, Base::Hex, None).unwrap().cells());
    }

    #[test]
    fn test_fraction_hidden_outside_decimal() {
        let buf = render_value(3, Base::Hex, Some(500)).unwrap();
        assert_eq!(buf.cell(7), digit(3));
        assert!(!buf.cell(7).unwrap().has_dot());
    }

    #[test]
    fn test_fraction_dropped_when_too_wide() {
        let buf = render_value(1_234_567, Base::Decimal, Some(333)).unwrap();
        assert_eq!(buf.cell(7), digit(7));
        assert!(!buf.cell(7).unwrap().has_dot());
    }

    #[test]
    fn test_too_wide_is_error() {
        assert!(render_value(99_999_999, Base::Decimal, None).is_ok());
        assert_eq!(
            render_value(100_000_000, Base::Decimal, None),
            Err(RenderError::DoesNotFit { needed: 9 })
        );
        assert_eq!(
            render_value(-10_000_000, Base::Decimal, None),
            Err(RenderError::DoesNotFit { needed: 9 })
        );
        assert!(render_value(256, Base::Binary, None).is_err());
    }

    #[test]
    fn test_error_word() {
        let buf = render_literal(Word::Error);
        assert_eq!(
            buf.patterns(),
            [0x00, 0x00, 0x00, 0x79, 0x50, 0x50, 0x5c, 0x50]
        );
    }

    #[test]
    fn test_operator_words() {
        assert_eq!(
            render_literal(Word::for_operator(Operator::Add)).patterns(),
            [0, 0, 0, 0, 0, 0x77, 0x5e, 0x5e]
        );
        assert_eq!(
            render_literal(Word::for_operator(Operator::Mul)).patterns(),
            [0, 0x73, 0x50, 0x5c, 0x5e, 0x1c, 0x58, 0x78]
        );
        assert_eq!(
            render_literal(Word::for_operator(Operator::Sub)).patterns(),
            [0, 0, 0, 0, 0, 0x6d, 0x1c, 0x7c]
        );
        assert_eq!(
            render_literal(Word::for_operator(Operator::Div)).patterns(),
            [0, 0, 0, 0, 0, 0x5e, 0x04, 0x1c]
        );
    }

    #[test]
    fn test_base_word_with_radix() {
        let buf = render_literal(Word::Base(Base::Hex));
        assert_eq!(
            buf.patterns(),
            [0x7f, 0x77, 0x6d, 0x79, 0x00, 0x00, 0x06, 0x7d]
        );
    }

    #[test]
    fn test_digits_needed() {
        assert_eq!(digits_needed(0, Base::Decimal), 1);
        assert_eq!(digits_needed(255, Base::Hex), 2);
        assert_eq!(digits_needed(255, Base::Binary), 8);
        assert_eq!(digits_needed(-1, Base::Decimal), 2);
        assert_eq!(digits_needed(i64::MIN, Base::Binary), 65);
    }
}
