//! Integer formatting.
//!
//! Spec grammar, every field optional: `[[fill]align][sign][#][0][width][H[:sep]][radix]`.
//!
//! | Field  | Values                                                             |
//! |--------|--------------------------------------------------------------------|
//! | fill   | any single character, only when followed by an alignment           |
//! | align  | `<` left, `^` center, `>` right (default)                          |
//! | sign   | `+` always, `-` negative only (default), ` ` fill char placeholder |
//! | `#`    | radix prefix: `0b`, `0x`, or a leading `0` for octal               |
//! | `0`    | zero-fill up to `width`                                            |
//! | `H`    | digit grouping, separator `'` unless overridden with `:sep`        |
//! | radix  | `b`/`B`, `o`/`O`, `d`/`D`/`i`/`I`, `x`, `X`                        |

use crate::{
    ascii,
    parse::{self, ParseIntOptions},
};

use super::{
    formatter::{Formattable, Formatter},
    sink::FormatSink,
};

// === IntValue === //

/// Sign and magnitude of any primitive integer.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct IntValue {
    pub negative: bool,
    pub magnitude: u128,
}

impl IntValue {
    pub const fn from_i128(value: i128) -> Self {
        Self {
            negative: value < 0,
            magnitude: value.unsigned_abs(),
        }
    }

    pub const fn from_u128(value: u128) -> Self {
        Self {
            negative: false,
            magnitude: value,
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.magnitude == 0
    }
}

pub trait IntegerValue: Copy {
    fn to_int_value(self) -> IntValue;
}

macro_rules! impl_int_formattable {
    ($ctor:ident as $wide:ty => $($ty:ty),* $(,)?) => {$(
        impl IntegerValue for $ty {
            fn to_int_value(self) -> IntValue {
                IntValue::$ctor(self as $wide)
            }
        }

        impl Formattable for $ty {
            type Formatter = IntFormatter;
        }
    )*};
}

impl_int_formattable!(from_i128 as i128 => i8, i16, i32, i64, i128, isize);
impl_int_formattable!(from_u128 as u128 => u8, u16, u32, u64, u128, usize);

// === Options === //

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum DigitCase {
    Lower,
    Upper,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum SignMode {
    /// Only negative values get a sign.
    Normal,

    /// Non-negative values get a `+`.
    Always,

    /// Non-negative values get the fill character in place of a sign.
    Fill,
}

const BINARY_PREFIX: &[u8] = b"0b";
const HEX_PREFIX: &[u8] = b"0x";

/// Base-2 digits of `u128::MAX`, plus one slot for the octal zero prefix.
const MAX_DIGITS: usize = 129;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct IntFormatter {
    pub alignment: Alignment,
    pub digit_case: DigitCase,
    pub digit_grouping: u32,
    pub radix: u32,
    pub sign_mode: SignMode,
    pub width: u32,
    pub zero_fill: bool,
    pub zero_prefix: bool,
    pub fill: u8,
    pub prefix: &'static [u8],
    pub separator: Option<u8>,
}

impl Default for IntFormatter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl IntFormatter {
    pub const MIN_RADIX: u32 = 2;
    pub const MAX_RADIX: u32 = 36;

    pub const DEFAULT: Self = Self {
        alignment: Alignment::Right,
        digit_case: DigitCase::Lower,
        digit_grouping: 3,
        radix: 10,
        sign_mode: SignMode::Normal,
        width: 0,
        zero_fill: false,
        zero_prefix: false,
        fill: b' ',
        prefix: b"",
        separator: None,
    };

    pub const fn validate(&self) -> bool {
        if let Some(separator) = self.separator {
            if ascii::is_alphanumeric(separator) {
                return false;
            }
        }

        self.digit_grouping >= 1 && self.radix >= Self::MIN_RADIX && self.radix <= Self::MAX_RADIX
    }

    /// Parses a spec string. Returns `None` if any part of it is not understood.
    pub const fn parse_spec(spec: &[u8]) -> Option<Self> {
        let mut this = Self::DEFAULT;
        let end = spec.len();
        let mut pos = 0;

        // fill
        if end >= 2 && matches!(spec[1], b'<' | b'^' | b'>') {
            this.fill = spec[0];
            pos += 1;
        }

        // alignment
        if pos < end {
            match spec[pos] {
                b'<' => {
                    this.alignment = Alignment::Left;
                    pos += 1;
                }
                b'^' => {
                    this.alignment = Alignment::Center;
                    pos += 1;
                }
                b'>' => {
                    this.alignment = Alignment::Right;
                    pos += 1;
                }
                _ => {}
            }
        }

        // sign_mode
        if pos < end {
            match spec[pos] {
                b'+' => {
                    this.sign_mode = SignMode::Always;
                    pos += 1;
                }
                b'-' => {
                    this.sign_mode = SignMode::Normal;
                    pos += 1;
                }
                b' ' => {
                    this.sign_mode = SignMode::Fill;
                    pos += 1;
                }
                _ => {}
            }
        }

        // prefix
        let mut use_prefix = false;

        if pos < end && spec[pos] == b'#' {
            use_prefix = true;
            pos += 1;
        }

        // zero_fill
        if pos < end && spec[pos] == b'0' {
            this.zero_fill = true;
            pos += 1;
        }

        // width
        if pos < end && ascii::is_digit(spec[pos]) {
            let (_, rest) = spec.split_at(pos);
            let width = parse::decimal_prefix(rest, u32::MAX as u128);

            if !width.is_ok() {
                return None;
            }

            this.width = width.magnitude as u32;
            pos += width.length;
        }

        // separator
        if pos < end && spec[pos] == b'H' {
            this.separator = Some(b'\'');
            pos += 1;

            if end - pos >= 2 && spec[pos] == b':' {
                // The output must stay parseable with the same separator.
                if ascii::is_alphanumeric(spec[pos + 1]) {
                    return None;
                }

                this.separator = Some(spec[pos + 1]);
                pos += 2;
            }
        }

        // radix
        if pos < end {
            match spec[pos] {
                b'b' | b'B' => {
                    this.radix = 2;
                    this.digit_grouping = 4;
                    if use_prefix {
                        this.prefix = BINARY_PREFIX;
                    }
                    pos += 1;
                }
                b'o' | b'O' => {
                    this.radix = 8;
                    this.digit_grouping = 4;
                    this.zero_prefix = use_prefix;
                    pos += 1;
                }
                b'd' | b'D' | b'i' | b'I' => {
                    pos += 1;
                }
                b'x' | b'X' => {
                    this.radix = 16;
                    this.digit_grouping = 4;
                    if spec[pos] == b'X' {
                        this.digit_case = DigitCase::Upper;
                    }
                    if use_prefix {
                        this.prefix = HEX_PREFIX;
                    }
                    pos += 1;
                }
                _ => {}
            }
        }

        if pos == end { Some(this) } else { None }
    }

    /// Computes where fill, sign, and digits go for `value`. An invalid formatter measures as the
    /// single `?` that [`write`](Self::write) emits for it.
    pub const fn measure(&self, value: IntValue) -> Layout {
        if !self.validate() {
            return Layout {
                left_fill: 0,
                sign: None,
                digits_and_separators: 1,
                right_fill: 0,
            };
        }

        let sign = if value.negative {
            Some(b'-')
        } else {
            match self.sign_mode {
                SignMode::Normal => None,
                SignMode::Always => Some(b'+'),
                SignMode::Fill => Some(self.fill),
            }
        };

        let sign_width = if sign.is_some() { 1 } else { 0 };
        let fixed = sign_width + self.prefix.len();
        let width = self.width as usize;
        let grouping = self.digit_grouping as usize;

        let mut digits = Digits::new(value.magnitude, self.radix).len;

        if !value.is_zero() && self.zero_prefix {
            digits += 1;
        }

        if self.separator.is_some() {
            digits += (digits - 1) / grouping;
        }

        if self.zero_fill && width > fixed + digits {
            digits = width - fixed;

            // A separator must never lead the digit run.
            if self.separator.is_some() && digits % (grouping + 1) == 0 {
                digits -= 1;
            }
        }

        let mut left_fill = 0;
        let mut right_fill = 0;

        if width > fixed + digits {
            let fill = width - fixed - digits;

            match self.alignment {
                Alignment::Left => right_fill = fill,
                Alignment::Center => {
                    right_fill = (fill + sign_width) / 2;
                    left_fill = fill - right_fill;
                }
                Alignment::Right => left_fill = fill,
            }
        }

        Layout {
            left_fill,
            sign,
            digits_and_separators: digits,
            right_fill,
        }
    }

    /// Returns the character at `depth` positions from the least-significant end of the digit run.
    pub(crate) const fn char_at(&self, digits: &Digits, depth: usize) -> u8 {
        let mut index = depth;

        if let Some(separator) = self.separator {
            let group = self.digit_grouping as usize + 1;

            if depth % group == group - 1 {
                return separator;
            }

            index = depth - depth / group;
        }

        let digit = if index < digits.len {
            digits.values[index]
        } else {
            0
        };

        self.digit_char(digit)
    }

    const fn digit_char(&self, digit: u8) -> u8 {
        if digit < 10 {
            b'0' + digit
        } else {
            match self.digit_case {
                DigitCase::Lower => b'a' + digit - 10,
                DigitCase::Upper => b'A' + digit - 10,
            }
        }
    }

    pub fn write<S: FormatSink + ?Sized>(&self, value: IntValue, sink: &mut S) {
        if !self.validate() {
            sink.put(b'?');
            return;
        }

        let layout = self.measure(value);
        let digits = Digits::new(value.magnitude, self.radix);

        sink.put_repeated(self.fill, layout.left_fill);

        if let Some(sign) = layout.sign {
            sink.put(sign);
        }

        sink.put_slice(self.prefix);

        for depth in (0..layout.digits_and_separators).rev() {
            sink.put(self.char_at(&digits, depth));
        }

        sink.put_repeated(self.fill, layout.right_fill);
    }

    /// Options suitable for parsing back what this formatter writes, minus any prefix.
    pub const fn parse_options(&self) -> ParseIntOptions {
        ParseIntOptions {
            allow_sign: true,
            radix: self.radix,
            separator: self.separator,
        }
    }
}

impl<T: IntegerValue> Formatter<T> for IntFormatter {
    fn parse(spec: &[u8]) -> Option<Self> {
        Self::parse_spec(spec)
    }

    fn format<S: FormatSink + ?Sized>(&self, value: &T, sink: &mut S) {
        self.write(value.to_int_value(), sink);
    }
}

// === Layout === //

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Layout {
    pub left_fill: usize,
    pub sign: Option<u8>,
    pub digits_and_separators: usize,
    pub right_fill: usize,
}

/// Digit values of a magnitude, least-significant first.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Digits {
    pub values: [u8; MAX_DIGITS],
    pub len: usize,
}

impl Digits {
    pub const fn new(mut magnitude: u128, radix: u32) -> Self {
        let mut values = [0u8; MAX_DIGITS];
        let mut len = 0;

        if radix < IntFormatter::MIN_RADIX || radix > IntFormatter::MAX_RADIX {
            return Self { values, len: 1 };
        }

        let radix = radix as u128;

        loop {
            values[len] = (magnitude % radix) as u8;
            len += 1;
            magnitude /= radix;

            if magnitude == 0 {
                break;
            }
        }

        Self { values, len }
    }
}
