//! Numeric parsing from byte strings.

use thiserror::Error;

use crate::ascii;

// === ParseStatus === //

/// Outcome of a parsing operation.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ParseStatus {
    /// The operation was successful.
    Ok,

    /// The input string is empty.
    Empty,

    /// The input string was not understood.
    InvalidInput,

    /// The parsing options are invalid.
    InvalidOptions,

    /// The value is larger than the output type can represent.
    Overflow,

    /// The value is smaller than the output type can represent.
    Underflow,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("the input is empty")]
    Empty,

    #[error("the input is not a number")]
    InvalidInput,

    #[error("the parsing options are invalid")]
    InvalidOptions,

    #[error("the value is too large")]
    Overflow,

    #[error("the value is too small")]
    Underflow,

    #[error("unexpected trailing input after {length} character(s)")]
    TrailingInput { length: usize },
}

// === ParseResult === //

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct ParseResult<T> {
    /// Describes whether the parsing operation succeeded or failed.
    pub status: ParseStatus,

    /// The parsed value. Present if and only if `status` is [`ParseStatus::Ok`].
    pub value: Option<T>,

    /// The number of input characters consumed. This is zero for empty input, invalid options,
    /// and input without any digits.
    pub length: usize,

    /// Whether unparsed input remains after the consumed portion.
    pub has_trailing_input: bool,
}

impl<T> ParseResult<T> {
    pub fn is_ok(&self) -> bool {
        self.status == ParseStatus::Ok
    }

    /// Converts the result into its value, ignoring any trailing input.
    pub fn into_result(self) -> Result<T, ParseError> {
        match self.status {
            ParseStatus::Ok => self.value.ok_or(ParseError::InvalidInput),
            ParseStatus::Empty => Err(ParseError::Empty),
            ParseStatus::InvalidInput => Err(ParseError::InvalidInput),
            ParseStatus::InvalidOptions => Err(ParseError::InvalidOptions),
            ParseStatus::Overflow => Err(ParseError::Overflow),
            ParseStatus::Underflow => Err(ParseError::Underflow),
        }
    }

    /// Like [`into_result`](Self::into_result) but also rejects trailing input.
    pub fn complete(self) -> Result<T, ParseError> {
        if self.has_trailing_input && self.status == ParseStatus::Ok {
            return Err(ParseError::TrailingInput {
                length: self.length,
            });
        }

        self.into_result()
    }
}

// === ParseIntOptions === //

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct ParseIntOptions {
    /// Accept a leading `+` or `-`.
    pub allow_sign: bool,

    /// Numeric base, from [`MIN_RADIX`](Self::MIN_RADIX) to [`MAX_RADIX`](Self::MAX_RADIX).
    ///
    /// Zero lets a prefix pick the base: `0b` for binary, `0` for octal, `0x` for hexadecimal,
    /// and decimal otherwise.
    pub radix: u32,

    /// Digit separator. Must not be an alphanumeric ASCII character.
    pub separator: Option<u8>,
}

impl ParseIntOptions {
    pub const MIN_RADIX: u32 = 2;
    pub const MAX_RADIX: u32 = 36;

    pub const DEFAULT: Self = Self {
        allow_sign: true,
        radix: 10,
        separator: None,
    };

    pub const fn with_sign(mut self, allow_sign: bool) -> Self {
        self.allow_sign = allow_sign;
        self
    }

    pub const fn with_radix(mut self, radix: u32) -> Self {
        self.radix = radix;
        self
    }

    pub const fn with_separator(mut self, separator: u8) -> Self {
        self.separator = Some(separator);
        self
    }

    pub const fn validate(&self) -> bool {
        if self.radix != 0 && (self.radix < Self::MIN_RADIX || self.radix > Self::MAX_RADIX) {
            return false;
        }

        if let Some(separator) = self.separator {
            if ascii::is_alphanumeric(separator) {
                return false;
            }
        }

        true
    }
}

impl Default for ParseIntOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// === Integer parsing === //

mod sealed {
    pub trait Sealed {}
}

/// Primitive integers that [`integer`] can produce.
pub trait ParseInt: sealed::Sealed + Copy {
    /// Magnitude of the most negative representable value.
    #[doc(hidden)]
    const NEGATIVE_LIMIT: u128;

    /// Magnitude of the most positive representable value.
    #[doc(hidden)]
    const POSITIVE_LIMIT: u128;

    /// Builds a value from a magnitude already checked against the limits.
    #[doc(hidden)]
    fn from_magnitude(negative: bool, magnitude: u128) -> Self;
}

macro_rules! impl_parse_signed {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl ParseInt for $ty {
            const NEGATIVE_LIMIT: u128 = <$ty>::MIN.unsigned_abs() as u128;
            const POSITIVE_LIMIT: u128 = <$ty>::MAX as u128;

            fn from_magnitude(negative: bool, magnitude: u128) -> Self {
                if negative {
                    (magnitude as $ty).wrapping_neg()
                } else {
                    magnitude as $ty
                }
            }
        }
    )*};
}

macro_rules! impl_parse_unsigned {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl ParseInt for $ty {
            const NEGATIVE_LIMIT: u128 = 0;
            const POSITIVE_LIMIT: u128 = <$ty>::MAX as u128;

            fn from_magnitude(_negative: bool, magnitude: u128) -> Self {
                magnitude as $ty
            }
        }
    )*};
}

impl_parse_signed!(i8, i16, i32, i64, i128, isize);
impl_parse_unsigned!(u8, u16, u32, u64, u128, usize);

/// Parses an integer from the front of `input`.
pub fn integer<T: ParseInt>(
    input: impl AsRef<[u8]>,
    options: &ParseIntOptions,
) -> ParseResult<T> {
    let raw = integer_raw(
        input.as_ref(),
        options,
        T::NEGATIVE_LIMIT,
        T::POSITIVE_LIMIT,
    );

    ParseResult {
        status: raw.status,
        value: match raw.status {
            ParseStatus::Ok => Some(T::from_magnitude(raw.negative, raw.magnitude)),
            _ => None,
        },
        length: raw.length,
        has_trailing_input: raw.has_trailing_input,
    }
}

/// Parses an integer from the front of a null-terminated `input`. Anything after the first NUL
/// byte is ignored.
pub fn integer_nul<T: ParseInt>(
    input: impl AsRef<[u8]>,
    options: &ParseIntOptions,
) -> ParseResult<T> {
    integer(crate::format::truncate_nul(input.as_ref()), options)
}

/// Integer parse result before conversion into the destination type.
#[derive(Debug, Copy, Clone)]
pub(crate) struct RawInt {
    pub status: ParseStatus,
    pub negative: bool,
    pub magnitude: u128,
    pub length: usize,
    pub has_trailing_input: bool,
}

impl RawInt {
    const fn failed(status: ParseStatus) -> Self {
        Self {
            status,
            negative: false,
            magnitude: 0,
            length: 0,
            has_trailing_input: false,
        }
    }

    pub const fn is_ok(&self) -> bool {
        matches!(self.status, ParseStatus::Ok)
    }
}

/// Parses the unsigned decimal number at the front of `input`, bounded by `max`.
pub(crate) const fn decimal_prefix(input: &[u8], max: u128) -> RawInt {
    integer_raw(input, &ParseIntOptions::DEFAULT, 0, max)
}

/// Accumulates a magnitude checked against `negative_limit` or `positive_limit` depending on the
/// parsed sign. Once a range error is latched, scanning continues so that `length` still covers
/// every recognized digit.
pub(crate) const fn integer_raw(
    input: &[u8],
    options: &ParseIntOptions,
    negative_limit: u128,
    positive_limit: u128,
) -> RawInt {
    if !options.validate() {
        return RawInt::failed(ParseStatus::InvalidOptions);
    }

    if input.is_empty() {
        return RawInt::failed(ParseStatus::Empty);
    }

    let end = input.len();
    let mut pos = 0;

    // Sign
    let mut negative = false;

    if options.allow_sign {
        match input[0] {
            b'+' => pos += 1,
            b'-' => {
                negative = true;
                pos += 1;
            }
            _ => {}
        }
    }

    // Radix, either explicit or from a prefix. A bare leading `0` counts as a digit.
    let mut radix = 10;
    let mut has_digits = false;

    if options.radix != 0 {
        radix = options.radix;
    } else if pos < end && input[pos] == b'0' {
        radix = 8;
        has_digits = true;
        pos += 1;

        if pos < end {
            match input[pos] {
                b'b' | b'B' => {
                    radix = 2;
                    has_digits = false;
                    pos += 1;
                }
                b'x' | b'X' => {
                    radix = 16;
                    has_digits = false;
                    pos += 1;
                }
                _ => {}
            }
        }
    }

    // Digits and separators
    let limit = if negative {
        negative_limit
    } else {
        positive_limit
    };

    let mut status = ParseStatus::Ok;
    let mut magnitude = 0u128;

    while pos < end {
        let mut digit_pos = pos;

        if let Some(separator) = options.separator {
            if has_digits && input[pos] == separator {
                digit_pos += 1;

                if digit_pos == end {
                    break;
                }
            }
        }

        let digit = match ascii::digit_value(input[digit_pos]) {
            Some(digit) if digit < radix => digit as u128,
            _ => break,
        };

        has_digits = true;
        pos = digit_pos + 1;

        if matches!(status, ParseStatus::Ok) {
            if digit > limit || magnitude > (limit - digit) / radix as u128 {
                status = if negative {
                    ParseStatus::Underflow
                } else {
                    ParseStatus::Overflow
                };
            } else {
                magnitude = magnitude * radix as u128 + digit;
            }
        }
    }

    if !has_digits {
        return RawInt::failed(ParseStatus::InvalidInput);
    }

    RawInt {
        status,
        negative,
        magnitude,
        length: pos,
        has_trailing_input: pos != end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    fn ok<T>(value: T, length: usize, has_trailing_input: bool) -> ParseResult<T> {
        ParseResult {
            status: ParseStatus::Ok,
            value: Some(value),
            length,
            has_trailing_input,
        }
    }

    fn err<T>(status: ParseStatus, length: usize, has_trailing_input: bool) -> ParseResult<T> {
        ParseResult {
            status,
            value: None,
            length,
            has_trailing_input,
        }
    }

    const DEC: ParseIntOptions = ParseIntOptions::DEFAULT;
    const AUTO: ParseIntOptions = ParseIntOptions::DEFAULT.with_radix(0);
    const COMMA: ParseIntOptions = ParseIntOptions::DEFAULT.with_separator(b',');

    #[rstest]
    #[case("", DEC, err(ParseStatus::Empty, 0, false))]
    #[case("0", DEC, ok(0, 1, false))]
    #[case("123", DEC, ok(123, 3, false))]
    #[case(" 123", DEC, err(ParseStatus::InvalidInput, 0, false))]
    #[case("a123", DEC, err(ParseStatus::InvalidInput, 0, false))]
    #[case("123 ", DEC, ok(123, 3, true))]
    #[case("123a", DEC, ok(123, 3, true))]
    #[case("+123", DEC, ok(123, 4, false))]
    #[case("-123", DEC, ok(-123, 4, false))]
    #[case("+123", DEC.with_sign(false), err(ParseStatus::InvalidInput, 0, false))]
    #[case("-123", DEC.with_sign(false), err(ParseStatus::InvalidInput, 0, false))]
    #[case("++123", DEC, err(ParseStatus::InvalidInput, 0, false))]
    #[case("-", DEC, err(ParseStatus::InvalidInput, 0, false))]
    #[case("0123", DEC, ok(123, 4, false))]
    #[case("0b10101", AUTO, ok(0b10101, 7, false))]
    #[case("0B11", AUTO, ok(3, 4, false))]
    #[case("01337", AUTO, ok(0o1337, 5, false))]
    #[case("0", AUTO, ok(0, 1, false))]
    #[case("-0x10", AUTO, ok(-16, 5, false))]
    #[case("0x", AUTO, err(ParseStatus::InvalidInput, 0, false))]
    #[case("09", AUTO, ok(0, 1, true))]
    #[case("Z0", DEC.with_radix(36), ok(1260, 2, false))]
    #[case("00000", DEC.with_radix(1), err(ParseStatus::InvalidOptions, 0, false))]
    #[case("Z0", DEC.with_radix(37), err(ParseStatus::InvalidOptions, 0, false))]
    #[case("1", DEC.with_separator(b'a'), err(ParseStatus::InvalidOptions, 0, false))]
    #[case("", DEC.with_radix(40), err(ParseStatus::InvalidOptions, 0, false))]
    #[case("1,23", DEC, ok(1, 1, true))]
    #[case("1,23", COMMA, ok(123, 4, false))]
    #[case("123,", COMMA, ok(123, 3, true))]
    #[case("1,,23", COMMA, ok(1, 1, true))]
    #[case(",123", COMMA, err(ParseStatus::InvalidInput, 0, false))]
    #[case("0x,10", AUTO.with_separator(b','), err(ParseStatus::InvalidInput, 0, false))]
    #[case("0,10", AUTO.with_separator(b','), ok(8, 4, false))]
    fn parse_i32(
        #[case] input: &str,
        #[case] options: ParseIntOptions,
        #[case] expected: ParseResult<i32>,
    ) {
        assert_eq!(integer::<i32>(input, &options), expected);
    }

    #[rstest]
    #[case("127", ok(127, 3, false))]
    #[case("128", err(ParseStatus::Overflow, 3, false))]
    #[case("200", err(ParseStatus::Overflow, 3, false))]
    #[case("-128", ok(-128, 4, false))]
    #[case("-129", err(ParseStatus::Underflow, 4, false))]
    #[case("-200", err(ParseStatus::Underflow, 4, false))]
    #[case("1000x", err(ParseStatus::Overflow, 4, true))]
    fn parse_i8_range(#[case] input: &str, #[case] expected: ParseResult<i8>) {
        assert_eq!(integer::<i8>(input, &DEC), expected);
    }

    #[test]
    fn parse_unsigned_range() {
        assert_eq!(integer::<u8>("255", &DEC), ok(255, 3, false));
        assert_eq!(integer::<u8>("256", &DEC), err(ParseStatus::Overflow, 3, false));
        assert_eq!(integer::<u8>("-0", &DEC), ok(0, 2, false));
        assert_eq!(integer::<u8>("-1", &DEC), err(ParseStatus::Underflow, 2, false));
        assert_eq!(
            integer::<u32>("0x1BADD00D", &AUTO),
            ok(0x1BAD_D00D, 10, false)
        );
        assert_eq!(
            integer::<u128>("340282366920938463463374607431768211455", &DEC),
            ok(u128::MAX, 39, false)
        );
        assert_eq!(
            integer::<u128>("340282366920938463463374607431768211456", &DEC).status,
            ParseStatus::Overflow
        );
        assert_eq!(
            integer::<i128>("-170141183460469231731687303715884105728", &DEC),
            ok(i128::MIN, 40, false)
        );
    }

    #[test]
    fn parse_nul_terminated() {
        assert_eq!(integer_nul::<i32>(b"42\0garbage", &DEC), ok(42, 2, false));
        assert_eq!(integer_nul::<i32>(b"\042", &DEC), err(ParseStatus::Empty, 0, false));
    }

    #[test]
    fn converts_into_results() {
        assert_eq!(integer::<i8>("12", &DEC).into_result(), Ok(12));
        assert_eq!(integer::<i8>("12x", &DEC).into_result(), Ok(12));
        assert_eq!(
            integer::<i8>("12x", &DEC).complete(),
            Err(ParseError::TrailingInput { length: 2 })
        );
        assert_eq!(integer::<i8>("999", &DEC).complete(), Err(ParseError::Overflow));
        assert_eq!(integer::<i8>("-999", &DEC).complete(), Err(ParseError::Underflow));
        assert_eq!(integer::<i8>("", &DEC).complete(), Err(ParseError::Empty));
    }

    #[quickcheck]
    fn decimal_round_trip_i64(value: i64) -> bool {
        let text = value.to_string();
        integer::<i64>(&text, &DEC) == ok(value, text.len(), false)
    }

    #[quickcheck]
    fn decimal_round_trip_i8(value: i8) -> bool {
        let text = value.to_string();
        integer::<i8>(&text, &DEC) == ok(value, text.len(), false)
    }

    #[quickcheck]
    fn hex_round_trip_u64(value: u64) -> bool {
        let text = format!("{value:#x}");
        integer::<u64>(&text, &AUTO) == ok(value, text.len(), false)
    }

    #[quickcheck]
    fn arbitrary_input_is_bounded(input: Vec<u8>, radix: u8, separator: Option<u8>) -> bool {
        let options = ParseIntOptions {
            allow_sign: true,
            radix: u32::from(radix % 40),
            separator,
        };
        let result = integer::<i16>(&input, &options);

        result.length <= input.len()
            && result.value.is_some() == (result.status == ParseStatus::Ok)
            && (result.status != ParseStatus::InvalidOptions || result.length == 0)
    }
}
