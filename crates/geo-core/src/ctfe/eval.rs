use crate::format::{
    BoolFormatter, CharFormatter, Digits, FormatParser, FormatStatus, IntFormatter, IntValue,
    Piece, StrFormatter,
};

use super::{args::ConstArg, static_string::StaticString};

/// Checks `fmt` against `args`. Agrees with the runtime `format::validate` for the same types.
pub const fn validate(fmt: &str, args: &[ConstArg]) -> bool {
    let mut out = StaticString::<0>::new();
    run(fmt.as_bytes(), args, &mut out).is_ok()
}

/// Length in bytes of the formatted output.
pub const fn length(fmt: &str, args: &[ConstArg]) -> usize {
    let mut out = StaticString::<0>::new();
    run(fmt.as_bytes(), args, &mut out);
    out.required()
}

/// Formats into a buffer of `CAP` bytes, truncating if it is too small. Invalid sequences are
/// emitted verbatim exactly like at runtime.
pub const fn format<const CAP: usize>(fmt: &str, args: &[ConstArg]) -> StaticString<CAP> {
    let mut out = StaticString::new();
    run(fmt.as_bytes(), args, &mut out);
    out
}

const fn run<const CAP: usize>(
    fmt: &[u8],
    args: &[ConstArg],
    out: &mut StaticString<CAP>,
) -> FormatStatus {
    let mut parser = FormatParser::new(fmt);
    let mut has_errors = false;

    while let Some(piece) = parser.next_piece() {
        match piece {
            Piece::Text(text) => out.push_slice(text),
            Piece::Escaped(ch) => out.push(ch),
            Piece::StrayClose => {
                out.push(b'}');
                has_errors = true;
            }
            Piece::Value(seq) => {
                if seq.index >= args.len() || !emit(&args[seq.index], seq.spec, out) {
                    out.push_slice(seq.span);
                    has_errors = true;
                }
            }
            Piece::Malformed(span) => {
                out.push_slice(span);
                has_errors = true;
            }
        }
    }

    if has_errors {
        FormatStatus::CompletedWithErrors
    } else {
        FormatStatus::Ok
    }
}

const fn emit<const CAP: usize>(arg: &ConstArg, spec: &[u8], out: &mut StaticString<CAP>) -> bool {
    match *arg {
        ConstArg::Bool(value) => {
            if BoolFormatter::parse_spec(spec).is_none() {
                return false;
            }
            out.push_str(if value { "true" } else { "false" });
        }
        ConstArg::Char(value) => {
            if CharFormatter::parse_spec(spec).is_none() {
                return false;
            }
            out.push_char(value);
        }
        ConstArg::Str(value) => {
            if StrFormatter::parse_spec(spec).is_none() {
                return false;
            }
            out.push_str(value);
        }
        ConstArg::Int(value) => return emit_int(IntValue::from_i128(value), spec, out),
        ConstArg::UInt(value) => return emit_int(IntValue::from_u128(value), spec, out),
    }

    true
}

const fn emit_int<const CAP: usize>(
    value: IntValue,
    spec: &[u8],
    out: &mut StaticString<CAP>,
) -> bool {
    let Some(formatter) = IntFormatter::parse_spec(spec) else {
        return false;
    };

    let layout = formatter.measure(value);
    let digits = Digits::new(value.magnitude, formatter.radix);

    out.push_repeated(formatter.fill, layout.left_fill);

    if let Some(sign) = layout.sign {
        out.push(sign);
    }

    out.push_slice(formatter.prefix);

    let mut depth = layout.digits_and_separators;

    while depth > 0 {
        depth -= 1;
        out.push(formatter.char_at(&digits, depth));
    }

    out.push_repeated(formatter.fill, layout.right_fill);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format;
    use rstest::rstest;

    #[rstest]
    #[case("{}", ConstArg::Int(-123), "-123")]
    #[case("{:^7}", ConstArg::Int(-123), " -123  ")]
    #[case("{:#013HX}", ConstArg::UInt(0x1BADD00D), "0x0'1BAD'D00D")]
    #[case("{:*<6b}", ConstArg::UInt(5), "101***")]
    #[case("{} {{x}}", ConstArg::Bool(false), "false {x}")]
    #[case("[{}]", ConstArg::Char('ß'), "[ß]")]
    #[case("{0}{0}", ConstArg::Str("ab"), "abab")]
    fn matches_runtime(#[case] fmt: &str, #[case] arg: ConstArg, #[case] expected: &str) {
        let args = [arg];
        let out = format::<32>(fmt, &args);

        assert_eq!(out, expected);
        assert_eq!(length(fmt, &args), expected.len());
        assert!(validate(fmt, &args));
    }

    #[test]
    fn errors_match_runtime() {
        let args = [ConstArg::Int(1), ConstArg::Str("s")];

        for fmt in ["{2}", "{1:x}", "{", "}", "{:?}{}", "{0:x"] {
            let runtime = format::string(fmt, &(&1_i32, &"s"));

            assert!(!validate(fmt, &args), "{fmt}");
            assert_eq!(format::<32>(fmt, &args), runtime.as_str(), "{fmt}");
            assert_eq!(length(fmt, &args), runtime.len(), "{fmt}");
        }
    }

    #[test]
    fn truncates_to_capacity() {
        let args = [ConstArg::UInt(u128::MAX)];
        let out = format::<4>("{:b}", &args);

        assert_eq!(out, "1111");
        assert_eq!(out.required(), 128);
        assert_eq!(length("{:b}", &args), 128);
    }

    #[test]
    fn evaluates_in_const() {
        const ARGS: &[ConstArg] = &[ConstArg::UInt(255), ConstArg::Bool(true)];
        const LEN: usize = length("{:#x}/{}", ARGS);
        const OUT: StaticString<LEN> = format::<LEN>("{:#x}/{}", ARGS);

        const _: () = assert!(validate("{:#x}/{}", ARGS));
        const _: () = assert!(OUT.eq_str("0xff/true"));
        assert!(!OUT.is_truncated());
    }
}
