use geo_core::{
    ascii,
    parse::{self, ParseError, ParseInt, ParseIntOptions},
};
use thiserror::Error;

pub const USAGE: &str = "\
usage: geo [--radix N] [--separator C] FMT [VALUE...]

Renders FMT with the given integer VALUEs, e.g. `geo '{:#x} {:H}' 255 1000000`.

options:
  --radix N       radix of VALUEs, 2 through 36; 0 detects 0b, 0x, or a leading 0 for octal
                  (default)
  --separator C   digit separator allowed inside VALUEs
  -h, --help      print this message

The GEO_LOG environment variable sets the log filter (default: info).";

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ArgsError {
    #[error("missing format string")]
    MissingFormat,

    #[error("option `{0}` requires a parameter")]
    MissingParam(String),

    #[error("option `{0}` does not take a parameter")]
    UnexpectedParam(String),

    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("`{0}` is not a number")]
    NotANumber(String),

    #[error("`{0}` is too large")]
    TooLarge(String),

    #[error("`{0}` is too small")]
    TooSmall(String),

    #[error("radix must be 0 or between 2 and 36, got {0}")]
    InvalidRadix(u32),

    #[error("separator must be a single non-alphanumeric character, got `{0}`")]
    InvalidSeparator(String),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Args {
    pub help: bool,
    pub options: ParseIntOptions,
    pub format: String,
    pub values: Vec<i64>,
}

impl Args {
    pub fn parse<I>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut options = ParseIntOptions::DEFAULT.with_radix(0);
        let mut operands = Vec::new();
        let mut options_done = false;

        while let Some(arg) = args.next() {
            // Negative numbers are operands, not options.
            let is_option = arg.len() > 1
                && arg.starts_with('-')
                && !arg.as_bytes().get(1).is_some_and(|&ch| ascii::is_digit(ch));

            if options_done || !is_option {
                operands.push(arg);
                continue;
            }

            if arg == "--" {
                options_done = true;
                continue;
            }

            let (name, inline) = match arg.split_once('=') {
                Some((name, param)) if name.starts_with("--") => (name, Some(param.to_owned())),
                _ => (arg.as_str(), None),
            };

            match name {
                "-h" | "--help" => {
                    if inline.is_some() {
                        return Err(ArgsError::UnexpectedParam(name.to_owned()));
                    }

                    return Ok(Self {
                        help: true,
                        options,
                        format: String::new(),
                        values: Vec::new(),
                    });
                }
                "--radix" => {
                    let param = require_param(name, inline, &mut args)?;
                    let radix = number::<u32>(&param, &ParseIntOptions::DEFAULT)?;

                    options = options.with_radix(radix);

                    if !options.validate() {
                        return Err(ArgsError::InvalidRadix(radix));
                    }
                }
                "--separator" => {
                    let param = require_param(name, inline, &mut args)?;

                    let &[separator] = param.as_bytes() else {
                        return Err(ArgsError::InvalidSeparator(param));
                    };

                    options = options.with_separator(separator);

                    if !options.validate() {
                        return Err(ArgsError::InvalidSeparator(param));
                    }
                }
                _ => return Err(ArgsError::UnknownOption(name.to_owned())),
            }
        }

        let mut operands = operands.into_iter();
        let format = operands.next().ok_or(ArgsError::MissingFormat)?;
        let values = operands
            .map(|operand| number::<i64>(&operand, &options))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            help: false,
            options,
            format,
            values,
        })
    }
}

fn require_param(
    name: &str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String, ArgsError> {
    inline
        .or_else(|| rest.next())
        .ok_or_else(|| ArgsError::MissingParam(name.to_owned()))
}

/// Parses a whole argument as an integer, telling apart values that are out of range.
pub fn number<T: ParseInt>(arg: &str, options: &ParseIntOptions) -> Result<T, ArgsError> {
    parse::integer::<T>(arg, options)
        .complete()
        .map_err(|err| match err {
            ParseError::Overflow => ArgsError::TooLarge(arg.to_owned()),
            ParseError::Underflow => ArgsError::TooSmall(arg.to_owned()),
            _ => ArgsError::NotANumber(arg.to_owned()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn operands_only() {
        let args = parse(&["{} {}", "12", "-0x1f"]).unwrap();

        assert!(!args.help);
        assert_eq!(args.format, "{} {}");
        assert_eq!(args.values, [12, -31]);
    }

    #[test]
    fn options_in_both_forms() {
        let args = parse(&["--radix", "16", "--separator=_", "{}", "ff_ff"]).unwrap();

        assert_eq!(args.options.radix, 16);
        assert_eq!(args.options.separator, Some(b'_'));
        assert_eq!(args.values, [0xFFFF]);

        let args = parse(&["--radix=2", "--", "-{}", "-101"]).unwrap();
        assert_eq!(args.format, "-{}");
        assert_eq!(args.values, [-5]);
    }

    #[test]
    fn detects_prefixes_by_default() {
        let args = parse(&["{}", "0b101", "017", "0x1F", "0"]).unwrap();
        assert_eq!(args.values, [5, 15, 31, 0]);

        assert!(USAGE.contains("0b, 0x, or a leading 0 for octal"));
        assert_eq!(parse(&["{}", "0o17"]), Err(ArgsError::NotANumber("0o17".into())));
    }

    #[test]
    fn help_stops_parsing() {
        assert!(parse(&["--help", "--bogus"]).unwrap().help);
        assert!(parse(&["-h"]).unwrap().help);
    }

    #[rstest]
    #[case(&[], ArgsError::MissingFormat)]
    #[case(&["--radix"], ArgsError::MissingParam("--radix".into()))]
    #[case(&["--radix", "37", "{}"], ArgsError::InvalidRadix(37))]
    #[case(&["--radix", "1", "{}"], ArgsError::InvalidRadix(1))]
    #[case(&["--radix", "x", "{}"], ArgsError::NotANumber("x".into()))]
    #[case(&["--separator", "ab", "{}"], ArgsError::InvalidSeparator("ab".into()))]
    #[case(&["--separator", "a", "{}"], ArgsError::InvalidSeparator("a".into()))]
    #[case(&["--verbose"], ArgsError::UnknownOption("--verbose".into()))]
    #[case(&["--help=yes"], ArgsError::UnexpectedParam("--help".into()))]
    #[case(&["{}", "12abc"], ArgsError::NotANumber("12abc".into()))]
    #[case(&["{}", "9223372036854775808"], ArgsError::TooLarge("9223372036854775808".into()))]
    #[case(&["{}", "-9223372036854775809"], ArgsError::TooSmall("-9223372036854775809".into()))]
    fn rejects(#[case] args: &[&str], #[case] expected: ArgsError) {
        assert_eq!(parse(args), Err(expected));
    }

    #[test]
    fn error_messages() {
        assert_eq!(ArgsError::TooLarge("300".into()).to_string(), "`300` is too large");
        assert_eq!(ArgsError::TooSmall("-300".into()).to_string(), "`-300` is too small");
    }
}
