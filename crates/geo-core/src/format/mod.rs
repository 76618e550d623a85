//! `{}`-style format strings.
//!
//! A format string mixes verbatim text with value sequences `{[index][:spec]}`. Indices are
//! zero-based; a sequence without one takes the next implicit index, which only advances on
//! such sequences. `{{` and `}}` are literal braces. The spec is handed to the [`Formatter`] of
//! the addressed value.
//!
//! Formatting never fails outright. A sequence that is malformed, addresses a missing value,
//! or carries a spec its value rejects is written out verbatim and the call reports
//! [`FormatStatus::CompletedWithErrors`].

use std::fmt;

mod formatter;
mod int;
mod parser;
mod sink;
mod value_list;

pub use self::{
    formatter::{
        BoolFormatter, ByBox, ByRef, CharFormatter, DisplayFormatter, Displayed, Formattable,
        Formatter, PointerFormatter, StrFormatter, truncate_nul,
    },
    int::{Alignment, DigitCase, IntFormatter, IntValue, IntegerValue, Layout, SignMode},
    parser::{FormatParser, FormatStatus, Piece, ValueSequence, parse},
    sink::{BufferedWriter, Counter, FormatSink, SinkFn},
    value_list::{DynValue, ValueList, ValueTypes, accepts_spec, format_one},
};

pub(crate) use self::{int::Digits, parser::sub_slice};

// === Entry points === //

/// Checks `fmt` against the value types `V` without needing any values.
///
/// Returns `true` exactly when [`write`] with values of those types reports [`FormatStatus::Ok`].
pub fn validate<V: ValueTypes>(fmt: impl AsRef<[u8]>) -> bool {
    FormatParser::new(fmt.as_ref()).all(|piece| match piece {
        Piece::Text(_) | Piece::Escaped(_) => true,
        Piece::Value(seq) => V::accepts(seq.index, seq.spec),
        Piece::StrayClose | Piece::Malformed(_) => false,
    })
}

pub fn write<S, V>(sink: &mut S, fmt: impl AsRef<[u8]>, values: &V) -> FormatStatus
where
    S: FormatSink + ?Sized,
    V: ValueList + ?Sized,
{
    parse(fmt.as_ref(), sink, |seq, sink| {
        values.format_value(seq.index, seq.spec, sink)
    })
}

/// Number of code units [`write`] would emit.
pub fn length<V: ValueList + ?Sized>(fmt: impl AsRef<[u8]>, values: &V) -> usize {
    let mut counter = Counter::default();
    write(&mut counter, fmt, values);
    counter.0
}

pub fn string<V: ValueList + ?Sized>(fmt: impl AsRef<[u8]>, values: &V) -> String {
    let mut out = Vec::new();
    write(&mut out, fmt, values);

    String::from_utf8(out)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

/// Defers formatting to a [`fmt::Display`] impl, e.g. to feed `format!` or `log` macros.
pub fn display<'a, V: ValueList + ?Sized>(
    fmt: &'a (impl AsRef<[u8]> + ?Sized),
    values: &'a V,
) -> FormatDisplay<'a, V> {
    FormatDisplay {
        fmt: fmt.as_ref(),
        values,
    }
}

#[derive(Copy, Clone)]
pub struct FormatDisplay<'a, V: ?Sized> {
    fmt: &'a [u8],
    values: &'a V,
}

impl<V: ?Sized> fmt::Debug for FormatDisplay<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatDisplay")
            .field("fmt", &String::from_utf8_lossy(self.fmt))
            .finish_non_exhaustive()
    }
}

impl<V: ValueList + ?Sized> fmt::Display for FormatDisplay<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = Ok(());

        // Slices are never split across chunks, so each chunk holds whole characters.
        let mut writer = BufferedWriter::new(|chunk: &[u8]| {
            if result.is_ok() {
                result = f.write_str(&String::from_utf8_lossy(chunk));
            }
        });

        write(&mut writer, self.fmt, self.values);
        drop(writer);

        result
    }
}

#[doc(hidden)]
pub mod fstring_internals {
    pub use super::string;
}

/// Formats its arguments into a `String`, borrowing every argument.
///
/// ```
/// let name = "grid";
/// assert_eq!(geo_core::fstring!("{}: {:04}", name, 7), "grid: 0007");
/// ```
#[macro_export]
macro_rules! fstring {
    ($fmt:expr $(, $value:expr)* $(,)?) => {
        $crate::format::fstring_internals::string($fmt, &($(&$value,)*))
    };
}
