//! Format-string scanning.
//!
//! A format string is verbatim text interleaved with value sequences of the form
//! `{[index][:spec]}`. `{{` and `}}` stand for literal braces.

use crate::{ascii, parse};

use super::sink::FormatSink;

// === FormatStatus === //

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum FormatStatus {
    /// Every sequence in the format string was valid.
    Ok,

    /// Formatting completed, but invalid sequences were emitted verbatim.
    CompletedWithErrors,
}

impl FormatStatus {
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

// === Pieces === //

/// A well-formed `{...}` value sequence.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct ValueSequence<'a> {
    /// Zero-based value index, explicit or assigned in order of appearance.
    pub index: usize,

    /// Everything after the `:`, or empty.
    pub spec: &'a [u8],

    /// The whole sequence including braces. Emitted verbatim if the value cannot be formatted.
    pub span: &'a [u8],
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Piece<'a> {
    /// Verbatim text containing no braces.
    Text(&'a [u8]),

    /// A brace produced by `{{` or `}}`.
    Escaped(u8),

    /// A `}` that is not part of a `}}` pair.
    StrayClose,

    Value(ValueSequence<'a>),

    /// A `{` that does not start a well-formed value sequence, up to where scanning stopped.
    Malformed(&'a [u8]),
}

// === FormatParser === //

/// Splits a format string into [`Piece`]s. Usable in `const` contexts through
/// [`next_piece`](Self::next_piece).
#[derive(Debug, Clone)]
pub struct FormatParser<'a> {
    fmt: &'a [u8],
    pos: usize,
    next_index: usize,
}

impl<'a> FormatParser<'a> {
    pub const fn new(fmt: &'a [u8]) -> Self {
        Self {
            fmt,
            pos: 0,
            next_index: 0,
        }
    }

    pub const fn next_piece(&mut self) -> Option<Piece<'a>> {
        let fmt = self.fmt;
        let end = fmt.len();
        let start = self.pos;

        if start >= end {
            return None;
        }

        match fmt[start] {
            b'{' => Some(self.value_sequence()),
            b'}' => {
                if start + 1 < end && fmt[start + 1] == b'}' {
                    self.pos = start + 2;
                    Some(Piece::Escaped(b'}'))
                } else {
                    self.pos = start + 1;
                    Some(Piece::StrayClose)
                }
            }
            _ => {
                let stop = skip_to_brace(fmt, start);
                self.pos = stop;
                Some(Piece::Text(sub_slice(fmt, start, stop)))
            }
        }
    }

    const fn value_sequence(&mut self) -> Piece<'a> {
        let fmt = self.fmt;
        let end = fmt.len();
        let start = self.pos;
        let mut pos = start + 1;

        if pos < end && fmt[pos] == b'{' {
            self.pos = pos + 1;
            return Piece::Escaped(b'{');
        }

        // Explicit index
        let mut ok = true;
        let mut index = None;

        if pos < end && ascii::is_digit(fmt[pos]) {
            let parsed = parse::decimal_prefix(sub_slice(fmt, pos, end), usize::MAX as u128);
            pos += parsed.length;

            if parsed.is_ok() {
                index = Some(parsed.magnitude as usize);
            } else {
                ok = false;
            }
        }

        // Spec
        let mut spec: &'a [u8] = &[];

        if pos < end && fmt[pos] == b':' {
            let spec_start = pos + 1;
            pos = skip_to_brace(fmt, spec_start);
            spec = sub_slice(fmt, spec_start, pos);
        }

        // Closing brace. Implicit indices are only handed out to complete sequences.
        let mut resolved = 0;

        if ok && pos < end && fmt[pos] == b'}' {
            resolved = match index {
                Some(index) => index,
                None => {
                    self.next_index += 1;
                    self.next_index - 1
                }
            };
        } else {
            ok = false;
        }

        pos = skip_to_brace(fmt, pos);

        if pos < end && fmt[pos] == b'}' {
            pos += 1;
        }

        self.pos = pos;
        let span = sub_slice(fmt, start, pos);

        if ok {
            Piece::Value(ValueSequence {
                index: resolved,
                spec,
                span,
            })
        } else {
            Piece::Malformed(span)
        }
    }
}

impl<'a> Iterator for FormatParser<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_piece()
    }
}

const fn skip_to_brace(fmt: &[u8], mut pos: usize) -> usize {
    while pos < fmt.len() && fmt[pos] != b'{' && fmt[pos] != b'}' {
        pos += 1;
    }
    pos
}

pub(crate) const fn sub_slice(parent: &[u8], start: usize, end: usize) -> &[u8] {
    let (head, _) = parent.split_at(end);
    let (_, tail) = head.split_at(start);
    tail
}

// === Driver === //

/// Walks `fmt`, writing verbatim text to `sink` and handing each value sequence to
/// `emit_value`. A sequence that `emit_value` rejects is written out verbatim.
pub fn parse<S, E>(fmt: &[u8], sink: &mut S, mut emit_value: E) -> FormatStatus
where
    S: FormatSink + ?Sized,
    E: FnMut(&ValueSequence<'_>, &mut S) -> bool,
{
    let mut has_errors = false;

    for piece in FormatParser::new(fmt) {
        match piece {
            Piece::Text(text) => sink.put_slice(text),
            Piece::Escaped(ch) => sink.put(ch),
            Piece::StrayClose => {
                sink.put(b'}');
                has_errors = true;
            }
            Piece::Value(seq) => {
                if !emit_value(&seq, sink) {
                    sink.put_slice(seq.span);
                    has_errors = true;
                }
            }
            Piece::Malformed(span) => {
                sink.put_slice(span);
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

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn pieces(fmt: &str) -> Vec<Piece<'_>> {
        FormatParser::new(fmt.as_bytes()).collect()
    }

    fn value<'a>(index: usize, spec: &'a str, span: &'a str) -> Piece<'a> {
        Piece::Value(ValueSequence {
            index,
            spec: spec.as_bytes(),
            span: span.as_bytes(),
        })
    }

    #[test]
    fn splits_text_and_escapes() {
        assert_eq!(pieces(""), []);
        assert_eq!(
            pieces("a{{b}}c"),
            [
                Piece::Text(b"a"),
                Piece::Escaped(b'{'),
                Piece::Text(b"b"),
                Piece::Escaped(b'}'),
                Piece::Text(b"c"),
            ]
        );
        assert_eq!(pieces("x}y"), [Piece::Text(b"x"), Piece::StrayClose, Piece::Text(b"y")]);
    }

    #[test]
    fn assigns_indices() {
        assert_eq!(
            pieces("{}{2}{:}{1:x}{}"),
            [
                value(0, "", "{}"),
                value(2, "", "{2}"),
                value(1, "", "{:}"),
                value(1, "x", "{1:x}"),
                value(2, "", "{}"),
            ]
        );
    }

    #[test]
    fn malformed_sequences() {
        assert_eq!(pieces("{"), [Piece::Malformed(b"{")]);
        assert_eq!(pieces("{:"), [Piece::Malformed(b"{:")]);
        assert_eq!(pieces("{a}"), [Piece::Malformed(b"{a}")]);
        assert_eq!(pieces("{0x}"), [Piece::Malformed(b"{0x}")]);
        assert_eq!(
            pieces("{abc{}"),
            [Piece::Malformed(b"{abc"), value(0, "", "{}")]
        );
        assert_eq!(
            pieces("{:x{}"),
            [Piece::Malformed(b"{:x"), value(0, "", "{}")]
        );
        assert_eq!(
            pieces("{99999999999999999999999}"),
            [Piece::Malformed(b"{99999999999999999999999}")]
        );
    }

    #[test]
    fn malformed_sequences_do_not_consume_indices() {
        assert_eq!(
            pieces("{x}{}"),
            [Piece::Malformed(b"{x}"), value(0, "", "{}")]
        );
    }

    #[test]
    fn driver_emits_failed_values_verbatim() {
        let mut out = Vec::new();
        let status = parse(b"<{}|{1:q}|{2}>", &mut out, |seq, sink: &mut Vec<u8>| {
            if seq.index == 2 {
                return false;
            }
            sink.extend_from_slice(seq.spec);
            sink.push(b'0' + seq.index as u8);
            true
        });

        assert_eq!(out, b"<0|q1|{2}>");
        assert_eq!(status, FormatStatus::CompletedWithErrors);
    }

    #[quickcheck]
    fn pieces_cover_the_input(fmt: Vec<u8>) -> bool {
        let mut covered = 0;

        for piece in FormatParser::new(&fmt) {
            covered += match piece {
                Piece::Text(text) | Piece::Malformed(text) => text.len(),
                Piece::Escaped(_) => 2,
                Piece::StrayClose => 1,
                Piece::Value(seq) => seq.span.len(),
            };
        }

        covered == fmt.len()
    }
}
