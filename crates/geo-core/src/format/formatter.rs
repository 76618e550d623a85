use std::{
    borrow::Cow,
    ffi::{CStr, CString},
    fmt::{self, Write as _},
    ptr::NonNull,
};

use super::{int::IntFormatter, sink::FormatSink};

// === Traits === //

/// Formatting logic for values of type `T`.
///
/// A formatter is built from the spec part of a value sequence (`{index:spec}`) and then renders
/// exactly one value. Building fails if the spec is not understood.
pub trait Formatter<T: ?Sized>: Sized {
    fn parse(spec: &[u8]) -> Option<Self>;

    fn format<S: FormatSink + ?Sized>(&self, value: &T, sink: &mut S);
}

/// Types with a [`Formatter`].
pub trait Formattable {
    type Formatter: Formatter<Self>;
}

/// Formatter for types that only accept an empty spec.
macro_rules! plain_formatter {
    ($name:ident) => {
        #[derive(Debug, Copy, Clone, Default)]
        pub struct $name {
            _private: (),
        }

        impl $name {
            pub const fn parse_spec(spec: &[u8]) -> Option<Self> {
                if spec.is_empty() {
                    Some(Self { _private: () })
                } else {
                    None
                }
            }
        }
    };
}

// === References === //

/// Forwards to the formatter of the referenced type.
#[derive(Debug, Copy, Clone)]
pub struct ByRef<F>(F);

impl<T: ?Sized + Formattable> Formattable for &T {
    type Formatter = ByRef<T::Formatter>;
}

impl<'a, T: ?Sized + Formattable> Formatter<&'a T> for ByRef<T::Formatter> {
    fn parse(spec: &[u8]) -> Option<Self> {
        T::Formatter::parse(spec).map(ByRef)
    }

    fn format<S: FormatSink + ?Sized>(&self, value: &&'a T, sink: &mut S) {
        self.0.format(*value, sink);
    }
}

impl<T: ?Sized + Formattable> Formattable for Box<T> {
    type Formatter = ByBox<T::Formatter>;
}

#[derive(Debug, Copy, Clone)]
pub struct ByBox<F>(F);

impl<T: ?Sized + Formattable> Formatter<Box<T>> for ByBox<T::Formatter> {
    fn parse(spec: &[u8]) -> Option<Self> {
        T::Formatter::parse(spec).map(ByBox)
    }

    fn format<S: FormatSink + ?Sized>(&self, value: &Box<T>, sink: &mut S) {
        self.0.format(&**value, sink);
    }
}

// === Bool === //

plain_formatter!(BoolFormatter);

impl Formattable for bool {
    type Formatter = BoolFormatter;
}

impl Formatter<bool> for BoolFormatter {
    fn parse(spec: &[u8]) -> Option<Self> {
        Self::parse_spec(spec)
    }

    fn format<S: FormatSink + ?Sized>(&self, value: &bool, sink: &mut S) {
        sink.put_slice(if *value { b"true" } else { b"false" });
    }
}

// === Char === //

plain_formatter!(CharFormatter);

impl Formattable for char {
    type Formatter = CharFormatter;
}

impl Formatter<char> for CharFormatter {
    fn parse(spec: &[u8]) -> Option<Self> {
        Self::parse_spec(spec)
    }

    fn format<S: FormatSink + ?Sized>(&self, value: &char, sink: &mut S) {
        let mut buf = [0u8; 4];
        sink.put_slice(value.encode_utf8(&mut buf).as_bytes());
    }
}

// === Strings === //

plain_formatter!(StrFormatter);

/// Returns `text` up to, but not including, its first NUL byte.
pub fn truncate_nul(text: &[u8]) -> &[u8] {
    match text.iter().position(|&ch| ch == 0) {
        Some(len) => &text[..len],
        None => text,
    }
}

macro_rules! impl_str_formattable {
    ($($ty:ty => |$value:ident| $bytes:expr),* $(,)?) => {$(
        impl Formattable for $ty {
            type Formatter = StrFormatter;
        }

        impl Formatter<$ty> for StrFormatter {
            fn parse(spec: &[u8]) -> Option<Self> {
                Self::parse_spec(spec)
            }

            fn format<S: FormatSink + ?Sized>(&self, $value: &$ty, sink: &mut S) {
                sink.put_slice($bytes);
            }
        }
    )*};
}

impl_str_formattable!(
    str => |value| value.as_bytes(),
    String => |value| value.as_bytes(),
    [u8] => |value| value,
    Vec<u8> => |value| value,
    CStr => |value| value.to_bytes(),
    CString => |value| value.as_bytes(),
);

impl Formattable for Cow<'_, str> {
    type Formatter = StrFormatter;
}

impl<'a> Formatter<Cow<'a, str>> for StrFormatter {
    fn parse(spec: &[u8]) -> Option<Self> {
        Self::parse_spec(spec)
    }

    fn format<S: FormatSink + ?Sized>(&self, value: &Cow<'a, str>, sink: &mut S) {
        sink.put_slice(value.as_bytes());
    }
}

// Fixed-size buffers are treated as null-terminated within their capacity.
impl<const N: usize> Formattable for [u8; N] {
    type Formatter = StrFormatter;
}

impl<const N: usize> Formatter<[u8; N]> for StrFormatter {
    fn parse(spec: &[u8]) -> Option<Self> {
        Self::parse_spec(spec)
    }

    fn format<S: FormatSink + ?Sized>(&self, value: &[u8; N], sink: &mut S) {
        sink.put_slice(truncate_nul(value));
    }
}

// === Pointers === //

/// Formats addresses with the unsigned integer grammar, `#x` when the spec is empty.
#[derive(Debug, Copy, Clone)]
pub struct PointerFormatter(IntFormatter);

impl PointerFormatter {
    pub const DEFAULT_SPEC: &'static [u8] = b"#x";

    pub const fn parse_spec(spec: &[u8]) -> Option<Self> {
        let spec = if spec.is_empty() {
            Self::DEFAULT_SPEC
        } else {
            spec
        };

        match IntFormatter::parse_spec(spec) {
            Some(inner) => Some(Self(inner)),
            None => None,
        }
    }

    pub fn write_address<S: FormatSink + ?Sized>(&self, address: usize, sink: &mut S) {
        self.0.write(super::int::IntValue::from_u128(address as u128), sink);
    }
}

macro_rules! impl_ptr_formattable {
    ($($ty:ty => |$value:ident| $addr:expr),* $(,)?) => {$(
        impl<T: ?Sized> Formattable for $ty {
            type Formatter = PointerFormatter;
        }

        impl<T: ?Sized> Formatter<$ty> for PointerFormatter {
            fn parse(spec: &[u8]) -> Option<Self> {
                Self::parse_spec(spec)
            }

            fn format<S: FormatSink + ?Sized>(&self, $value: &$ty, sink: &mut S) {
                self.write_address($addr, sink);
            }
        }
    )*};
}

impl_ptr_formattable!(
    *const T => |value| value.cast::<()>() as usize,
    *mut T => |value| value.cast::<()>() as usize,
    NonNull<T> => |value| value.as_ptr().cast::<()>() as usize,
);

// === Display bridge === //

/// Formats any [`fmt::Display`] value. Only the empty spec is accepted.
#[derive(Debug, Copy, Clone)]
pub struct Displayed<T>(pub T);

plain_formatter!(DisplayFormatter);

impl DisplayFormatter {
    fn write_display<S: FormatSink + ?Sized>(&self, value: &dyn fmt::Display, sink: &mut S) {
        // The sink never fails, so neither does this.
        let _ = write!(SinkWriter(sink), "{value}");
    }
}

impl<T: fmt::Display> Formattable for Displayed<T> {
    type Formatter = DisplayFormatter;
}

impl<T: fmt::Display> Formatter<Displayed<T>> for DisplayFormatter {
    fn parse(spec: &[u8]) -> Option<Self> {
        Self::parse_spec(spec)
    }

    fn format<S: FormatSink + ?Sized>(&self, value: &Displayed<T>, sink: &mut S) {
        self.write_display(&value.0, sink);
    }
}

impl Formattable for fmt::Arguments<'_> {
    type Formatter = DisplayFormatter;
}

impl<'a> Formatter<fmt::Arguments<'a>> for DisplayFormatter {
    fn parse(spec: &[u8]) -> Option<Self> {
        Self::parse_spec(spec)
    }

    fn format<S: FormatSink + ?Sized>(&self, value: &fmt::Arguments<'a>, sink: &mut S) {
        self.write_display(value, sink);
    }
}

struct SinkWriter<'a, S: ?Sized>(&'a mut S);

impl<S: FormatSink + ?Sized> fmt::Write for SinkWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.put_slice(s.as_bytes());
        Ok(())
    }
}
