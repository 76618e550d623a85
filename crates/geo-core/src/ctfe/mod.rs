//! Formatting during constant evaluation.
//!
//! This shares the format-string scanner, spec parsers, and integer layout with
//! [`crate::format`], so a format string produces the same text in both. Only the value kinds in
//! [`ConstArg`] are supported.

mod args;
mod eval;
mod static_string;

pub use self::{
    args::{ArgWrapper, ConstArg},
    eval::{format, length, validate},
    static_string::StaticString,
};

/// Formats constant arguments into a [`StaticString`] sized exactly to the output.
///
/// A format string that does not validate against its arguments fails compilation.
///
/// ```
/// let banner = geo_core::static_format!("v{}.{:02}", 1_u8, 7_u8);
/// assert_eq!(banner, "v1.07");
/// ```
#[macro_export]
macro_rules! static_format {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {{
        const FMT: &str = $fmt;
        const ARGS: &[$crate::ctfe::ConstArg] = &[$($crate::ctfe::ArgWrapper($arg).into_arg()),*];
        const LEN: usize = $crate::ctfe::length(FMT, ARGS);
        const OUT: $crate::ctfe::StaticString<LEN> = {
            assert!(
                $crate::ctfe::validate(FMT, ARGS),
                "format string does not match its arguments",
            );
            $crate::ctfe::format::<LEN>(FMT, ARGS)
        };
        OUT
    }};
}
