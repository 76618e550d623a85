//! Format strings and numeric parsing over byte strings, usable at runtime and during constant
//! evaluation.

pub mod ascii;
pub mod ctfe;
pub mod format;
pub mod parse;
