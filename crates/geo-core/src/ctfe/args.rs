/// A value known at compile time, erased to one of the kinds the `const` engine can format.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ConstArg {
    Bool(bool),
    Char(char),
    Str(&'static str),
    Int(i128),
    UInt(u128),
}

/// Lifts a typed constant into a [`ConstArg`] through `into_arg`, which resolves per wrapped type.
///
/// Integer literals need a suffix (`5_u8`) so that a single `into_arg` applies.
#[derive(Debug, Copy, Clone)]
pub struct ArgWrapper<T>(pub T);

macro_rules! impl_into_arg {
    ($($ty:ty => |$value:ident| $arg:expr),* $(,)?) => {$(
        impl ArgWrapper<$ty> {
            pub const fn into_arg(self) -> ConstArg {
                let $value = self.0;
                $arg
            }
        }
    )*};
}

impl_into_arg!(
    ConstArg => |value| value,
    bool => |value| ConstArg::Bool(value),
    char => |value| ConstArg::Char(value),
    &'static str => |value| ConstArg::Str(value),
    i8 => |value| ConstArg::Int(value as i128),
    i16 => |value| ConstArg::Int(value as i128),
    i32 => |value| ConstArg::Int(value as i128),
    i64 => |value| ConstArg::Int(value as i128),
    i128 => |value| ConstArg::Int(value),
    isize => |value| ConstArg::Int(value as i128),
    u8 => |value| ConstArg::UInt(value as u128),
    u16 => |value| ConstArg::UInt(value as u128),
    u32 => |value| ConstArg::UInt(value as u128),
    u64 => |value| ConstArg::UInt(value as u128),
    u128 => |value| ConstArg::UInt(value),
    usize => |value| ConstArg::UInt(value as u128),
);
