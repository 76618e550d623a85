use super::{
    formatter::{Formattable, Formatter},
    sink::FormatSink,
};

// === Traits === //

/// An ordered list of values addressable by index from a format string.
pub trait ValueList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Formats value `index` according to `spec`. Returns `false`, writing nothing, if the index
    /// is out of range or the value's formatter rejects the spec.
    fn format_value<S: FormatSink + ?Sized>(&self, index: usize, spec: &[u8], sink: &mut S)
    -> bool;
}

/// A [`ValueList`] whose value types are known statically, so that format strings can be
/// checked against it without any values at hand.
pub trait ValueTypes: ValueList {
    const LEN: usize;

    fn accepts(index: usize, spec: &[u8]) -> bool;
}

pub fn format_one<T, S>(value: &T, spec: &[u8], sink: &mut S) -> bool
where
    T: ?Sized + Formattable,
    S: FormatSink + ?Sized,
{
    match T::Formatter::parse(spec) {
        Some(formatter) => {
            formatter.format(value, sink);
            true
        }
        None => false,
    }
}

pub fn accepts_spec<T: ?Sized + Formattable>(spec: &[u8]) -> bool {
    T::Formatter::parse(spec).is_some()
}

// === Tuples === //

impl ValueList for () {
    fn len(&self) -> usize {
        0
    }

    fn format_value<S: FormatSink + ?Sized>(
        &self,
        _index: usize,
        _spec: &[u8],
        _sink: &mut S,
    ) -> bool {
        false
    }
}

impl ValueTypes for () {
    const LEN: usize = 0;

    fn accepts(_index: usize, _spec: &[u8]) -> bool {
        false
    }
}

macro_rules! impl_tuple {
    ($($ty:ident $name:ident),+) => {
        impl<$($ty: Formattable),+> ValueList for ($($ty,)+) {
            fn len(&self) -> usize {
                <Self as ValueTypes>::LEN
            }

            fn format_value<S: FormatSink + ?Sized>(
                &self,
                index: usize,
                spec: &[u8],
                sink: &mut S,
            ) -> bool {
                let ($($name,)+) = self;
                let mut at = 0;

                $(
                    if index == at {
                        return format_one($name, spec, sink);
                    }
                    at += 1;
                )+

                let _ = at;
                false
            }
        }

        impl<$($ty: Formattable),+> ValueTypes for ($($ty,)+) {
            const LEN: usize = [$(stringify!($ty)),+].len();

            fn accepts(index: usize, spec: &[u8]) -> bool {
                let mut at = 0;

                $(
                    if index == at {
                        return accepts_spec::<$ty>(spec);
                    }
                    at += 1;
                )+

                let _ = at;
                false
            }
        }
    };
}

macro_rules! impl_tuples {
    () => {};
    ($ty:ident $name:ident $(, $rest_ty:ident $rest_name:ident)*) => {
        impl_tuple!($ty $name $(, $rest_ty $rest_name)*);
        impl_tuples!($($rest_ty $rest_name),*);
    };
}

impl_tuples!(
    A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l
);

// === Dynamic lists === //

/// Object-safe view of a [`Formattable`] value, for lists built at runtime.
pub trait DynValue {
    fn accepts_spec(&self, spec: &[u8]) -> bool;

    fn format_dyn(&self, spec: &[u8], sink: &mut dyn FormatSink) -> bool;
}

impl<T: ?Sized + Formattable> DynValue for T {
    fn accepts_spec(&self, spec: &[u8]) -> bool {
        accepts_spec::<T>(spec)
    }

    fn format_dyn(&self, spec: &[u8], sink: &mut dyn FormatSink) -> bool {
        format_one(self, spec, sink)
    }
}

impl ValueList for [&dyn DynValue] {
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    fn format_value<S: FormatSink + ?Sized>(
        &self,
        index: usize,
        spec: &[u8],
        mut sink: &mut S,
    ) -> bool {
        let Some(value) = self.get(index) else {
            return false;
        };

        value.format_dyn(spec, &mut sink)
    }
}

impl<const N: usize> ValueList for [&dyn DynValue; N] {
    fn len(&self) -> usize {
        N
    }

    fn format_value<S: FormatSink + ?Sized>(&self, index: usize, spec: &[u8], sink: &mut S)
    -> bool {
        self.as_slice().format_value(index, spec, sink)
    }
}

impl ValueList for Vec<&dyn DynValue> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn format_value<S: FormatSink + ?Sized>(&self, index: usize, spec: &[u8], sink: &mut S)
    -> bool {
        self.as_slice().format_value(index, spec, sink)
    }
}
