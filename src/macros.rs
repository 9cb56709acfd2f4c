/// Build a [`OneOf`](crate::OneOf) from an ordered list of parsers.
///
/// ```
/// use schemer::{Fail, Just, Parser, one_of};
///
/// let parser = one_of!(Fail::<(), &str>::failed(), Just::new("second"), Just::new("third"));
/// assert_eq!(parser.parse(&()).unwrap(), "second");
/// ```
#[macro_export]
macro_rules! one_of {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::OneOf::new($first)$(.or($rest))*
    };
}

/// Implement `PreferenceValue` for primitives stored as one `StoreValue` variant.
macro_rules! primitive_preference_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl $crate::PreferenceValue for $ty {
            fn from_segment(segment: &str) -> Option<Self> {
                segment.parse().ok()
            }

            fn to_store_value(&self) -> Option<$crate::StoreValue> {
                Some($crate::StoreValue::$variant(*self))
            }

            fn from_store_value(value: &$crate::StoreValue) -> Option<Self> {
                match value {
                    $crate::StoreValue::$variant(value) => Some(*value),
                    _ => None,
                }
            }
        }
    )*};
}
