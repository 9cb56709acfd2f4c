use crate::{Store, StoreError, StoreValue};
use chrono::{DateTime, Utc};
use std::fmt;
use url::Url;

/// A value type a preference can be set to from a single path segment.
pub trait PreferenceValue: Clone + fmt::Debug + Send + Sync + 'static {
    /// Parse the raw (percent-decoded) object segment.
    fn from_segment(segment: &str) -> Option<Self>;

    /// The value to store, or `None` to leave the store unchanged.
    fn to_store_value(&self) -> Option<StoreValue>;

    fn from_store_value(value: &StoreValue) -> Option<Self>;

    /// Write `self` under `key`. Never deletes: a value with no store
    /// representation is a no-op.
    fn save(&self, store: &dyn Store, key: &str) -> Result<(), StoreError> {
        match self.to_store_value() {
            Some(value) => store.set(key, value),
            None => Ok(()),
        }
    }

    /// Read `key` back as `Self`. A missing key or a value of another kind
    /// reads as `None`.
    fn load(store: &dyn Store, key: &str) -> Result<Option<Self>, StoreError> {
        Ok(store.get(key)?.as_ref().and_then(Self::from_store_value))
    }
}

primitive_preference_value!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

impl PreferenceValue for isize {
    fn from_segment(segment: &str) -> Option<Self> {
        segment.parse().ok()
    }

    fn to_store_value(&self) -> Option<StoreValue> {
        i64::try_from(*self).ok().map(StoreValue::I64)
    }

    fn from_store_value(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::I64(value) => isize::try_from(*value).ok(),
            _ => None,
        }
    }
}

impl PreferenceValue for usize {
    fn from_segment(segment: &str) -> Option<Self> {
        segment.parse().ok()
    }

    fn to_store_value(&self) -> Option<StoreValue> {
        u64::try_from(*self).ok().map(StoreValue::U64)
    }

    fn from_store_value(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::U64(value) => usize::try_from(*value).ok(),
            _ => None,
        }
    }
}

impl PreferenceValue for String {
    fn from_segment(segment: &str) -> Option<Self> {
        Some(segment.to_string())
    }

    fn to_store_value(&self) -> Option<StoreValue> {
        Some(StoreValue::String(self.clone()))
    }

    fn from_store_value(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::String(value) => Some(value.clone()),
            _ => None,
        }
    }
}

/// Opaque bytes: the UTF-8 encoding of the segment.
impl PreferenceValue for Vec<u8> {
    fn from_segment(segment: &str) -> Option<Self> {
        Some(segment.as_bytes().to_vec())
    }

    fn to_store_value(&self) -> Option<StoreValue> {
        Some(StoreValue::Data(self.clone()))
    }

    fn from_store_value(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::Data(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl PreferenceValue for Url {
    fn from_segment(segment: &str) -> Option<Self> {
        Url::parse(segment).ok()
    }

    fn to_store_value(&self) -> Option<StoreValue> {
        Some(StoreValue::Url(self.clone()))
    }

    fn from_store_value(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::Url(value) => Some(value.clone()),
            _ => None,
        }
    }
}

/// Timestamp given as (possibly fractional) seconds since the Unix epoch.
///
/// Plain decimals are read digit by digit, exact to the nanosecond; digits
/// past the ninth are truncated. Exponent forms (`1.6e9`) go through `f64`.
impl PreferenceValue for DateTime<Utc> {
    fn from_segment(segment: &str) -> Option<Self> {
        match decimal_seconds(segment) {
            Some((seconds, nanos)) => DateTime::from_timestamp(seconds, nanos),
            None => {
                let seconds: f64 = segment.parse().ok()?;
                if !seconds.is_finite() {
                    return None;
                }

                let whole = seconds.floor();
                let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
                DateTime::from_timestamp(whole as i64, nanos)
            }
        }
    }

    fn to_store_value(&self) -> Option<StoreValue> {
        Some(StoreValue::Date(*self))
    }

    fn from_store_value(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::Date(value) => Some(*value),
            _ => None,
        }
    }
}

/// Any segment parses: a value `T` rejects becomes `None`, and saving `None`
/// leaves the store unchanged.
impl<T: PreferenceValue> PreferenceValue for Option<T> {
    fn from_segment(segment: &str) -> Option<Self> {
        Some(T::from_segment(segment))
    }

    fn to_store_value(&self) -> Option<StoreValue> {
        self.as_ref().and_then(T::to_store_value)
    }

    fn from_store_value(value: &StoreValue) -> Option<Self> {
        Some(T::from_store_value(value))
    }
}

/// Split `[-+]digits[.digits]` into floor seconds and a non-negative nanosecond part.
fn decimal_seconds(segment: &str) -> Option<(i64, u32)> {
    let (sign, unsigned) = match segment.as_bytes().first()? {
        b'-' => (-1, &segment[1..]),
        b'+' => (1, &segment[1..]),
        _ => (1, segment),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let digits = &fraction[..fraction.len().min(9)];
    let nanos = if digits.is_empty() { 0 } else { digits.parse::<u32>().ok()? * 10u32.pow(9 - digits.len() as u32) };

    match (sign, nanos) {
        (1, _) => Some((whole, nanos)),
        (_, 0) => Some((-whole, 0)),
        _ => Some((-whole - 1, 1_000_000_000 - nanos)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn primitives_parse_from_segment() {
        assert_eq!(bool::from_segment("true"), Some(true));
        assert_eq!(bool::from_segment("yes"), None);
        assert_eq!(i8::from_segment("-12"), Some(-12));
        assert_eq!(u8::from_segment("-12"), None);
        assert_eq!(u16::from_segment("65535"), Some(65535));
        assert_eq!(i64::from_segment("123"), Some(123));
        assert_eq!(f64::from_segment("1.5"), Some(1.5));
        assert_eq!(isize::from_segment("7"), Some(7));
        assert_eq!(usize::from_segment("7").and_then(|v| v.to_store_value()), Some(StoreValue::U64(7)));
    }

    #[test]
    fn data_is_utf8_bytes() {
        assert_eq!(Vec::<u8>::from_segment("hé"), Some(vec![0x68, 0xc3, 0xa9]));
    }

    #[test]
    fn url_requires_absolute_url() {
        assert_eq!(Url::from_segment("https://example.com/a").map(String::from), Some("https://example.com/a".into()));
        assert_eq!(Url::from_segment("not a url"), None);
    }

    #[test]
    fn date_from_epoch_seconds() {
        let expected = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(DateTime::<Utc>::from_segment("1609459200"), Some(expected));

        let fractional = DateTime::<Utc>::from_segment("1609459200.5").unwrap();
        assert_eq!(fractional.timestamp_subsec_millis(), 500);

        let tenth = DateTime::<Utc>::from_segment("1609459200.1").unwrap();
        assert_eq!((tenth.timestamp(), tenth.timestamp_subsec_nanos()), (1_609_459_200, 100_000_000));

        let nanos = DateTime::<Utc>::from_segment("1609459200.1234567899").unwrap();
        assert_eq!(nanos.timestamp_subsec_nanos(), 123_456_789);

        let before_epoch = DateTime::<Utc>::from_segment("-1.25").unwrap();
        assert_eq!((before_epoch.timestamp(), before_epoch.timestamp_subsec_nanos()), (-2, 750_000_000));

        assert_eq!(DateTime::<Utc>::from_segment("1.6092592e9"), DateTime::<Utc>::from_segment("1609259200"));

        assert_eq!(DateTime::<Utc>::from_segment("tomorrow"), None);
    }

    #[test]
    fn optional_always_parses() {
        assert_eq!(Option::<i64>::from_segment("12"), Some(Some(12)));
        assert_eq!(Option::<i64>::from_segment("twelve"), Some(None));
    }

    #[test]
    fn saving_none_leaves_store_untouched() {
        let store = MemoryStore::new();
        store.set("age", StoreValue::I64(66)).unwrap();

        None::<i64>.save(&store, "age").unwrap();
        assert_eq!(i64::load(&store, "age").unwrap(), Some(66));

        Some(67_i64).save(&store, "age").unwrap();
        assert_eq!(i64::load(&store, "age").unwrap(), Some(67));
    }

    #[test]
    fn load_ignores_other_kinds() {
        let store = MemoryStore::new();
        store.set("name", StoreValue::String("Peter".into())).unwrap();

        assert_eq!(bool::load(&store, "name").unwrap(), None);
        assert_eq!(String::load(&store, "name").unwrap(), Some("Peter".to_string()));
        assert_eq!(String::load(&store, "missing").unwrap(), None);
    }
}
