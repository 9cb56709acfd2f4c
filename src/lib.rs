//! Deep-link routing: turn `scheme://module/subject/verb/object?key=value`
//! commands into typed actions and hand them to the executor that owns them.
//!
//! The pipeline runs strictly one way:
//!
//! ```text
//! raw URL ── UrlComponents::parse ──▶ UrlComponents
//!                                       │ UrlComponentsParser
//!                                       v
//!                                   StringAction (positional strings)
//!                                       │ OneOf [rule, rule, ...]   (first match wins)
//!                                       v
//!                                   typed action (Box<dyn ErasedAction>)
//!                                       │ Dispatcher [executor, executor, ...]
//!                                       v
//!                                   side effect on a Store / Application
//! ```
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use schemer::{MemoryStore, Options, Store, StoreValue, UrlSchemeHandler, preference_dispatcher};
//!
//! let store = Arc::new(MemoryStore::new());
//! let handler = UrlSchemeHandler::with_default_rules(preference_dispatcher(store.clone()), Options::default());
//!
//! handler.handle("app://preference/name/set/Peter").unwrap();
//! assert_eq!(store.get("name").unwrap(), Some(StoreValue::String("Peter".into())));
//! ```

use indexmap::IndexMap;
use std::fmt;

#[macro_use]
mod macros;
mod action;
mod api;
mod dispatch;
mod parser;
mod rules;
mod store;

pub use action::{Action, ErasedAction, GenericAction, LowercaseFields, Mode, StringAction};
pub use api::{
    DEFAULT_PARSERS, DefaultParsers, Fallback, FallbackReason, Handled, Options, UrlEvent, UrlSchemeHandler,
    preference_dispatcher,
};
pub use dispatch::{
    Attempt, AttemptOutcome, DispatchError, DispatchRun, Dispatcher, ErasedExecutor, ExecuteError, Executor, FnSink,
    Sink, StoreSink,
};
pub use parser::{
    BoxedParser, ComponentsError, Conversion, Direct, Fail, Fallible, FlatMap, FnParser, Just, LazyFlatMap, Map,
    MapConversion, OneOf, ParseError, Parser, ParserExt, Passthrough, QueryItem, UrlComponents, UrlComponentsParser,
};
pub use rules::app::{AppCommand, AppControlAction, AppControlExecutor, AppControlParser, Application, ApplicationRef};
pub use rules::preference::{
    ApplyToStore, ChangePreference, ChangePreferenceExecutor, ChangePreferenceParser, DeletePreference,
    DeletePreferenceExecutor, DeletePreferenceParser, PreferenceCommand, PreferenceValue,
};
pub use store::{MemoryStore, Store, StoreError, StoreValue};

// --- Core types -------------------------------------------------------------

/// Case-insensitive command namespace, taken from the URL host.
///
/// Construction always lowercases, so `Module::new("HOST") == Module::new("host")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Module {
    name: String,
}

impl Module {
    pub const APP: &'static str = "app";
    pub const PREFERENCE: &'static str = "preference";

    pub fn new(name: impl AsRef<str>) -> Self {
        Module { name: name.as_ref().to_lowercase() }
    }

    pub fn app() -> Self {
        Module::new(Self::APP)
    }

    pub fn preference() -> Self {
        Module::new(Self::PREFERENCE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive comparison against a raw module name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name.to_lowercase()
    }
}

impl From<&str> for Module {
    fn from(name: &str) -> Self {
        Module::new(name)
    }
}

impl From<String> for Module {
    fn from(name: String) -> Self {
        Module::new(name)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// URL query parameters with three-valued per-key semantics.
///
/// The value is `None` only when the query item has no `=` at all:
///
/// ```text
/// ?a=1&b=&c&d=4   ──▶   { a: Some("1"), b: Some(""), c: None, d: Some("4") }
/// ```
///
/// Repeated keys keep the last value. Entries remember the position of their
/// first occurrence, which makes [`Payload::lowercased`] deterministic: when
/// two distinct keys fold to the same lowercase form, the key whose first
/// occurrence came later wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    entries: IndexMap<String, Option<String>>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Payload::default()
    }

    /// Look up `key`: `None` when absent, `Some(None)` for a bare key,
    /// `Some(Some(value))` otherwise.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    /// The value for `key`, treating bare keys like absent ones.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).flatten()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// New payload with keys and values lowercased.
    ///
    /// Keys that collide after folding collapse into one entry holding the
    /// value of the later original entry.
    pub fn lowercased(&self) -> Self {
        self.entries.iter().map(|(k, v)| (k.to_lowercase(), v.as_ref().map(|v| v.to_lowercase()))).collect()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Payload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
        let mut entries = IndexMap::new();
        for (key, value) in iter {
            // `insert` keeps the original slot and replaces the value: last occurrence wins.
            entries.insert(key.into(), value.map(Into::into));
        }
        Payload { entries }
    }
}
