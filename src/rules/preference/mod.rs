//! Preference actions: change or delete one key of the [`Store`](crate::Store).
//!
//! ```text
//! app://preference/<key>/set/<value>      ──▶ ChangePreference<V> { key, value }
//! app://preference/<key>/delete[/...]     ──▶ DeletePreference { key }
//! ```
//!
//! Keys are case-folded (they come from the subject), values are not (they
//! come from the object). The value type is chosen by which
//! `ChangePreferenceParser<V>` claims the segment first.

mod executors;
mod parsers;
mod value;

#[cfg(test)]
mod tests;

pub use executors::{ChangePreferenceExecutor, DeletePreferenceExecutor};
pub use parsers::{ChangePreferenceParser, DeletePreferenceParser};
pub use value::PreferenceValue;

use crate::{Action, Module, Payload, Store, StoreError};
use once_cell::sync::Lazy;
use std::fmt;

static PREFERENCE: Lazy<Module> = Lazy::new(Module::preference);

/// Verb of a preference action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceCommand {
    Set,
    Delete,
}

impl PreferenceCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceCommand::Set => "set",
            PreferenceCommand::Delete => "delete",
        }
    }

    /// Recognize an already lowercased verb.
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "set" => Some(PreferenceCommand::Set),
            "delete" => Some(PreferenceCommand::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for PreferenceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set `key` to `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangePreference<V> {
    pub key: String,
    pub value: V,
}

impl<V> ChangePreference<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        ChangePreference { key: key.into(), value }
    }
}

impl<V: Clone> Action for ChangePreference<V> {
    type Subject = String;
    type Verb = PreferenceCommand;
    type Object = V;

    fn module(&self) -> &Module {
        &PREFERENCE
    }

    fn subject(&self) -> String {
        self.key.clone()
    }

    fn verb(&self) -> PreferenceCommand {
        PreferenceCommand::Set
    }

    fn object(&self) -> V {
        self.value.clone()
    }

    fn payload(&self) -> Option<&Payload> {
        None
    }
}

/// Remove `key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeletePreference {
    pub key: String,
}

impl DeletePreference {
    pub fn new(key: impl Into<String>) -> Self {
        DeletePreference { key: key.into() }
    }
}

impl Action for DeletePreference {
    type Subject = String;
    type Verb = PreferenceCommand;
    type Object = ();

    fn module(&self) -> &Module {
        &PREFERENCE
    }

    fn subject(&self) -> String {
        self.key.clone()
    }

    fn verb(&self) -> PreferenceCommand {
        PreferenceCommand::Delete
    }

    fn object(&self) {}

    fn payload(&self) -> Option<&Payload> {
        None
    }
}

/// An action that knows how to apply itself to a [`Store`].
pub trait ApplyToStore {
    fn apply(&self, store: &dyn Store) -> Result<(), StoreError>;
}

impl<V: PreferenceValue> ApplyToStore for ChangePreference<V> {
    /// Optional values that are `None` leave the store untouched.
    fn apply(&self, store: &dyn Store) -> Result<(), StoreError> {
        self.value.save(store, &self.key)
    }
}

impl ApplyToStore for DeletePreference {
    fn apply(&self, store: &dyn Store) -> Result<(), StoreError> {
        store.delete(&self.key)
    }
}
