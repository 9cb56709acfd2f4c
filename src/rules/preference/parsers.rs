use super::{ChangePreference, DeletePreference, PreferenceCommand, PreferenceValue};
use crate::{Module, ParseError, Parser, StringAction};
use std::fmt;
use std::marker::PhantomData;

/// `preference/<key>/delete`. Anything after the verb is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeletePreferenceParser;

impl Parser<StringAction> for DeletePreferenceParser {
    type Output = DeletePreference;

    fn parse(&self, input: &StringAction) -> Result<DeletePreference, ParseError> {
        let action = input.lowercased();
        let mode = action.mode();

        match (mode.subject(), mode.verb().and_then(PreferenceCommand::from_verb)) {
            (Some(key), Some(PreferenceCommand::Delete)) if mode.module().is(Module::PREFERENCE) => {
                Ok(DeletePreference::new(key))
            }
            _ => Err(ParseError::Failed),
        }
    }
}

/// `preference/<key>/set/<value>`, where `<value>` parses as `V`.
///
/// The value segment keeps its case.
pub struct ChangePreferenceParser<V> {
    _value: PhantomData<fn() -> V>,
}

impl<V> ChangePreferenceParser<V> {
    pub fn new() -> Self {
        ChangePreferenceParser { _value: PhantomData }
    }
}

impl<V> Default for ChangePreferenceParser<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for ChangePreferenceParser<V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<V> Copy for ChangePreferenceParser<V> {}

impl<V> fmt::Debug for ChangePreferenceParser<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChangePreferenceParser<{}>", std::any::type_name::<V>())
    }
}

impl<V: PreferenceValue> Parser<StringAction> for ChangePreferenceParser<V> {
    type Output = ChangePreference<V>;

    fn parse(&self, input: &StringAction) -> Result<ChangePreference<V>, ParseError> {
        let action = input.lowercased();
        let mode = action.mode();

        let (Some(key), Some(PreferenceCommand::Set), Some(raw)) =
            (mode.subject(), mode.verb().and_then(PreferenceCommand::from_verb), mode.object())
        else {
            return Err(ParseError::Failed);
        };
        if !mode.module().is(Module::PREFERENCE) {
            return Err(ParseError::Failed);
        }

        let value = V::from_segment(raw).ok_or(ParseError::Failed)?;
        Ok(ChangePreference::new(key, value))
    }
}
