//! Fully-typed actions.

use super::Action;
use crate::{Module, Payload};

/// An action whose subject, verb and object have been refined into arbitrary
/// types, e.g. a verb narrowed to an enum of recognized commands.
///
/// Unary commands use `()` as the object type (the default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericAction<S, V, O = ()> {
    pub module: Module,
    pub subject: S,
    pub verb: V,
    pub object: O,
    pub payload: Option<Payload>,
}

impl<S, V, O> GenericAction<S, V, O> {
    pub fn new(module: Module, subject: S, verb: V, object: O, payload: Option<Payload>) -> Self {
        GenericAction { module, subject, verb, object, payload }
    }

    /// Copy every field of `action` into a `GenericAction` of the same types.
    pub fn of<A>(action: &A) -> Self
    where
        A: Action<Subject = S, Verb = V, Object = O>,
    {
        GenericAction {
            module: action.module().clone(),
            subject: action.subject(),
            verb: action.verb(),
            object: action.object(),
            payload: action.payload().cloned(),
        }
    }

    pub fn map_subject<T>(self, transform: impl FnOnce(S) -> T) -> GenericAction<T, V, O> {
        GenericAction {
            module: self.module,
            subject: transform(self.subject),
            verb: self.verb,
            object: self.object,
            payload: self.payload,
        }
    }

    pub fn map_verb<T>(self, transform: impl FnOnce(V) -> T) -> GenericAction<S, T, O> {
        GenericAction {
            module: self.module,
            subject: self.subject,
            verb: transform(self.verb),
            object: self.object,
            payload: self.payload,
        }
    }

    pub fn map_object<T>(self, transform: impl FnOnce(O) -> T) -> GenericAction<S, V, T> {
        GenericAction {
            module: self.module,
            subject: self.subject,
            verb: self.verb,
            object: transform(self.object),
            payload: self.payload,
        }
    }

    /// Like [`map_verb`](Self::map_verb) for refinements that can fail.
    pub fn try_map_verb<T, E>(self, transform: impl FnOnce(V) -> Result<T, E>) -> Result<GenericAction<S, T, O>, E> {
        Ok(GenericAction {
            module: self.module,
            subject: self.subject,
            verb: transform(self.verb)?,
            object: self.object,
            payload: self.payload,
        })
    }

    /// Like [`map_object`](Self::map_object) for refinements that can fail.
    pub fn try_map_object<T, E>(
        self,
        transform: impl FnOnce(O) -> Result<T, E>,
    ) -> Result<GenericAction<S, V, T>, E> {
        Ok(GenericAction {
            module: self.module,
            subject: self.subject,
            verb: self.verb,
            object: transform(self.object)?,
            payload: self.payload,
        })
    }
}

impl<S, V> GenericAction<S, V, ()> {
    /// Unary action without an object.
    pub fn unary(module: Module, subject: S, verb: V, payload: Option<Payload>) -> Self {
        GenericAction::new(module, subject, verb, (), payload)
    }
}

impl<S: Clone, V: Clone, O: Clone> Action for GenericAction<S, V, O> {
    type Subject = S;
    type Verb = V;
    type Object = O;

    fn module(&self) -> &Module {
        &self.module
    }

    fn subject(&self) -> S {
        self.subject.clone()
    }

    fn verb(&self) -> V {
        self.verb.clone()
    }

    fn object(&self) -> O {
        self.object.clone()
    }

    fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }
}
