//! Action model.
//!
//! An action is a parsed command: a [`Module`] plus up to three positional
//! fields and an optional [`Payload`]. In the context of a module, the
//! `subject` is transformed via the `verb`, using the `object`, the payload,
//! both, or nothing:
//!
//! ```text
//! myapp://amplifier/volume/set/11
//!         ^^^^^^^^^ ^^^^^^ ^^^ ^^
//!         module    subject verb object      (binary: volume = 11)
//!
//! myapp://preference/volume/delete
//!                           ^^^^^^            (unary: no object)
//! ```
//!
//! ## Shapes
//!
//! - [`StringAction`]: the most permissive representation, straight out of URL
//!   decomposition. Its [`Mode`] carries exactly the positional fields that were
//!   present.
//! - [`GenericAction`]: subject/verb/object refined into arbitrary types.
//! - Family-specific actions (see `src/rules/**`) implement [`Action`] directly.
//!
//! All action values are immutable; every transformation returns a new value.
//!
//! ## Type erasure
//!
//! [`ErasedAction`] is implemented for every `Action` and lets the dispatcher
//! carry heterogeneous actions as `Box<dyn ErasedAction>` and recover the
//! concrete type by downcasting.

#[path = "action/erased.rs"]
mod erased;
#[path = "action/generic.rs"]
mod generic;
#[path = "action/string_action.rs"]
mod string_action;

pub use erased::ErasedAction;
pub use generic::GenericAction;
pub use string_action::{LowercaseFields, Mode, StringAction};

use crate::{Module, Payload};

/// A parsed command with typed positional fields.
///
/// Accessors return owned values so that computed fields (for example the
/// optional fields of a [`StringAction`]) and stored fields look the same to
/// generic code.
pub trait Action {
    type Subject;
    type Verb;
    type Object;

    fn module(&self) -> &Module;
    fn subject(&self) -> Self::Subject;
    fn verb(&self) -> Self::Verb;
    fn object(&self) -> Self::Object;
    fn payload(&self) -> Option<&Payload>;

    /// `(module, subject, verb)` for pattern matching.
    fn module_subject_verb(&self) -> (&Module, Self::Subject, Self::Verb) {
        (self.module(), self.subject(), self.verb())
    }

    /// `(module, subject, verb, object)` for pattern matching.
    fn module_subject_verb_object(&self) -> (&Module, Self::Subject, Self::Verb, Self::Object) {
        (self.module(), self.subject(), self.verb(), self.object())
    }
}
