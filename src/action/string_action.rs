//! Positional string actions.

use super::Action;
use crate::{Module, Payload};

bitflags::bitflags! {
    /// Optional fields folded by [`StringAction::lowercased_with`].
    ///
    /// Subject and verb are always folded; they name behavior. The object is
    /// usually the value to work with and is left alone unless requested.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LowercaseFields: u8 {
        const OBJECT  = 1 << 0;
        const PAYLOAD = 1 << 1;
    }
}

impl Default for LowercaseFields {
    fn default() -> Self {
        LowercaseFields::PAYLOAD
    }
}

/// Which positional fields a URL provided.
///
/// There is no case with a later field but without an earlier one: a verb
/// always comes with a subject, an object always with a verb.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    Module(Module),
    ModuleSubject(Module, String),
    ModuleSubjectVerb(Module, String, String),
    ModuleSubjectVerbObject(Module, String, String, String),
}

impl Mode {
    /// Build the longest valid prefix of `subject`, `verb`, `object`.
    ///
    /// ```text
    /// (Some, None, Some) ──▶ ModuleSubject    (object dropped: verb missing)
    /// (None, Some, _)    ──▶ Module
    /// ```
    pub fn from_parts(module: Module, subject: Option<String>, verb: Option<String>, object: Option<String>) -> Self {
        match (subject, verb, object) {
            (Some(subject), Some(verb), Some(object)) => Mode::ModuleSubjectVerbObject(module, subject, verb, object),
            (Some(subject), Some(verb), None) => Mode::ModuleSubjectVerb(module, subject, verb),
            (Some(subject), None, _) => Mode::ModuleSubject(module, subject),
            (None, _, _) => Mode::Module(module),
        }
    }

    pub fn module(&self) -> &Module {
        match self {
            Mode::Module(module)
            | Mode::ModuleSubject(module, _)
            | Mode::ModuleSubjectVerb(module, _, _)
            | Mode::ModuleSubjectVerbObject(module, _, _, _) => module,
        }
    }

    pub fn subject(&self) -> Option<&str> {
        match self {
            Mode::Module(_) => None,
            Mode::ModuleSubject(_, subject)
            | Mode::ModuleSubjectVerb(_, subject, _)
            | Mode::ModuleSubjectVerbObject(_, subject, _, _) => Some(subject),
        }
    }

    pub fn verb(&self) -> Option<&str> {
        match self {
            Mode::Module(_) | Mode::ModuleSubject(..) => None,
            Mode::ModuleSubjectVerb(_, _, verb) | Mode::ModuleSubjectVerbObject(_, _, verb, _) => Some(verb),
        }
    }

    pub fn object(&self) -> Option<&str> {
        match self {
            Mode::ModuleSubjectVerbObject(_, _, _, object) => Some(object),
            _ => None,
        }
    }

    /// Number of positional fields present after the module (0..=3).
    pub fn depth(&self) -> usize {
        match self {
            Mode::Module(_) => 0,
            Mode::ModuleSubject(..) => 1,
            Mode::ModuleSubjectVerb(..) => 2,
            Mode::ModuleSubjectVerbObject(..) => 3,
        }
    }

    fn lowercased(&self, include_object: bool) -> Self {
        match self {
            Mode::Module(module) => Mode::Module(module.clone()),
            Mode::ModuleSubject(module, subject) => Mode::ModuleSubject(module.clone(), subject.to_lowercase()),
            Mode::ModuleSubjectVerb(module, subject, verb) => {
                Mode::ModuleSubjectVerb(module.clone(), subject.to_lowercase(), verb.to_lowercase())
            }
            Mode::ModuleSubjectVerbObject(module, subject, verb, object) => Mode::ModuleSubjectVerbObject(
                module.clone(),
                subject.to_lowercase(),
                verb.to_lowercase(),
                if include_object { object.to_lowercase() } else { object.clone() },
            ),
        }
    }
}

/// Action with as many URL components as were present, kept as strings.
///
/// This is the output of URL decomposition and the usual input of every
/// further parsing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringAction {
    mode: Mode,
    payload: Option<Payload>,
}

impl StringAction {
    pub fn new(mode: Mode, payload: Option<Payload>) -> Self {
        StringAction { mode, payload }
    }

    /// See [`Mode::from_parts`]: skipped fields collapse to the longest valid prefix.
    pub fn from_parts(
        module: Module,
        subject: Option<String>,
        verb: Option<String>,
        object: Option<String>,
        payload: Option<Payload>,
    ) -> Self {
        StringAction { mode: Mode::from_parts(module, subject, verb, object), payload }
    }

    /// Consume `segments` greedily into subject, verb and object. Segments
    /// past the third are ignored.
    pub fn from_segments<I, S>(module: impl Into<Module>, segments: I, payload: Option<Payload>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments = segments.into_iter().map(Into::into);
        let subject = segments.next();
        let verb = segments.next();
        let object = segments.next();
        StringAction::from_parts(module.into(), subject, verb, object, payload)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn into_parts(self) -> (Mode, Option<Payload>) {
        (self.mode, self.payload)
    }

    /// Copy with subject, verb and payload lowercased; the object is kept as-is.
    pub fn lowercased(&self) -> Self {
        self.lowercased_with(LowercaseFields::default())
    }

    /// Copy with subject, verb, object and payload lowercased.
    pub fn lowercased_including_object(&self) -> Self {
        self.lowercased_with(LowercaseFields::all())
    }

    /// Copy with subject and verb lowercased, plus whichever of `fields` are set.
    ///
    /// Folding the payload only makes sense when its keys stay unique after
    /// lowercasing; see [`Payload::lowercased`] for how collisions resolve.
    pub fn lowercased_with(&self, fields: LowercaseFields) -> Self {
        debug_assert_eq!(self.mode.module().name(), self.mode.module().name().to_lowercase());

        let payload = if fields.contains(LowercaseFields::PAYLOAD) {
            self.payload.as_ref().map(Payload::lowercased)
        } else {
            self.payload.clone()
        };

        StringAction { mode: self.mode.lowercased(fields.contains(LowercaseFields::OBJECT)), payload }
    }
}

impl Action for StringAction {
    type Subject = Option<String>;
    type Verb = Option<String>;
    type Object = Option<String>;

    fn module(&self) -> &Module {
        self.mode.module()
    }

    fn subject(&self) -> Option<String> {
        self.mode.subject().map(str::to_string)
    }

    fn verb(&self) -> Option<String> {
        self.mode.verb().map(str::to_string)
    }

    fn object(&self) -> Option<String> {
        self.mode.object().map(str::to_string)
    }

    fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn action(module: &str, subject: Option<&str>, verb: Option<&str>, object: Option<&str>) -> StringAction {
        StringAction::from_parts(
            Module::new(module),
            subject.map(String::from),
            verb.map(String::from),
            object.map(String::from),
            None,
        )
    }

    fn host() -> Module {
        Module::new("host")
    }

    #[test]
    fn from_parts_never_skips_a_field() {
        let module_only = StringAction::new(Mode::Module(host()), None);

        assert_eq!(action("host", None, None, None), module_only);
        assert_eq!(action("host", None, Some("irrelevant"), None), module_only);
        assert_eq!(action("host", None, None, Some("irrelevant")), module_only);
        assert_eq!(action("host", None, Some("irrelevant"), Some("irrelevant")), module_only);

        assert_eq!(
            action("host", Some("path1"), None, Some("irrelevant")),
            StringAction::new(Mode::ModuleSubject(host(), "path1".into()), None)
        );
        assert_eq!(
            action("host", Some("path1"), Some("path2"), None),
            StringAction::new(Mode::ModuleSubjectVerb(host(), "path1".into(), "path2".into()), None)
        );
        assert_eq!(
            action("host", Some("path1"), Some("path2"), Some("path3")),
            StringAction::new(
                Mode::ModuleSubjectVerbObject(host(), "path1".into(), "path2".into(), "path3".into()),
                None
            )
        );
    }

    #[test]
    fn from_segments_ignores_extra_segments() {
        let parsed = StringAction::from_segments("host", ["a", "b", "c", "d"], None);
        assert_eq!(parsed.mode().depth(), 3);
        assert_eq!(parsed.mode().object(), Some("c"));

        for (count, expected_depth) in [(0, 0), (1, 1), (2, 2), (3, 3)] {
            let segments = ["a", "b", "c"].into_iter().take(count);
            assert_eq!(StringAction::from_segments("host", segments, None).mode().depth(), expected_depth);
        }
    }

    #[test]
    fn action_accessors_follow_mode() {
        let parsed = action("host", Some("s"), Some("v"), None);

        assert_eq!(parsed.module(), &host());
        assert_eq!(parsed.subject().as_deref(), Some("s"));
        assert_eq!(parsed.verb().as_deref(), Some("v"));
        assert_eq!(parsed.object(), None);
        assert_eq!(parsed.module_subject_verb(), (&host(), Some("s".to_string()), Some("v".to_string())));
    }

    #[test]
    fn lowercased_keeps_object_by_default() {
        let payload: Payload = [("KEY", Some("VALUE"))].into_iter().collect();
        let lowered_payload: Payload = [("key", Some("value"))].into_iter().collect();
        let upper = StringAction::from_parts(
            Module::new("MODULE"),
            Some("SUBJECT".into()),
            Some("VERB".into()),
            Some("OBJECT".into()),
            Some(payload),
        );

        assert_eq!(
            upper.lowercased(),
            StringAction::from_parts(
                Module::new("module"),
                Some("subject".into()),
                Some("verb".into()),
                Some("OBJECT".into()),
                Some(lowered_payload.clone()),
            )
        );
        assert_eq!(
            upper.lowercased_including_object(),
            StringAction::from_parts(
                Module::new("module"),
                Some("subject".into()),
                Some("verb".into()),
                Some("object".into()),
                Some(lowered_payload),
            )
        );
    }

    #[test]
    fn lowercased_without_payload_or_object() {
        assert_eq!(
            action("MODULE", Some("SUBJECT"), Some("VERB"), Some("OBJECT")).lowercased_including_object(),
            action("module", Some("subject"), Some("verb"), Some("object"))
        );
        assert_eq!(
            action("MODULE", Some("SUBJECT"), Some("VERB"), None).lowercased(),
            action("module", Some("subject"), Some("verb"), None)
        );
    }

    #[test]
    fn lowercased_with_can_leave_payload_alone() {
        let payload: Payload = [("KEY", Some("VALUE"))].into_iter().collect();
        let upper = StringAction::from_parts(host(), Some("SUBJECT".into()), None, None, Some(payload.clone()));

        let lowered = upper.lowercased_with(LowercaseFields::empty());
        assert_eq!(lowered.mode().subject(), Some("subject"));
        assert_eq!(lowered.payload(), Some(&payload));
    }
}
