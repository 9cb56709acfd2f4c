//! Application control: `app/control/<command>`.
//!
//! Lifecycle primitives belong to the host; this family only recognizes the
//! command and forwards it to an [`Application`].

use crate::{Action, ExecuteError, Executor, Module, ParseError, Parser, Payload, StringAction};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

static APP: Lazy<Module> = Lazy::new(Module::app);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppCommand {
    Terminate,
}

impl AppCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            AppCommand::Terminate => "terminate",
        }
    }

    /// Recognize an already lowercased verb.
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "terminate" => Some(AppCommand::Terminate),
            _ => None,
        }
    }
}

impl fmt::Display for AppCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppControlAction {
    pub command: AppCommand,
    pub payload: Option<Payload>,
}

impl AppControlAction {
    pub const SUBJECT: &'static str = "control";

    pub fn new(command: AppCommand) -> Self {
        AppControlAction { command, payload: None }
    }
}

impl Action for AppControlAction {
    type Subject = &'static str;
    type Verb = AppCommand;
    type Object = ();

    fn module(&self) -> &Module {
        &APP
    }

    fn subject(&self) -> &'static str {
        Self::SUBJECT
    }

    fn verb(&self) -> AppCommand {
        self.command
    }

    fn object(&self) {}

    fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }
}

/// `app/control/<command>`. Anything after the verb is ignored; the payload
/// is carried over.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppControlParser;

impl Parser<StringAction> for AppControlParser {
    type Output = AppControlAction;

    fn parse(&self, input: &StringAction) -> Result<AppControlAction, ParseError> {
        let action = input.lowercased();
        let mode = action.mode();

        match (mode.subject(), mode.verb().and_then(AppCommand::from_verb)) {
            (Some(AppControlAction::SUBJECT), Some(command)) if mode.module().is(Module::APP) => {
                Ok(AppControlAction { command, payload: action.payload().cloned() })
            }
            _ => Err(ParseError::Failed),
        }
    }
}

/// Host application lifecycle.
pub trait Application: Send + Sync {
    fn terminate(&self) -> Result<(), ExecuteError>;
}

pub type ApplicationRef = Arc<dyn Application>;

pub struct AppControlExecutor {
    application: ApplicationRef,
}

impl AppControlExecutor {
    pub fn new(application: ApplicationRef) -> Self {
        AppControlExecutor { application }
    }
}

impl fmt::Debug for AppControlExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppControlExecutor")
    }
}

impl Executor for AppControlExecutor {
    type Action = AppControlAction;

    fn execute(&self, action: &AppControlAction) -> Result<(), ExecuteError> {
        match action.command {
            AppCommand::Terminate => self.application.terminate(),
        }
    }
}
