//! Parse failures.

use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// The one failure channel shared by every parser.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The parser does not apply to this input. Expected and recoverable:
    /// [`OneOf`](crate::OneOf) moves on to the next alternative.
    #[error("parser does not apply to this input")]
    Failed,

    /// A foreign error surfaced during parsing. The original error is kept
    /// for diagnostics.
    #[error(transparent)]
    Wrapping(Arc<dyn Error + Send + Sync>),
}

impl ParseError {
    /// Normalize any error into a `ParseError`. Errors that already are a
    /// `ParseError` pass through unchanged instead of being wrapped twice.
    pub fn wrap<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(error);
        match boxed.downcast::<ParseError>() {
            Ok(parse_error) => *parse_error,
            Err(foreign) => ParseError::Wrapping(Arc::from(foreign)),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ParseError::Failed)
    }

    /// The wrapped foreign error, if any.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            ParseError::Failed => None,
            ParseError::Wrapping(cause) => Some(cause.as_ref()),
        }
    }

    pub fn downcast_cause<E: Error + 'static>(&self) -> Option<&E> {
        self.cause().and_then(|cause| cause.downcast_ref::<E>())
    }
}
