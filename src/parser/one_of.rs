//! Ordered alternation.

use super::{BoxedParser, ParseError, Parser};
use std::fmt;
use tracing::trace;

/// Tries each parser in order and returns the first success.
///
/// A `OneOf` always holds at least one alternative: it can only be built from
/// a first parser, and more are appended with [`OneOf::or`] (or the `one_of!`
/// macro). When every alternative fails, the result is the most recent
/// [`ParseError::Wrapping`] seen, or [`ParseError::Failed`] if no alternative
/// raised a foreign error. A single-alternative `OneOf` therefore behaves
/// exactly like that alternative.
pub struct OneOf<I: ?Sized, O> {
    parsers: Vec<BoxedParser<I, O>>,
}

impl<I: ?Sized, O> OneOf<I, O> {
    pub fn new<P>(first: P) -> Self
    where
        P: Parser<I, Output = O> + Send + Sync + 'static,
    {
        OneOf { parsers: vec![Box::new(first)] }
    }

    /// Append an alternative, tried after every one already present.
    pub fn or<P>(mut self, next: P) -> Self
    where
        P: Parser<I, Output = O> + Send + Sync + 'static,
    {
        self.parsers.push(Box::new(next));
        self
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<I: ?Sized, O> Parser<I> for OneOf<I, O> {
    type Output = O;

    fn parse(&self, input: &I) -> Result<O, ParseError> {
        let mut foreign = None;

        for (alternative, parser) in self.parsers.iter().enumerate() {
            match parser.parse(input) {
                Ok(output) => {
                    trace!(alternative, "alternative matched");
                    return Ok(output);
                }
                Err(error) => {
                    trace!(alternative, %error, "alternative did not apply");
                    if !error.is_failed() {
                        foreign = Some(error);
                    }
                }
            }
        }

        Err(foreign.unwrap_or(ParseError::Failed))
    }
}

impl<I: ?Sized, O> fmt::Debug for OneOf<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneOf").field("alternatives", &self.parsers.len()).finish()
    }
}
