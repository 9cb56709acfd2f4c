//! Leaf parsers.

use super::{ParseError, Parser};
use std::error::Error;
use std::fmt;
use std::marker::PhantomData;

/// Always fails with the stored error.
///
/// Errors are normalized when the parser is built: a [`ParseError`] is kept
/// as is, anything else becomes [`ParseError::Wrapping`].
pub struct Fail<I: ?Sized, O> {
    error: ParseError,
    _marker: PhantomData<fn(&I) -> O>,
}

impl<I: ?Sized, O> Fail<I, O> {
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Fail { error: ParseError::wrap(error), _marker: PhantomData }
    }

    pub fn failed() -> Self {
        Fail { error: ParseError::Failed, _marker: PhantomData }
    }
}

impl<I: ?Sized, O> Parser<I> for Fail<I, O> {
    type Output = O;

    fn parse(&self, _input: &I) -> Result<O, ParseError> {
        Err(self.error.clone())
    }
}

impl<I: ?Sized, O> fmt::Debug for Fail<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fail").field(&self.error).finish()
    }
}

/// Ignores its (unit) input and always succeeds.
pub struct Just<O> {
    generator: Box<dyn Fn() -> O + Send + Sync>,
}

impl<O> Just<O> {
    pub fn new(value: O) -> Self
    where
        O: Clone + Send + Sync + 'static,
    {
        Just { generator: Box::new(move || value.clone()) }
    }

    /// Compute the value on every parse.
    pub fn with<F>(generator: F) -> Self
    where
        F: Fn() -> O + Send + Sync + 'static,
    {
        Just { generator: Box::new(generator) }
    }
}

impl<O> Parser<()> for Just<O> {
    type Output = O;

    fn parse(&self, _input: &()) -> Result<O, ParseError> {
        Ok((self.generator)())
    }
}

impl<O> fmt::Debug for Just<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Just(<function>)")
    }
}

/// Identity parser.
pub struct Passthrough<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Passthrough<T> {
    pub fn new() -> Self {
        Passthrough { _marker: PhantomData }
    }
}

impl<T> Default for Passthrough<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Passthrough<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for Passthrough<T> {}

impl<T> fmt::Debug for Passthrough<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passthrough")
    }
}

impl<T: Clone> Parser<T> for Passthrough<T> {
    type Output = T;

    fn parse(&self, input: &T) -> Result<T, ParseError> {
        Ok(input.clone())
    }
}

/// Adapts a plain function into a [`Parser`].
#[derive(Clone, Copy)]
pub struct FnParser<F> {
    function: F,
}

impl<F> FnParser<F> {
    pub fn new(function: F) -> Self {
        FnParser { function }
    }
}

impl<I, O, F> Parser<I> for FnParser<F>
where
    I: ?Sized,
    F: Fn(&I) -> Result<O, ParseError>,
{
    type Output = O;

    fn parse(&self, input: &I) -> Result<O, ParseError> {
        (self.function)(input)
    }
}

impl<F> fmt::Debug for FnParser<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnParser(<function>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParserExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("{0}")]
    struct TestError(&'static str);

    #[test]
    fn fail_wraps_foreign_error() {
        let error = Fail::<(), ()>::new(TestError("test error")).parse(&()).unwrap_err();
        assert_eq!(error.to_string(), "test error");
        assert!(error.downcast_cause::<TestError>().is_some());
    }

    #[test]
    fn fail_keeps_parse_error() {
        let error = Fail::<(), ()>::new(ParseError::Failed).parse(&()).unwrap_err();
        assert!(error.is_failed());
    }

    #[test]
    fn just_ignores_input() {
        assert_eq!(Just::new("apple").parse(&()).unwrap(), "apple");
    }

    #[test]
    fn just_with_recomputes() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let parser = Just::with(move || counter.fetch_add(1, Ordering::SeqCst));

        assert_eq!(parser.parse(&()).unwrap(), 0);
        assert_eq!(parser.parse(&()).unwrap(), 1);
    }

    #[test]
    fn passthrough_is_identity() {
        let parser = Passthrough::<String>::new().map(|s| s.to_uppercase());
        assert_eq!(parser.parse(&"apple".to_string()).unwrap(), "APPLE");
    }
}
