//! Output conversions that keep their fallibility in the type.

use std::convert::Infallible;
use std::error::Error;

/// A single-purpose transform used by [`MapConversion`](crate::MapConversion).
///
/// `Error = Infallible` marks a conversion that provably cannot fail.
pub trait Conversion<I> {
    type Output;
    type Error: Error + Send + Sync + 'static;

    fn apply(&self, input: I) -> Result<Self::Output, Self::Error>;
}

/// Conversion that cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct Direct<F> {
    transform: F,
}

impl<F> Direct<F> {
    pub fn new(transform: F) -> Self {
        Direct { transform }
    }

    /// Apply without going through `Result`.
    pub fn call<I, O>(&self, input: I) -> O
    where
        F: Fn(I) -> O,
    {
        (self.transform)(input)
    }
}

impl<I, O, F> Conversion<I> for Direct<F>
where
    F: Fn(I) -> O,
{
    type Output = O;
    type Error = Infallible;

    fn apply(&self, input: I) -> Result<O, Infallible> {
        Ok((self.transform)(input))
    }
}

/// Conversion that fails with a typed error.
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F> {
    transform: F,
}

impl<F> Fallible<F> {
    pub fn new(transform: F) -> Self {
        Fallible { transform }
    }
}

impl<I, O, E, F> Conversion<I> for Fallible<F>
where
    F: Fn(I) -> Result<O, E>,
    E: Error + Send + Sync + 'static,
{
    type Output = O;
    type Error = E;

    fn apply(&self, input: I) -> Result<O, E> {
        (self.transform)(input)
    }
}
