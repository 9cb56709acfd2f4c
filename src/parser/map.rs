//! Output transforms.

use super::{Conversion, ParseError, Parser};

/// Applies a non-failing transform to the upstream output. Upstream errors
/// pass through unchanged.
///
/// For a transform that can fail, use [`MapConversion`] with a
/// [`Fallible`](crate::Fallible) conversion (or `ParserExt::try_map`).
#[derive(Debug, Clone, Copy)]
pub struct Map<P, F> {
    upstream: P,
    transform: F,
}

impl<P, F> Map<P, F> {
    pub fn new(upstream: P, transform: F) -> Self {
        Map { upstream, transform }
    }
}

impl<I, P, F, O> Parser<I> for Map<P, F>
where
    I: ?Sized,
    P: Parser<I>,
    F: Fn(P::Output) -> O,
{
    type Output = O;

    fn parse(&self, input: &I) -> Result<O, ParseError> {
        self.upstream.parse(input).map(&self.transform)
    }
}

/// Applies a [`Conversion`] to the upstream output. A failing conversion is
/// reported as a [`ParseError`], wrapping foreign errors.
#[derive(Debug, Clone, Copy)]
pub struct MapConversion<P, C> {
    upstream: P,
    conversion: C,
}

impl<P, C> MapConversion<P, C> {
    pub fn new(upstream: P, conversion: C) -> Self {
        MapConversion { upstream, conversion }
    }
}

impl<I, P, C> Parser<I> for MapConversion<P, C>
where
    I: ?Sized,
    P: Parser<I>,
    C: Conversion<P::Output>,
{
    type Output = C::Output;

    fn parse(&self, input: &I) -> Result<C::Output, ParseError> {
        let output = self.upstream.parse(input)?;
        self.conversion.apply(output).map_err(ParseError::wrap)
    }
}
