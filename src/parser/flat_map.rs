//! Sequencing two parsers end to end.

use super::{ParseError, Parser};

/// Runs `upstream`, then feeds its output into `downstream`.
///
/// The downstream parser is built once, before any input is seen. Prefer this
/// over [`LazyFlatMap`] unless the downstream needs to be fresh per parse.
#[derive(Debug, Clone, Copy)]
pub struct FlatMap<A, B> {
    upstream: A,
    downstream: B,
}

impl<A, B> FlatMap<A, B> {
    pub fn new(upstream: A, downstream: B) -> Self {
        FlatMap { upstream, downstream }
    }
}

impl<I, A, B> Parser<I> for FlatMap<A, B>
where
    I: ?Sized,
    A: Parser<I>,
    B: Parser<A::Output>,
{
    type Output = B::Output;

    fn parse(&self, input: &I) -> Result<B::Output, ParseError> {
        let intermediate = self.upstream.parse(input)?;
        self.downstream.parse(&intermediate)
    }
}

/// Like [`FlatMap`], but the downstream parser is constructed by `factory` on
/// every call to `parse`.
#[derive(Debug, Clone, Copy)]
pub struct LazyFlatMap<A, F> {
    upstream: A,
    factory: F,
}

impl<A, F> LazyFlatMap<A, F> {
    pub fn new(upstream: A, factory: F) -> Self {
        LazyFlatMap { upstream, factory }
    }
}

impl<I, A, B, F> Parser<I> for LazyFlatMap<A, F>
where
    I: ?Sized,
    A: Parser<I>,
    B: Parser<A::Output>,
    F: Fn() -> B,
{
    type Output = B::Output;

    fn parse(&self, input: &I) -> Result<B::Output, ParseError> {
        let intermediate = self.upstream.parse(input)?;
        (self.factory)().parse(&intermediate)
    }
}
