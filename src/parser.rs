//! Parser combinators.
//!
//! A [`Parser`] is a typed, possibly-failing transformation from one
//! representation to another. Parsers are plain values with no interior
//! state: build them once and run them as often as needed, from any thread.
//!
//! ## How the parts work together
//!
//! ```text
//! UrlComponents ── UrlComponentsParser ──▶ StringAction
//!                                             │ flat_map
//!                                             v
//!                      OneOf [ DeletePreferenceParser,     ◀── ordered: first success wins
//!                              AppControlParser,
//!                              ChangePreferenceParser<i64>,
//!                              ... ]
//!                                             │ map / try_map
//!                                             v
//!                                         typed action
//! ```
//!
//! ## Responsibilities by module
//!
//! - `error.rs`: [`ParseError`], the single failure channel. `Failed` means
//!   "does not apply" and drives alternation; `Wrapping` carries a foreign error.
//! - `conversion.rs`: [`Conversion`] keeps "can this step fail?" visible in the
//!   type ([`Direct`] vs. [`Fallible`]).
//! - `map.rs`: [`Map`] (infallible output transform) and [`MapConversion`].
//! - `flat_map.rs`: [`FlatMap`] (downstream built up front) and
//!   [`LazyFlatMap`] (downstream built per parse).
//! - `one_of.rs`: [`OneOf`], ordered alternation.
//! - `primitives.rs`: [`Fail`], [`Just`], [`Passthrough`], [`FnParser`].
//! - `components.rs`: URL decomposition into a [`StringAction`](crate::StringAction).
//!
//! ## Ordering
//!
//! [`OneOf`] behaves like the arms of a `match`: the first rule that accepts
//! the input wins even if a later one would too. Put specific rules first.

#[path = "parser/components.rs"]
mod components;
#[path = "parser/conversion.rs"]
mod conversion;
#[path = "parser/error.rs"]
mod error;
#[path = "parser/flat_map.rs"]
mod flat_map;
#[path = "parser/map.rs"]
mod map;
#[path = "parser/one_of.rs"]
mod one_of;
#[path = "parser/primitives.rs"]
mod primitives;

pub use components::{ComponentsError, QueryItem, UrlComponents, UrlComponentsParser};
pub use conversion::{Conversion, Direct, Fallible};
pub use error::ParseError;
pub use flat_map::{FlatMap, LazyFlatMap};
pub use map::{Map, MapConversion};
pub use one_of::OneOf;
pub use primitives::{Fail, FnParser, Just, Passthrough};

use crate::ErasedAction;
use std::sync::Arc;

/// A typed transformation `I → Output` that may fail.
pub trait Parser<I: ?Sized> {
    type Output;

    fn parse(&self, input: &I) -> Result<Self::Output, ParseError>;
}

/// Heap-allocated parser with a fixed input and output type.
pub type BoxedParser<I, O> = Box<dyn Parser<I, Output = O> + Send + Sync>;

impl<I: ?Sized, P: Parser<I> + ?Sized> Parser<I> for Box<P> {
    type Output = P::Output;

    fn parse(&self, input: &I) -> Result<Self::Output, ParseError> {
        (**self).parse(input)
    }
}

impl<I: ?Sized, P: Parser<I> + ?Sized> Parser<I> for Arc<P> {
    type Output = P::Output;

    fn parse(&self, input: &I) -> Result<Self::Output, ParseError> {
        (**self).parse(input)
    }
}

impl<I: ?Sized, P: Parser<I> + ?Sized> Parser<I> for &P {
    type Output = P::Output;

    fn parse(&self, input: &I) -> Result<Self::Output, ParseError> {
        (**self).parse(input)
    }
}

/// Combinator methods available on every [`Parser`].
pub trait ParserExt<I: ?Sized>: Parser<I> + Sized {
    /// Transform the output with a function that cannot fail.
    fn map<O, F>(self, transform: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> O,
    {
        Map::new(self, transform)
    }

    /// Transform the output with a function that may fail; its error is
    /// reported as a [`ParseError`].
    fn try_map<O, E, F>(self, transform: F) -> MapConversion<Self, Fallible<F>>
    where
        F: Fn(Self::Output) -> Result<O, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        MapConversion::new(self, Fallible::new(transform))
    }

    fn map_conversion<C>(self, conversion: C) -> MapConversion<Self, C>
    where
        C: Conversion<Self::Output>,
    {
        MapConversion::new(self, conversion)
    }

    /// Feed the output into `downstream`, which is built once, up front.
    fn flat_map<B>(self, downstream: B) -> FlatMap<Self, B>
    where
        B: Parser<Self::Output>,
    {
        FlatMap::new(self, downstream)
    }

    /// Feed the output into a parser built by `factory` on every parse.
    fn lazy_flat_map<B, F>(self, factory: F) -> LazyFlatMap<Self, F>
    where
        F: Fn() -> B,
        B: Parser<Self::Output>,
    {
        LazyFlatMap::new(self, factory)
    }

    /// Start an ordered alternation: `self` first, then `next`.
    fn or<P>(self, next: P) -> OneOf<I, Self::Output>
    where
        Self: Send + Sync + 'static,
        P: Parser<I, Output = Self::Output> + Send + Sync + 'static,
    {
        OneOf::new(self).or(next)
    }

    fn boxed(self) -> BoxedParser<I, Self::Output>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }

    /// Erase the concrete action type so parsers of different actions can
    /// share one [`OneOf`].
    fn erase(self) -> BoxedParser<I, Box<dyn ErasedAction>>
    where
        Self: Send + Sync + 'static,
        Self::Output: ErasedAction,
    {
        Box::new(self.map(|action| Box::new(action) as Box<dyn ErasedAction>))
    }
}

impl<I: ?Sized, P: Parser<I>> ParserExt<I> for P {}
