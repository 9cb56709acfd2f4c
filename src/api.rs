use crate::rules::preference::{ChangePreferenceExecutor, DeletePreferenceExecutor};
use crate::{
    ComponentsError, Dispatcher, ErasedAction, FlatMap, OneOf, ParseError, Parser, Sink, Store, StringAction,
    UrlComponents, UrlComponentsParser,
};
use once_cell::sync::Lazy;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Decomposition followed by the built-in rule set.
pub type DefaultParsers = FlatMap<UrlComponentsParser, OneOf<StringAction, Box<dyn ErasedAction>>>;

pub static DEFAULT_PARSERS: Lazy<DefaultParsers> =
    Lazy::new(|| FlatMap::new(UrlComponentsParser, crate::rules::default_parsers()));

/// Executors for every preference action the default rules produce.
pub fn preference_dispatcher<S: Store + 'static>(store: Arc<S>) -> Dispatcher {
    let store: Arc<dyn Store> = store;
    Dispatcher::new()
        .with(DeletePreferenceExecutor::new(store.clone()))
        .with(ChangePreferenceExecutor::<i64>::new(store.clone()))
        .with(ChangePreferenceExecutor::<bool>::new(store.clone()))
        .with(ChangePreferenceExecutor::<String>::new(store))
}

/// Options that affect which events the handler takes on.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Schemes to handle, compared case-insensitively. Empty accepts every scheme.
    pub accepted_schemes: Vec<String>,
}

impl Options {
    pub fn accepting<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Options { accepted_schemes: schemes.into_iter().map(Into::into).collect() }
    }

    pub fn accepts(&self, scheme: &str) -> bool {
        self.accepted_schemes.is_empty() || self.accepted_schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

/// Something delivered by the platform that may carry a URL string.
pub trait UrlEvent {
    fn url_string(&self) -> Option<&str>;
}

impl UrlEvent for str {
    fn url_string(&self) -> Option<&str> {
        Some(self)
    }
}

impl UrlEvent for String {
    fn url_string(&self) -> Option<&str> {
        Some(self)
    }
}

impl UrlEvent for Url {
    fn url_string(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: UrlEvent> UrlEvent for Option<T> {
    fn url_string(&self) -> Option<&str> {
        self.as_ref().and_then(T::url_string)
    }
}

/// Why the handler fell back, coarsely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// No usable URL: nothing delivered, malformed, wrong scheme, or no host.
    MissingComponents,
    /// The URL decomposed but no rule produced a value from it.
    ParseError,
    /// The sink failed, including when no executor claimed the action.
    HandlerError,
}

/// An event the handler could not act on.
#[derive(Debug, Error)]
pub enum Fallback<E> {
    #[error("event carries no URL")]
    MissingUrl,

    #[error("malformed URL")]
    MalformedUrl(#[source] ComponentsError),

    #[error("scheme `{0}` is not accepted")]
    SchemeNotAccepted(String),

    #[error("URL has no host to read a module from")]
    MissingComponents,

    #[error("no rule produced an action")]
    Parse(#[source] ParseError),

    #[error("handling the action failed")]
    Handler(#[source] E),
}

impl<E> Fallback<E> {
    pub fn reason(&self) -> FallbackReason {
        match self {
            Fallback::MissingUrl
            | Fallback::MalformedUrl(_)
            | Fallback::SchemeNotAccepted(_)
            | Fallback::MissingComponents => FallbackReason::MissingComponents,
            Fallback::Parse(_) => FallbackReason::ParseError,
            Fallback::Handler(_) => FallbackReason::HandlerError,
        }
    }
}

/// An event that was parsed and accepted by the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled {
    pub components: UrlComponents,
}

type FallbackHook = Box<dyn Fn(Option<&str>, FallbackReason) + Send + Sync>;

/// Entry point for URL-open events: decompose, parse, hand to the sink.
///
/// Every failure becomes a [`Fallback`]; an optional hook sees each one
/// together with the raw URL.
pub struct UrlSchemeHandler<P, S> {
    parser: P,
    sink: S,
    options: Options,
    on_fallback: Option<FallbackHook>,
}

impl<S> UrlSchemeHandler<&'static DefaultParsers, S> {
    pub fn with_default_rules(sink: S, options: Options) -> Self {
        UrlSchemeHandler::new(&*DEFAULT_PARSERS, sink, options)
    }
}

impl<P, S> UrlSchemeHandler<P, S> {
    pub fn new(parser: P, sink: S, options: Options) -> Self {
        UrlSchemeHandler { parser, sink, options, on_fallback: None }
    }

    pub fn with_fallback<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<&str>, FallbackReason) + Send + Sync + 'static,
    {
        self.on_fallback = Some(Box::new(hook));
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<P, S> UrlSchemeHandler<P, S>
where
    P: Parser<UrlComponents>,
    S: Sink<P::Output>,
    S::Error: Error + 'static,
{
    pub fn handle<E: UrlEvent + ?Sized>(&self, event: &E) -> Result<Handled, Fallback<S::Error>> {
        let raw = event.url_string();
        let result = raw
            .ok_or(Fallback::MissingUrl)
            .and_then(|raw| UrlComponents::parse(raw).map_err(Fallback::MalformedUrl))
            .and_then(|components| self.run(components));
        self.report(raw, result)
    }

    /// Handle an event the platform already decomposed.
    pub fn handle_components(&self, components: UrlComponents) -> Result<Handled, Fallback<S::Error>> {
        let result = self.run(components);
        self.report(None, result)
    }

    fn run(&self, components: UrlComponents) -> Result<Handled, Fallback<S::Error>> {
        if !self.options.accepts(&components.scheme) {
            return Err(Fallback::SchemeNotAccepted(components.scheme));
        }
        if components.host.as_deref().is_none_or(str::is_empty) {
            return Err(Fallback::MissingComponents);
        }

        let output = self.parser.parse(&components).map_err(Fallback::Parse)?;
        self.sink.sink(&output).map_err(Fallback::Handler)?;
        Ok(Handled { components })
    }

    fn report(
        &self,
        raw: Option<&str>,
        result: Result<Handled, Fallback<S::Error>>,
    ) -> Result<Handled, Fallback<S::Error>> {
        if let Err(fallback) = &result {
            debug!(url = raw.unwrap_or_default(), reason = ?fallback.reason(), %fallback, "falling back");
            if let Some(hook) = &self.on_fallback {
                hook(raw, fallback.reason());
            }
        }
        result
    }
}

impl<P, S> fmt::Debug for UrlSchemeHandler<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSchemeHandler").field("options", &self.options).finish_non_exhaustive()
    }
}
