//! URL decomposition.
//!
//! [`UrlComponents`] is the already-split form of a URL: host, path segments
//! and query items. [`UrlComponentsParser`] turns it into a
//! [`StringAction`] by reading the host as the module and the path segments
//! as subject, verb and object.
//!
//! ```text
//! protocol://preference/name/set/Peter?x=1
//!            ^^^^^^^^^^ ^^^^ ^^^ ^^^^^ ^^^
//!            module     subj verb obj  payload
//! ```

use super::{ParseError, Parser};
use crate::{Payload, StringAction};
use percent_encoding::percent_decode_str;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ComponentsError {
    #[error("malformed URL: {0}")]
    Malformed(#[from] url::ParseError),
}

/// One `name[=value]` pair of a query string. A pair written without `=` has
/// no value at all, which is different from an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryItem {
    pub name: String,
    pub value: Option<String>,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        QueryItem { name: name.into(), value: value.map(Into::into) }
    }

    fn from_raw(raw: &str) -> Self {
        match raw.split_once('=') {
            Some((name, value)) => QueryItem { name: decode(name), value: Some(decode(value)) },
            None => QueryItem { name: decode(raw), value: None },
        }
    }
}

/// A URL split into the parts action parsing cares about.
///
/// `path_segments` never contains the leading `/` or empty segments.
/// `query_items` is `None` when the URL has no `?` at all and `Some(vec![])`
/// for a bare `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlComponents {
    pub scheme: String,
    pub host: Option<String>,
    pub path_segments: Vec<String>,
    pub query_items: Option<Vec<QueryItem>>,
}

impl UrlComponents {
    pub fn new(scheme: impl Into<String>, host: Option<impl Into<String>>) -> Self {
        UrlComponents { scheme: scheme.into(), host: host.map(Into::into), ..Default::default() }
    }

    pub fn with_path<S: Into<String>>(mut self, segments: impl IntoIterator<Item = S>) -> Self {
        self.path_segments = segments.into_iter().map(Into::into).filter(|s: &String| !s.is_empty()).collect();
        self
    }

    pub fn with_query(mut self, items: impl IntoIterator<Item = QueryItem>) -> Self {
        self.query_items = Some(items.into_iter().collect());
        self
    }

    /// Decompose a raw URL string.
    pub fn parse(raw: &str) -> Result<Self, ComponentsError> {
        let url = Url::parse(raw)?;
        Ok(Self::from(&url))
    }
}

impl From<&Url> for UrlComponents {
    fn from(url: &Url) -> Self {
        let path_segments = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).map(decode).collect())
            .unwrap_or_default();

        // `Url::query_pairs` cannot tell `?flag` from `?flag=`, so split by hand.
        let query_items = url
            .query()
            .map(|query| query.split('&').filter(|pair| !pair.is_empty()).map(QueryItem::from_raw).collect());

        UrlComponents {
            scheme: url.scheme().to_string(),
            host: url.host_str().map(decode),
            path_segments,
            query_items,
        }
    }
}

impl TryFrom<&str> for UrlComponents {
    type Error = ComponentsError;

    fn try_from(raw: &str) -> Result<Self, ComponentsError> {
        Self::parse(raw)
    }
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Builds a [`StringAction`] from [`UrlComponents`].
///
/// Fails with [`ParseError::Failed`] when the host is missing or empty. The
/// depth of the action follows the number of path segments; segments past the
/// fourth field are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlComponentsParser;

impl Parser<UrlComponents> for UrlComponentsParser {
    type Output = StringAction;

    fn parse(&self, input: &UrlComponents) -> Result<StringAction, ParseError> {
        let host = match input.host.as_deref() {
            Some(host) if !host.is_empty() => host,
            _ => return Err(ParseError::Failed),
        };

        let payload = input.query_items.as_ref().map(|items| {
            items
                .iter()
                .map(|item| (item.name.clone(), item.value.clone()))
                .collect::<Payload>()
        });

        let action = StringAction::from_segments(host, input.path_segments.iter().cloned(), payload);
        debug!(module = %action.mode().module(), depth = action.mode().depth(), "decomposed URL");
        Ok(action)
    }
}
