//! # Query string and fragment helpers
//!
//! Read parameters out of the query string or fragment of a URL, and splice new
//! parameters back in. Which part of the URL is used is chosen by a
//! [`ParamSource`]: [`QueryString`] or [`Fragment`].

use crate::decode::encode_component;
use crate::{deparam, param, ParamError, ParamMap, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for fragment handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamConfig {
    /// Characters left unescaped when writing fragment params, for readability.
    /// `+` and `%` are always escaped: left bare they would change meaning.
    pub no_escape: String,
    /// Use `#!` fragments ("ajax crawlable" URLs)
    pub ajax_crawlable: bool,
}

impl Default for ParamConfig {
    fn default() -> Self {
        Self {
            no_escape: ",/".to_string(),
            ajax_crawlable: false,
        }
    }
}

impl ParamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_escape(mut self, chars: impl Into<String>) -> Self {
        self.no_escape = chars.into();
        self
    }

    pub fn with_ajax_crawlable(mut self, ajax_crawlable: bool) -> Self {
        self.ajax_crawlable = ajax_crawlable;
        self
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&contents)?;
        log::debug!("Loaded param config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Undo the escaping of every `no_escape` character in `encoded`.
    fn unescape_allowed(&self, encoded: &str) -> String {
        let allowed = self.no_escape.chars().filter(|c| !matches!(c, '+' | '%'));
        allowed.fold(encoded.to_string(), |acc, c| {
            let escaped = encode_component(&c.to_string());
            if escaped.len() > 1 && escaped.starts_with('%') {
                acc.replace(&escaped, &c.to_string())
            } else {
                acc
            }
        })
    }
}

/// How new params combine with the params already present in a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Keep the URL's params; new params override keys they share
    #[default]
    Merge,
    /// Keep the URL's params; they win over new params with the same key
    KeepExisting,
    /// Discard the URL's params entirely
    Replace,
}

/// Params to write into a URL: either an already-serialized string or a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    Raw(String),
    Tree(ParamMap),
}

impl From<&str> for Params {
    fn from(s: &str) -> Self {
        Params::Raw(s.to_string())
    }
}

impl From<String> for Params {
    fn from(s: String) -> Self {
        Params::Raw(s)
    }
}

impl From<ParamMap> for Params {
    fn from(tree: ParamMap) -> Self {
        Params::Tree(tree)
    }
}

impl Params {
    fn into_tree(self) -> Result<ParamMap> {
        match self {
            Params::Raw(s) => deparam(&s, false),
            Params::Tree(tree) => Ok(tree),
        }
    }
}

/// A URL split around its params.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Everything before the params and their delimiter
    pub base: &'a str,
    /// The params themselves, without delimiter
    pub params: &'a str,
    /// Everything after the params (a fragment, for query strings)
    pub tail: &'a str,
}

/// The part of a URL that holds params.
pub trait ParamSource {
    /// The params string to parse. Input without the source's delimiter is taken
    /// to be a bare params string.
    fn extract<'a>(&self, url: &'a str) -> &'a str;

    /// Split a URL for rewriting.
    fn split<'a>(&self, url: &'a str) -> UrlParts<'a>;

    /// Join a base, serialized params and tail back into a URL.
    fn join(&self, parts: UrlParts<'_>, params: &str) -> String;

    /// Strip the source's own delimiter from a caller-supplied params string,
    /// so `?a=1` and `a=1` mean the same thing.
    fn trim_delimiter<'a>(&self, params: &'a str) -> &'a str;

    /// Final touch on freshly serialized params before they are written.
    fn finish(&self, params: String) -> String {
        params
    }
}

/// The query string of a URL (`?a=1`).
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryString;

impl ParamSource for QueryString {
    fn extract<'a>(&self, url: &'a str) -> &'a str {
        let after = url.rfind('?').map_or(url, |i| &url[i + 1..]);
        after.find('#').map_or(after, |i| &after[..i])
    }

    fn split<'a>(&self, url: &'a str) -> UrlParts<'a> {
        let base_end = url.find(['?', '#']).unwrap_or(url.len());
        let (base, rest) = url.split_at(base_end);
        let rest = rest.strip_prefix('?').unwrap_or(rest);
        let tail_start = rest.find('#').unwrap_or(rest.len());
        let (params, tail) = rest.split_at(tail_start);
        UrlParts { base, params, tail }
    }

    fn join(&self, parts: UrlParts<'_>, params: &str) -> String {
        let delimiter = if !params.is_empty() || parts.base.is_empty() {
            "?"
        } else {
            ""
        };
        format!("{}{delimiter}{params}{}", parts.base, parts.tail)
    }

    fn trim_delimiter<'a>(&self, params: &'a str) -> &'a str {
        params.strip_prefix('?').unwrap_or(params)
    }
}

/// The fragment of a URL (`#a=1`, or `#!a=1` in ajax-crawlable mode).
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    config: ParamConfig,
}

impl Fragment {
    pub fn new(config: ParamConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParamConfig {
        &self.config
    }

    fn strip_bang<'a>(&self, fragment: &'a str) -> &'a str {
        if self.config.ajax_crawlable {
            fragment.strip_prefix('!').unwrap_or(fragment)
        } else {
            fragment
        }
    }
}

impl ParamSource for Fragment {
    fn extract<'a>(&self, url: &'a str) -> &'a str {
        let after = url.rfind('#').map_or(url, |i| &url[i + 1..]);
        self.strip_bang(after)
    }

    fn split<'a>(&self, url: &'a str) -> UrlParts<'a> {
        let (base, params) = match url.split_once('#') {
            Some((base, fragment)) => (base, self.strip_bang(fragment)),
            None => (url, ""),
        };
        UrlParts {
            base,
            params,
            tail: "",
        }
    }

    fn join(&self, parts: UrlParts<'_>, params: &str) -> String {
        let prefix = if self.config.ajax_crawlable { "#!" } else { "#" };
        format!("{}{prefix}{params}", parts.base)
    }

    fn trim_delimiter<'a>(&self, params: &'a str) -> &'a str {
        params
            .strip_prefix("#!")
            .or_else(|| params.strip_prefix('#'))
            .unwrap_or(params)
    }

    fn finish(&self, params: String) -> String {
        self.config.unescape_allowed(&params)
    }
}

/// Parse the params held by `source` in `url`.
pub fn deparam_from<S: ParamSource + ?Sized>(source: &S, url: &str, coerce: bool) -> Result<ParamMap> {
    deparam(source.extract(url), coerce)
}

/// Write `params` into the part of `url` selected by `source`.
pub fn build_url<S: ParamSource + ?Sized>(
    source: &S,
    url: &str,
    params: Params,
    mode: MergeMode,
) -> Result<String> {
    let parts = source.split(url);
    let params = match params {
        Params::Raw(raw) => Params::Raw(source.trim_delimiter(&raw).to_string()),
        tree => tree,
    };

    let serialized = match (mode, params) {
        (MergeMode::Replace, Params::Raw(raw)) => raw,
        (MergeMode::Replace, Params::Tree(tree)) => param(&tree),
        (mode, params) => {
            let existing = deparam(parts.params, false)?;
            let incoming = params.into_tree()?;
            let (mut merged, overrides) = match mode {
                MergeMode::KeepExisting => (incoming, existing),
                _ => (existing, incoming),
            };
            merged.extend(overrides);
            param(&merged)
        }
    };

    let serialized = source.finish(serialized);
    log::debug!("build_url: {url} -> params {serialized:?} ({mode:?})");
    Ok(source.join(parts, &serialized))
}

/// Extract the query string of a URL.
///
/// ```rust
/// use paramtree::url::querystring;
///
/// assert_eq!(querystring("http://example.com/?a=1&b=2#frag"), "a=1&b=2");
/// assert_eq!(querystring("a=1"), "a=1");
/// ```
pub fn querystring(url: &str) -> &str {
    QueryString.extract(url)
}

/// Extract the fragment of a URL.
pub fn fragment<'a>(url: &'a str, config: &ParamConfig) -> &'a str {
    Fragment::new(config.clone()).extract(url)
}

/// Parse the query string of a URL (or a bare params string).
pub fn deparam_querystring(url: &str, coerce: bool) -> Result<ParamMap> {
    deparam_from(&QueryString, url, coerce)
}

/// Parse the fragment of a URL (or a bare params string).
pub fn deparam_fragment(url: &str, coerce: bool, config: &ParamConfig) -> Result<ParamMap> {
    deparam_from(&Fragment::new(config.clone()), url, coerce)
}

/// Return `url` with its query string rewritten.
///
/// ```rust
/// use paramtree::url::{build_querystring, MergeMode};
///
/// let url = build_querystring("/search?q=rust&page=1#top", "page=2", MergeMode::Merge).unwrap();
/// assert_eq!(url, "/search?q=rust&page=2#top");
/// ```
pub fn build_querystring(url: &str, params: impl Into<Params>, mode: MergeMode) -> Result<String> {
    build_url(&QueryString, url, params.into(), mode)
}

/// Return `url` with its fragment rewritten.
pub fn build_fragment(
    url: &str,
    params: impl Into<Params>,
    mode: MergeMode,
    config: &ParamConfig,
) -> Result<String> {
    build_url(&Fragment::new(config.clone()), url, params.into(), mode)
}

impl std::str::FromStr for MergeMode {
    type Err = ParamError;

    /// Accepts `merge`, `keep` or `replace`, and the numeric modes `0`, `1`, `2`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "merge" | "0" => Ok(MergeMode::Merge),
            "keep" | "1" => Ok(MergeMode::KeepExisting),
            "replace" | "2" => Ok(MergeMode::Replace),
            other => Err(ParamError::UnknownMergeMode(other.to_string())),
        }
    }
}
