use crate::coerce::coerce;
use crate::decode::decode_component;
use crate::key_path::{KeyPath, Segment};
use crate::{ParamMap, ParamValue, Result};

/// Options for [`Deparam`].
#[derive(Debug, Clone)]
pub struct DeparamOptions {
    /// Convert values that look like numbers, booleans, `null` or `undefined`
    pub coerce: bool,
    /// Highest array index a bracketed key may address. A new container for a
    /// larger index is an object keyed by the digits; an existing array cannot take
    /// it, so such a pair is dropped rather than padding the array with holes.
    pub max_index: usize,
}

impl Default for DeparamOptions {
    fn default() -> Self {
        Self {
            coerce: false,
            max_index: 1000,
        }
    }
}

impl DeparamOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    pub fn with_max_index(mut self, max_index: usize) -> Self {
        self.max_index = max_index;
        self
    }
}

/// Parses parameter strings into [`ParamMap`] trees.
///
/// A `Deparam` only holds its options; every call to [`Deparam::parse`] builds
/// a fresh tree, so one instance can be shared freely.
///
/// ```rust
/// use paramtree::{Deparam, DeparamOptions, ParamValue};
///
/// let parser = Deparam::new(DeparamOptions::new().with_coerce(true));
/// let tree = parser.parse("page=2&tags[]=a&tags[]=b").unwrap();
///
/// assert_eq!(tree["page"], ParamValue::Number(2.0));
/// assert_eq!(tree["tags"].get_index(1).and_then(ParamValue::as_str), Some("b"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Deparam {
    options: DeparamOptions,
}

impl Deparam {
    pub fn new(options: DeparamOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DeparamOptions {
        &self.options
    }

    /// Parse a `&`-separated list of `name=value` (or bare `name`) tokens.
    ///
    /// Tokens are processed left to right. Fails on the first token that cannot
    /// be percent-decoded; the partial tree is discarded.
    pub fn parse(&self, params: &str) -> Result<ParamMap> {
        let mut tree = ParamMap::new();

        for token in params.split('&').filter(|t| !t.is_empty()) {
            let (raw_name, raw_value) = match token.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (token, None),
            };

            let name = decode_component(raw_name)?;
            let value = match raw_value {
                Some(raw) => {
                    let decoded = decode_component(raw)?;
                    if self.options.coerce {
                        coerce(&decoded)
                    } else {
                        ParamValue::String(decoded)
                    }
                }
                None if self.options.coerce => ParamValue::Undefined,
                None => ParamValue::String(String::new()),
            };

            let path = KeyPath::parse(&name);
            log::trace!("deparam: {path} = {value:?}");

            if path.is_simple() {
                insert_simple(&mut tree, name, value);
            } else {
                self.insert_nested(&mut tree, &path, value);
            }
        }

        Ok(tree)
    }

    fn insert_nested(&self, tree: &mut ParamMap, path: &KeyPath, value: ParamValue) {
        let mut slot = tree
            .entry(path.root().to_string())
            .or_insert(ParamValue::Undefined);

        for segment in path.rest() {
            if !slot.is_container() {
                *slot = ParamValue::container_for(self.wants_array(segment));
            }
            slot = match self.child_slot(slot, segment) {
                Some(child) => child,
                None => {
                    log::debug!("deparam: dropping {path}, segment {segment:?} does not fit its container");
                    return;
                }
            };
        }

        *slot = value;
    }

    /// Whether a fresh container for `segment` should be an array.
    fn wants_array(&self, segment: &Segment) -> bool {
        segment.wants_array()
            && segment
                .as_index()
                .map_or(true, |index| index <= self.options.max_index)
    }

    /// The slot `segment` addresses inside `container`, created if missing.
    /// Returns `None` without touching `container` when the segment does not fit.
    fn child_slot<'a>(
        &self,
        container: &'a mut ParamValue,
        segment: &Segment,
    ) -> Option<&'a mut ParamValue> {
        match container {
            ParamValue::Array(items) => {
                let index = match segment {
                    Segment::Append => items.len(),
                    Segment::Key(_) => segment.as_index()?,
                };
                if index > self.options.max_index {
                    return None;
                }
                if index >= items.len() {
                    items.resize(index + 1, ParamValue::Undefined);
                }
                items.get_mut(index)
            }
            ParamValue::Object(map) => {
                let key = match segment {
                    Segment::Append => map.len().to_string(),
                    Segment::Key(key) => key.clone(),
                };
                Some(map.entry(key).or_insert(ParamValue::Undefined))
            }
            _ => None,
        }
    }
}

/// Repeated simple keys collect into an array in encounter order.
fn insert_simple(tree: &mut ParamMap, name: String, value: ParamValue) {
    match tree.get_mut(&name) {
        Some(ParamValue::Array(items)) => items.push(value),
        Some(existing) if !existing.is_undefined() => {
            let previous = std::mem::take(existing);
            *existing = ParamValue::Array(vec![previous, value]);
        }
        Some(existing) => *existing = value,
        None => {
            tree.insert(name, value);
        }
    }
}

/// Parse a parameter string, optionally coercing values.
///
/// ```rust
/// use paramtree::{deparam, ParamValue};
///
/// let tree = deparam("a[b]=1&a[c]=2", false).unwrap();
/// assert_eq!(tree["a"].get("c"), Some(&ParamValue::from("2")));
/// ```
pub fn deparam(params: &str, coerce: bool) -> Result<ParamMap> {
    Deparam::new(DeparamOptions::new().with_coerce(coerce)).parse(params)
}
