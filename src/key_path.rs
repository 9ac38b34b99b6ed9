use std::fmt;

/// One step of a bracketed parameter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A named (or numeric) step, e.g. `b` in `a[b]`. May be empty when an empty
    /// bracket pair appears somewhere other than the end.
    Key(String),
    /// A trailing `[]`: append to the array at this level.
    Append,
}

impl Segment {
    /// The array index this segment names, if it is a plain non-negative integer.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Key(key) if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) => {
                key.parse().ok()
            }
            _ => None,
        }
    }

    /// Whether a container holding this segment should be an array.
    pub fn wants_array(&self) -> bool {
        matches!(self, Segment::Append) || self.as_index().is_some()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{key}"),
            Segment::Append => Ok(()),
        }
    }
}

/// The ordered segments of a decoded parameter name.
///
/// `a` is a simple one-segment path, `a[b][c]` becomes `["a", "b", "c"]` and
/// `a[]` becomes `["a", Append]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    root: String,
    rest: Vec<Segment>,
}

impl KeyPath {
    /// Split a decoded key into its path segments.
    pub fn parse(key: &str) -> Self {
        let mut pieces: Vec<&str> = key.split("][").collect();
        let last = pieces.len() - 1;

        let bracketed = pieces[0].contains('[') && pieces[last].ends_with(']');
        if !bracketed {
            return Self {
                root: key.to_string(),
                rest: Vec::new(),
            };
        }

        let tail: &str = pieces[last];
        pieces[last] = tail.strip_suffix(']').unwrap_or(tail);
        let head = pieces.remove(0);
        let mut parts: Vec<&str> = head.split('[').collect();
        parts.extend(pieces);

        let root = parts.remove(0).to_string();
        let trailing = parts.len() - 1;
        let rest = parts
            .into_iter()
            .enumerate()
            .map(|(i, part)| {
                if part.is_empty() && i == trailing {
                    Segment::Append
                } else {
                    Segment::Key(part.to_string())
                }
            })
            .collect();

        Self { root, rest }
    }

    /// The top-level key.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Segments after the top-level key.
    pub fn rest(&self) -> &[Segment] {
        &self.rest
    }

    /// True for names without bracket notation.
    pub fn is_simple(&self) -> bool {
        self.rest.is_empty()
    }

    /// Number of segments, including the root.
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// A key path always has a root segment.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.rest {
            write!(f, "[{segment}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Segment {
        Segment::Key(s.to_string())
    }

    #[test]
    fn test_simple_key() {
        let path = KeyPath::parse("name");
        assert!(path.is_simple());
        assert_eq!(path.root(), "name");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_nested_keys() {
        let path = KeyPath::parse("a[b][c]");
        assert_eq!(path.root(), "a");
        assert_eq!(path.rest(), &[key("b"), key("c")]);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_append_marker() {
        let path = KeyPath::parse("a[]");
        assert_eq!(path.rest(), &[Segment::Append]);

        let path = KeyPath::parse("a[b][]");
        assert_eq!(path.rest(), &[key("b"), Segment::Append]);
    }

    #[test]
    fn test_empty_segment_in_middle_is_a_key() {
        let path = KeyPath::parse("a[][b]");
        assert_eq!(path.rest(), &[key(""), key("b")]);
    }

    #[test]
    fn test_unbalanced_brackets_are_simple() {
        assert!(KeyPath::parse("a[b").is_simple());
        assert!(KeyPath::parse("a]").is_simple());
        assert!(KeyPath::parse("").is_simple());
    }

    #[test]
    fn test_empty_root() {
        let path = KeyPath::parse("[a]");
        assert_eq!(path.root(), "");
        assert_eq!(path.rest(), &[key("a")]);
    }

    #[test]
    fn test_segment_index() {
        assert_eq!(key("0").as_index(), Some(0));
        assert_eq!(key("12").as_index(), Some(12));
        assert_eq!(key("-1").as_index(), None);
        assert_eq!(key("1.5").as_index(), None);
        assert_eq!(key("").as_index(), None);
        assert!(Segment::Append.wants_array());
        assert!(!key("x").wants_array());
    }

    #[test]
    fn test_display_round_trip() {
        for name in ["a", "a[b][c]", "a[]", "a[0][x]"] {
            assert_eq!(KeyPath::parse(name).to_string(), name);
        }
    }
}
