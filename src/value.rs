use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// An ordered mapping from parameter name to value. Top-level keys keep the
/// order in which they first appeared in the input.
pub type ParamMap = IndexMap<String, ParamValue>;

/// A node of a parsed parameter tree.
///
/// Without coercion every leaf is a [`ParamValue::String`]. With coercion,
/// leaves may also be numbers, booleans, `null` or the `undefined` marker.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
    /// No value. Produced by a bare `name` under coercion, by a literal
    /// `undefined`, and for holes left in arrays by out-of-order indices.
    #[default]
    Undefined,
    Array(Vec<ParamValue>),
    Object(ParamMap),
}

impl ParamValue {
    /// A fresh empty container: an array when `wants_array`, otherwise an object.
    pub(crate) fn container_for(wants_array: bool) -> Self {
        if wants_array {
            ParamValue::Array(Vec::new())
        } else {
            ParamValue::Object(ParamMap::new())
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ParamValue::Array(_) | ParamValue::Object(_))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ParamValue::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<ParamValue>> {
        match self {
            ParamValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ParamMap> {
        match self {
            ParamValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key of an object node.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Look up an element of an array node.
    pub fn get_index(&self, index: usize) -> Option<&ParamValue> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Convert into a `serde_json::Value`. `Undefined` becomes `null`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self)
    }
}

/// Format a number the way a browser would stringify it: integral values
/// have no fractional part, negative zero prints as `0`, and magnitudes from
/// `1e21` up or below `1e-6` use exponent form with a signed exponent (`1e+21`, `1e-7`).
fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let magnitude = n.abs();
    if n == 0.0 {
        write!(f, "0")
    } else if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{mantissa}e+{exponent}")
            }
            _ => f.write_str(&formatted),
        }
    } else if n.fract() == 0.0 {
        write!(f, "{n:.0}")
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for ParamValue {
    /// Scalars print in their parameter-string form; `null` and `undefined`
    /// print as nothing. Containers print as JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => write!(f, "{s}"),
            ParamValue::Number(n) => format_number(*n, f),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Null | ParamValue::Undefined => Ok(()),
            ParamValue::Array(_) | ParamValue::Object(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::String(s) => serializer.serialize_str(s),
            ParamValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            ParamValue::Bool(b) => serializer.serialize_bool(*b),
            ParamValue::Null | ParamValue::Undefined => serializer.serialize_unit(),
            ParamValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ParamValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<&ParamValue> for serde_json::Value {
    fn from(value: &ParamValue) -> Self {
        use serde_json::Value;

        match value {
            ParamValue::String(s) => Value::String(s.clone()),
            ParamValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    Value::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                }
            }
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Null | ParamValue::Undefined => Value::Null,
            ParamValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            ParamValue::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(items: Vec<ParamValue>) -> Self {
        ParamValue::Array(items)
    }
}

impl From<ParamMap> for ParamValue {
    fn from(map: ParamMap) -> Self {
        ParamValue::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(ParamValue::Number(1.0).to_string(), "1");
        assert_eq!(ParamValue::Number(-0.0).to_string(), "0");
        assert_eq!(ParamValue::Number(2.5).to_string(), "2.5");
        assert_eq!(ParamValue::Number(-17.0).to_string(), "-17");
        assert_eq!(ParamValue::Number(1e20).to_string(), "100000000000000000000");
    }

    #[test]
    fn test_number_display_exponent_form() {
        assert_eq!(ParamValue::Number(1e21).to_string(), "1e+21");
        assert_eq!(ParamValue::Number(1.5e300).to_string(), "1.5e+300");
        assert_eq!(ParamValue::Number(-2e-7).to_string(), "-2e-7");
        assert_eq!(ParamValue::Number(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(ParamValue::Number(0.000001).to_string(), "0.000001");

        // Exponent form still coerces back to the same number
        let shown = ParamValue::Number(1e21).to_string();
        assert_eq!(crate::coerce::coerce(&shown), ParamValue::Number(1e21));
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(ParamValue::from("x y").to_string(), "x y");
        assert_eq!(ParamValue::Bool(false).to_string(), "false");
        assert_eq!(ParamValue::Null.to_string(), "");
        assert_eq!(ParamValue::Undefined.to_string(), "");
    }

    #[test]
    fn test_json_conversion_keeps_order() {
        let mut inner = ParamMap::new();
        inner.insert("z".to_string(), ParamValue::Number(1.0));
        inner.insert("a".to_string(), ParamValue::Undefined);

        let value = ParamValue::Array(vec![ParamValue::Object(inner), ParamValue::Bool(true)]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[{"z":1,"a":null},true]"#);
        assert_eq!(value.to_json(), serde_json::json!([{"z": 1, "a": null}, true]));
    }

    #[test]
    fn test_accessors() {
        let mut map = ParamMap::new();
        map.insert("k".to_string(), ParamValue::from(vec![ParamValue::from("v")]));
        let value = ParamValue::Object(map);

        let list = value.get("k").unwrap();
        assert_eq!(list.get_index(0).and_then(ParamValue::as_str), Some("v"));
        assert!(value.get("missing").is_none());
        assert!(list.get("k").is_none());
        assert!(value.is_container());
        assert!(!ParamValue::Null.is_container());
    }
}
