use crate::decode::encode_component;
use crate::{ParamMap, ParamValue};

/// Serialize a parameter tree into a parameter string.
///
/// Nested objects use `a[b]=..`, arrays of scalars use `a[]=..` and arrays
/// holding containers use explicit indices (`a[0][b]=..`) so each element's
/// fields stay together. `null` and `undefined` leaves serialize as empty values;
/// empty containers produce nothing.
///
/// ```rust
/// use paramtree::{deparam, param};
///
/// let tree = deparam("a[b]=1&a[c][]=x&a[c][]=y", false).unwrap();
/// assert_eq!(param(&tree), "a%5Bb%5D=1&a%5Bc%5D%5B%5D=x&a%5Bc%5D%5B%5D=y");
/// ```
pub fn param(params: &ParamMap) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push_pairs(key, value, &mut pairs);
    }
    pairs.join("&")
}

fn push_pairs(prefix: &str, value: &ParamValue, pairs: &mut Vec<String>) {
    match value {
        ParamValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                let key = if item.is_container() {
                    format!("{prefix}[{i}]")
                } else {
                    format!("{prefix}[]")
                };
                push_pairs(&key, item, pairs);
            }
        }
        ParamValue::Object(map) => {
            for (key, item) in map {
                push_pairs(&format!("{prefix}[{key}]"), item, pairs);
            }
        }
        scalar => pairs.push(format!(
            "{}={}",
            encode_component(prefix),
            encode_component(&scalar.to_string())
        )),
    }
}
