use crate::ParamValue;

/// Convert a decoded value into a typed scalar.
///
/// The literals `true`, `false`, `null` and `undefined` map to their typed
/// counterparts, a string that is entirely a finite decimal number becomes a
/// number, and anything else is kept as the original string.
pub fn coerce(value: &str) -> ParamValue {
    match value {
        "true" => ParamValue::Bool(true),
        "false" => ParamValue::Bool(false),
        "null" => ParamValue::Null,
        "undefined" => ParamValue::Undefined,
        _ => match parse_number(value) {
            Some(n) => ParamValue::Number(n),
            None => ParamValue::String(value.to_string()),
        },
    }
}

/// Parse a complete decimal literal. Rejects empty input, whitespace, and the
/// `inf`/`NaN` spellings `f64::from_str` would otherwise accept.
fn parse_number(value: &str) -> Option<f64> {
    let numeric_chars = value
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));

    if value.is_empty() || !numeric_chars {
        return None;
    }

    value.parse::<f64>().ok().filter(|n| n.is_finite())
}
