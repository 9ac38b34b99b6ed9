use crate::{ParamError, Result};

/// Decode a single `name` or `value` token.
///
/// Every literal `+` becomes a space first, then percent-escapes are decoded.
/// A `%` that isn't followed by two hex digits, or escapes that decode to invalid
/// UTF-8, fail the whole token.
pub fn decode_component(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");

    // `+` -> ` ` keeps byte offsets stable, so positions refer to `raw` as well
    if let Some(position) = find_malformed_escape(&spaced) {
        return Err(ParamError::MalformedEscape {
            token: raw.to_string(),
            position,
        });
    }

    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ParamError::InvalidUtf8 {
            token: raw.to_string(),
        })
}

/// Percent-encode a token for use in a parameter string. Only the unreserved
/// characters `A-Z a-z 0-9 - _ . ~` pass through and encoded spaces are written
/// as `+`. Unlike a browser's `encodeURIComponent`, `!'()*` are escaped as well;
/// [`decode_component`] reads either form back to the same text.
pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

fn find_malformed_escape(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'%')
        .map(|(i, _)| i)
        .find(|&i| {
            !matches!(
                (bytes.get(i + 1), bytes.get(i + 2)),
                (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
        })
}
