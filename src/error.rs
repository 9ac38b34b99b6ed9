use thiserror::Error;

/// Error types for parameter parsing and serialization.
///
/// Decoding failures are the only errors the parser itself produces. Unusual or
/// inconsistent bracket structure is never an error: it is resolved best-effort.
///
/// # Error Handling Examples
///
/// ```rust
/// use paramtree::{deparam, ParamError};
///
/// match deparam("name=%zz", false) {
///     Ok(tree) => println!("parsed: {tree:?}"),
///     Err(ParamError::MalformedEscape { token, position }) => {
///         eprintln!("bad escape at byte {position} of {token:?}");
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ParamError {
    /// A `%` that is not followed by two hexadecimal digits.
    #[error("Malformed percent-escape at byte {position} in {token:?}")]
    MalformedEscape {
        /// The raw token as it appeared in the input
        token: String,
        /// Byte offset of the offending `%`
        position: usize,
    },

    /// Percent-decoded bytes that do not form valid UTF-8.
    #[error("Percent-decoded bytes are not valid UTF-8 in {token:?}")]
    InvalidUtf8 {
        /// The raw token as it appeared in the input
        token: String,
    },

    /// A merge mode name that isn't `merge`, `keep` or `replace`.
    #[error("Unknown merge mode: {0}")]
    UnknownMergeMode(String),

    /// JSON (de)serialization of trees or configuration failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system I/O errors.
    ///
    /// This can occur when loading a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParamError {
    /// Whether this error came from percent-decoding a token.
    pub fn is_decode_fault(&self) -> bool {
        matches!(
            self,
            ParamError::MalformedEscape { .. } | ParamError::InvalidUtf8 { .. }
        )
    }
}
