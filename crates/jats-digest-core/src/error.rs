//! Error types for digest extraction.
//!
//! The pipeline never hands a structured error to the text-generation side:
//! the `Display` form of [`DigestError`] *is* the digest returned in that
//! case. The two extraction variants therefore carry their user-facing
//! prefixes in their `#[error]` attributes.

use thiserror::Error;

/// Error types that can occur while producing a digest.
///
/// # Examples
///
/// ```rust
/// use jats_digest_core::DigestError;
///
/// let err = DigestError::XmlParse("unexpected end of stream".to_string());
/// assert_eq!(err.to_string(), "XML parsing error: unexpected end of stream");
/// ```
#[derive(Error, Debug)]
pub enum DigestError {
    /// The input is not well-formed XML (or not valid UTF-8).
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// An unexpected fault while walking a parsed document.
    ///
    /// Missing elements are never reported this way; they only leave a
    /// section out of the digest.
    #[error("Error extracting text: {0}")]
    Extraction(String),

    /// Reading an input file failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DigestError {
    /// Whether this error came from the extraction pipeline itself
    /// (as opposed to reading the input).
    #[inline]
    #[must_use]
    pub const fn is_diagnostic(&self) -> bool {
        matches!(self, Self::XmlParse(_) | Self::Extraction(_))
    }
}

/// Result type alias for digest operations.
pub type Result<T> = std::result::Result<T, DigestError>;
