//! JSON serialization for [`Digest`]
//!
//! The output carries both the structured sections and the rendered text,
//! so consumers can pick whichever they need:
//!
//! ```json
//! {
//!   "sections": [{ "name": "Title", "content": "Foo Bar" }],
//!   "text": "## Title\nFoo Bar"
//! }
//! ```

use crate::digest::Digest;
use crate::section::ExtractedSection;
use serde::Serialize;
use serde_json::{to_string, to_string_pretty};

/// Options for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsonOptions {
    /// Pretty-print with indentation (default: true)
    pub pretty: bool,
}

impl Default for JsonOptions {
    #[inline]
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Serialize)]
struct DigestView<'a> {
    sections: &'a [ExtractedSection],
    text: String,
}

#[derive(Serialize)]
struct DiagnosticView<'a> {
    error: &'a str,
}

/// JSON serializer for digests
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonSerializer {
    options: JsonOptions,
}

impl JsonSerializer {
    /// Create a new JSON serializer with default options (pretty-printed)
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use = "creates serializer with custom options"]
    pub const fn with_options(options: JsonOptions) -> Self {
        Self { options }
    }

    /// Serialize a digest as `{"sections": [...], "text": "..."}`
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn serialize_digest(&self, digest: &Digest) -> Result<String, serde_json::Error> {
        self.write(&DigestView {
            sections: digest.sections(),
            text: digest.render(),
        })
    }

    /// Serialize a diagnostic message as `{"error": "..."}`
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn serialize_diagnostic(&self, message: &str) -> Result<String, serde_json::Error> {
        self.write(&DiagnosticView { error: message })
    }

    fn write<T: Serialize>(&self, value: &T) -> Result<String, serde_json::Error> {
        if self.options.pretty {
            to_string_pretty(value)
        } else {
            to_string(value)
        }
    }
}
