//! Parse boundary and extraction pipeline
//!
//! ```text
//! raw bytes ──► decode + XML parse ──► 5 extractors (same tree) ──► assembler
//!                     │                        │
//!                     ▼                        ▼
//!      "XML parsing error: ..."   "Error extracting text: ..."
//! ```
//!
//! Two entry points expose the same pipeline:
//!
//! - [`JatsDigester::digest_bytes`] returns a structured `Result<Digest>`.
//! - [`JatsDigester::extract`] (and the free [`extract`]) always return a
//!   string: the rendered digest, or the diagnostic text of the error. This
//!   is the form handed to the text-generation step, which only ever deals
//!   in plain text.
//!
//! A digester holds no per-call state. One instance can be shared across
//! threads and used for concurrent requests; every call parses its own tree.

use crate::extractors::{default_extractors, SectionExtractor};
use encoding_rs::{Encoding, UTF_8};
use jats_digest_core::{Digest, DigestError, ExtractionOptions, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use roxmltree::{Document, ParsingOptions};
use std::any::Any;
use std::borrow::Cow;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

// `encoding="..."` pseudo-attribute of a leading XML declaration
static RE_XML_ENCODING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?-u)\A<\?xml[^>]*?\sencoding\s*=\s*["']([A-Za-z0-9._:\-]+)["']"#)
        .expect("regex is compile-time constant")
});

/// Parse XML text into a read-only document tree.
///
/// DTD declarations are accepted (JATS files usually carry a DOCTYPE), but
/// external entities are never resolved.
///
/// # Errors
/// Returns [`DigestError::XmlParse`] if the text is not well-formed XML.
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    let parse_options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(xml, parse_options)
        .map_err(|e| DigestError::XmlParse(e.to_string()))
}

/// Decode raw input bytes to text.
///
/// Detection order:
/// 1. Byte order mark (UTF-8, UTF-16 LE/BE), stripped before decoding
/// 2. UTF-8, borrowed without copying when valid
/// 3. The ASCII-compatible encoding named in the XML declaration
///    (ISO-8859-1, Windows-1252, ...) for input that is not UTF-8
///
/// # Errors
/// Returns [`DigestError::XmlParse`] when the bytes are not valid in the
/// selected encoding.
pub fn decode_input(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_strict(encoding, &bytes[bom_len..]);
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(utf8_error) => match declared_encoding(bytes) {
            Some(encoding) if encoding != UTF_8 && encoding.is_ascii_compatible() => {
                debug!("decoding input as declared {}", encoding.name());
                decode_strict(encoding, bytes)
            }
            _ => Err(DigestError::XmlParse(format!("invalid UTF-8: {utf8_error}"))),
        },
    }
}

fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let captures = RE_XML_ENCODING.captures(bytes)?;
    Encoding::for_label(captures.get(1)?.as_bytes())
}

fn decode_strict<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| DigestError::XmlParse(format!("invalid {} input", encoding.name())))
}

/// Extraction pipeline: parse, run every extractor, collect a [`Digest`].
#[derive(Debug)]
pub struct JatsDigester {
    options: ExtractionOptions,
    extractors: Vec<Box<dyn SectionExtractor>>,
}

impl Default for JatsDigester {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl JatsDigester {
    /// Digester with the five built-in extractors and default caps.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ExtractionOptions::default())
    }

    #[must_use]
    pub fn with_options(options: ExtractionOptions) -> Self {
        Self::with_extractors(options, default_extractors())
    }

    /// Digester with a custom extractor set.
    #[must_use]
    pub fn with_extractors(
        options: ExtractionOptions,
        extractors: Vec<Box<dyn SectionExtractor>>,
    ) -> Self {
        Self {
            options,
            extractors,
        }
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Digest raw XML bytes.
    ///
    /// # Errors
    /// [`DigestError::XmlParse`] for undecodable bytes or malformed XML,
    /// [`DigestError::Extraction`] if an extractor fails.
    pub fn digest_bytes(&self, bytes: &[u8]) -> Result<Digest> {
        let text = decode_input(bytes)?;
        self.digest_str(&text)
    }

    /// Digest XML text.
    ///
    /// # Errors
    /// See [`JatsDigester::digest_bytes`].
    pub fn digest_str(&self, xml: &str) -> Result<Digest> {
        let doc = parse_document(xml)?;
        self.digest_document(&doc)
    }

    /// Digest an already parsed tree.
    ///
    /// # Errors
    /// Propagates the first extractor failure.
    pub fn digest_document(&self, doc: &Document) -> Result<Digest> {
        let mut digest = Digest::new();
        for extractor in &self.extractors {
            match extractor.extract(doc, &self.options)? {
                Some(section) => {
                    debug!(
                        "{} section extracted ({} chars)",
                        section.name,
                        section.content.chars().count()
                    );
                    digest.insert(section);
                }
                None => debug!("{} section absent", extractor.section()),
            }
        }
        Ok(digest)
    }

    /// Read and digest an XML file.
    ///
    /// # Errors
    /// [`DigestError::IoError`] if the file cannot be read, otherwise as
    /// [`JatsDigester::digest_bytes`].
    pub fn digest_file<P: AsRef<Path>>(&self, path: P) -> Result<Digest> {
        let bytes = fs::read(path.as_ref())?;
        self.digest_bytes(&bytes)
    }

    /// Digest raw bytes into a single string; never fails.
    ///
    /// Returns the rendered digest on success, `"XML parsing error: ..."` for
    /// unparseable input and `"Error extracting text: ..."` for any fault
    /// during extraction, including a panic inside an extractor.
    #[must_use]
    pub fn extract(&self, bytes: &[u8]) -> String {
        // Custom extractors may panic on unexpected trees; keep the string contract
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.digest_bytes(bytes)));
        match outcome {
            Ok(Ok(digest)) => digest.render(),
            Ok(Err(err)) => {
                debug!("digest failed: {err}");
                err.to_string()
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("extractor panicked: {message}");
                DigestError::Extraction(message).to_string()
            }
        }
    }
}

/// Digest raw bytes with the default pipeline; never fails.
///
/// # Examples
///
/// ```rust
/// use jats_digest_backend::extract;
///
/// let xml = b"<article><front><article-meta><title-group>\
///     <article-title>Foo  Bar</article-title>\
///     </title-group></article-meta></front></article>";
/// assert_eq!(extract(xml), "## Title\nFoo Bar");
///
/// assert!(extract(b"<article><unclosed>").starts_with("XML parsing error: "));
/// ```
#[must_use]
pub fn extract(bytes: &[u8]) -> String {
    JatsDigester::new().extract(bytes)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "extractor panicked".to_string()
    }
}
