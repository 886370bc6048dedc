//! Section extractors
//!
//! Each extractor maps a parsed document to at most one [`ExtractedSection`].
//! They run independently over the same tree; none of them sees another's
//! output. A missing element yields `Ok(None)`: partial absence is the normal
//! case for real-world articles and is never reported as an error.
//!
//! | Extractor | Source elements | Cap |
//! |-----------|-----------------|-----|
//! | [`TitleExtractor`] | first `<article-title>` | - |
//! | [`AbstractExtractor`] | first `<abstract>` | - |
//! | [`AuthorsExtractor`] | `<contrib contrib-type="author">` | `max_authors` |
//! | [`BodyExtractor`] | `<body>` / `<sec>` / `<p>` | `max_body_sections`, `max_paragraphs_per_section` |
//! | [`ConclusionsExtractor`] | `<sec sec-type="conclusions">` / `<p>` | - |

mod body;
mod front;

pub use body::{BodyExtractor, ConclusionsExtractor, DEFAULT_SECTION_TITLE};
pub use front::{AbstractExtractor, AuthorsExtractor, TitleExtractor};

use jats_digest_core::{ExtractedSection, ExtractionOptions, Result, SectionName};
use log::debug;
use roxmltree::Document;
use std::fmt;

/// A rule producing one named digest section from a parsed document.
///
/// Implementations must be pure: the same document and options always give
/// the same result. Returning `Err` is reserved for unexpected faults; the
/// pipeline turns it into an `Error extracting text: ...` diagnostic.
pub trait SectionExtractor: Send + Sync + fmt::Debug {
    /// Name of the section this extractor produces.
    fn section(&self) -> SectionName;

    /// Extract the section, or `Ok(None)` when the document lacks it.
    ///
    /// # Errors
    /// Returns an error only on an unexpected fault during traversal.
    fn extract(
        &self,
        doc: &Document,
        options: &ExtractionOptions,
    ) -> Result<Option<ExtractedSection>>;
}

/// The five built-in extractors in digest priority order.
#[must_use]
pub fn default_extractors() -> Vec<Box<dyn SectionExtractor>> {
    vec![
        Box::new(TitleExtractor),
        Box::new(AbstractExtractor),
        Box::new(AuthorsExtractor),
        Box::new(BodyExtractor),
        Box::new(ConclusionsExtractor),
    ]
}

/// Section for an element that was found, honoring the empty-section policy.
fn found_section(
    name: SectionName,
    content: String,
    options: &ExtractionOptions,
) -> Option<ExtractedSection> {
    if content.is_empty() && !options.keeps_empty_sections() {
        debug!("{name} element found but empty, omitting");
        return None;
    }
    Some(ExtractedSection::new(name, content))
}

/// Section for list-style content, produced only when something was collected.
fn collected_section(name: SectionName, content: String) -> Option<ExtractedSection> {
    if content.is_empty() {
        debug!("no {name} content collected");
        None
    } else {
        Some(ExtractedSection::new(name, content))
    }
}
