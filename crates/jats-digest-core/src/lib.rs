//! # JATS Digest Core
//!
//! Shared types for turning a scientific article in JATS/NLM XML into a
//! bounded plain-text digest suitable for downstream summarization.
//!
//! The extraction logic itself lives in the `jats-digest-backend` crate. This
//! crate holds the data model every layer agrees on:
//!
//! - [`SectionName`] / [`ExtractedSection`] - one named piece of the digest
//! - [`Digest`] - the ordered collection of sections (Title, Abstract,
//!   Authors, Body, Conclusions)
//! - [`ExtractionOptions`] / [`ExtractionLimits`] - truncation caps and the
//!   empty-section policy
//! - [`DigestError`] - the error taxonomy, whose `Display` output doubles as
//!   the diagnostic digest text
//! - [`compose_prompt`] - prefixing a digest with generation instructions
//! - [`JsonSerializer`] - JSON rendering of a digest
//!
//! ## Example
//!
//! ```rust
//! use jats_digest_core::{Digest, ExtractedSection, SectionName};
//!
//! let mut digest = Digest::new();
//! digest.insert(ExtractedSection::new(SectionName::Authors, "Ada Lovelace"));
//! digest.insert(ExtractedSection::new(SectionName::Title, "Notes"));
//!
//! let names: Vec<_> = digest.sections().iter().map(|s| s.name).collect();
//! assert_eq!(names, vec![SectionName::Title, SectionName::Authors]);
//! ```

pub mod digest;
pub mod error;
pub mod options;
pub mod prompt;
pub mod section;
pub mod serializer;

pub use digest::Digest;
pub use error::{DigestError, Result};
pub use options::{
    EmptySectionPolicy, ExtractionLimits, ExtractionOptions, DEFAULT_MAX_AUTHORS,
    DEFAULT_MAX_BODY_SECTIONS, DEFAULT_MAX_PARAGRAPHS_PER_SECTION,
};
pub use prompt::{compose_prompt, SUMMARY_REQUEST_HEADER};
pub use section::{ExtractedSection, SectionName};
pub use serializer::{JsonOptions, JsonSerializer};
