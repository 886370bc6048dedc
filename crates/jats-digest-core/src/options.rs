//! Extraction options: truncation caps and the empty-section policy.
//!
//! The caps keep the digest bounded no matter how large the article is.
//! All of them can be overridden, including from a TOML config file.

use serde::{Deserialize, Serialize};

/// Default number of authors listed before the rest are dropped.
pub const DEFAULT_MAX_AUTHORS: usize = 5;

/// Default number of body sections rendered.
pub const DEFAULT_MAX_BODY_SECTIONS: usize = 5;

/// Default number of paragraphs rendered per body section.
pub const DEFAULT_MAX_PARAGRAPHS_PER_SECTION: usize = 3;

/// Truncation caps applied by the list-producing extractors.
///
/// A cap of 0 suppresses the corresponding content.
///
/// # Examples
///
/// ```rust
/// use jats_digest_core::ExtractionLimits;
///
/// let limits = ExtractionLimits::default();
/// assert_eq!(limits.max_authors, 5);
/// assert_eq!(limits.max_body_sections, 5);
/// assert_eq!(limits.max_paragraphs_per_section, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionLimits {
    pub max_authors: usize,
    pub max_body_sections: usize,
    pub max_paragraphs_per_section: usize,
}

impl Default for ExtractionLimits {
    #[inline]
    fn default() -> Self {
        Self {
            max_authors: DEFAULT_MAX_AUTHORS,
            max_body_sections: DEFAULT_MAX_BODY_SECTIONS,
            max_paragraphs_per_section: DEFAULT_MAX_PARAGRAPHS_PER_SECTION,
        }
    }
}

/// What to do with a Title or Abstract element that is present but whose
/// normalized text is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySectionPolicy {
    /// Treat the element as absent (no section).
    #[default]
    Omit,
    /// Emit the section with empty content whenever the element is found.
    Keep,
}

/// Options shared by every extractor of one pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    #[serde(flatten)]
    pub limits: ExtractionLimits,
    pub empty_sections: EmptySectionPolicy,
}

impl ExtractionOptions {
    #[inline]
    #[must_use]
    pub const fn with_max_authors(mut self, max_authors: usize) -> Self {
        self.limits.max_authors = max_authors;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_max_body_sections(mut self, max_body_sections: usize) -> Self {
        self.limits.max_body_sections = max_body_sections;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_max_paragraphs_per_section(mut self, max_paragraphs: usize) -> Self {
        self.limits.max_paragraphs_per_section = max_paragraphs;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_empty_sections(mut self, policy: EmptySectionPolicy) -> Self {
        self.empty_sections = policy;
        self
    }

    /// Whether a found-but-empty Title/Abstract still yields a section.
    #[inline]
    #[must_use]
    pub const fn keeps_empty_sections(&self) -> bool {
        matches!(self.empty_sections, EmptySectionPolicy::Keep)
    }
}
