//! Named digest sections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of a digest section.
///
/// The declaration order is the rendering priority: a digest always lists
/// its sections as Title, Abstract, Authors, Body, Conclusions no matter
/// where the underlying elements sit in the source XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionName {
    Title,
    Abstract,
    Authors,
    Body,
    Conclusions,
}

impl SectionName {
    /// All section names in rendering priority order.
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Abstract,
        Self::Authors,
        Self::Body,
        Self::Conclusions,
    ];

    /// Heading text used in the rendered digest (`## {name}`).
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Abstract => "Abstract",
            Self::Authors => "Authors",
            Self::Body => "Body",
            Self::Conclusions => "Conclusions",
        }
    }

    /// Position in the rendering order (0 = first).
    #[inline]
    #[must_use]
    pub const fn priority(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown section name: {s}"))
    }
}

/// One named, normalized piece of text produced by an extractor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub name: SectionName,
    pub content: String,
}

impl ExtractedSection {
    #[inline]
    #[must_use]
    pub fn new(name: SectionName, content: impl Into<String>) -> Self {
        Self {
            name,
            content: content.into(),
        }
    }
}
