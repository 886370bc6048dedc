//! The digest: an ordered, bounded set of named sections.

use crate::section::{ExtractedSection, SectionName};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Write as FmtWrite;

/// Ordered collection of extracted sections.
///
/// Holds at most one section per [`SectionName`] and always keeps them in
/// priority order (Title, Abstract, Authors, Body, Conclusions), independent
/// of insertion order.
///
/// # Examples
///
/// ```rust
/// use jats_digest_core::{Digest, ExtractedSection, SectionName};
///
/// let digest: Digest = vec![
///     ExtractedSection::new(SectionName::Body, "Methods: We measured."),
///     ExtractedSection::new(SectionName::Title, "Foo Bar"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(
///     digest.render(),
///     "## Title\nFoo Bar\n\n## Body\nMethods: We measured."
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Digest {
    sections: Vec<ExtractedSection>,
}

/// Wire form of a [`Digest`]
#[derive(Deserialize)]
struct DigestRepr {
    #[serde(default)]
    sections: Vec<ExtractedSection>,
}

// Sections go through `insert` so order and uniqueness hold for any input
impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = DigestRepr::deserialize(deserializer)?;
        Ok(repr.sections.into_iter().collect())
    }
}

impl Digest {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Insert a section at its priority position.
    ///
    /// A section with the same name is replaced.
    pub fn insert(&mut self, section: ExtractedSection) {
        match self
            .sections
            .binary_search_by_key(&section.name, |existing| existing.name)
        {
            Ok(index) => {
                debug!("replacing existing {} section", section.name);
                self.sections[index] = section;
            }
            Err(index) => self.sections.insert(index, section),
        }
    }

    /// Sections in priority order.
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[ExtractedSection] {
        &self.sections
    }

    #[must_use]
    pub fn get(&self, name: SectionName) -> Option<&ExtractedSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Render the digest as plain text.
    ///
    /// Each section becomes `"\n## {name}\n{content}\n"`; the concatenation
    /// is trimmed. An empty digest renders as the empty string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            // Writing to a String cannot fail
            let _ = write!(out, "\n## {}\n{}\n", section.name, section.content);
        }
        out.trim().to_string()
    }
}

impl FromIterator<ExtractedSection> for Digest {
    fn from_iter<I: IntoIterator<Item = ExtractedSection>>(iter: I) -> Self {
        let mut digest = Self::new();
        for section in iter {
            digest.insert(section);
        }
        digest
    }
}

impl IntoIterator for Digest {
    type Item = ExtractedSection;
    type IntoIter = std::vec::IntoIter<ExtractedSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}
