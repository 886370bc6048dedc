//! Front-matter extractors: title, abstract and author list.

use super::{collected_section, found_section, SectionExtractor};
use crate::locator::{
    find_all, find_first, text_content, text_fragments, ABSTRACT, ARTICLE_TITLE, AUTHOR_CONTRIB,
    GIVEN_NAMES, SURNAME,
};
use crate::normalize::normalize;
use jats_digest_core::{ExtractedSection, ExtractionOptions, Result, SectionName};
use log::{debug, trace};
use roxmltree::{Document, Node};

/// First `<article-title>` anywhere in the document.
///
/// Text nodes are concatenated as-is, so inline markup such as
/// `Foo<italic>Bar</italic>` reads `FooBar`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TitleExtractor;

impl SectionExtractor for TitleExtractor {
    #[inline]
    fn section(&self) -> SectionName {
        SectionName::Title
    }

    fn extract(
        &self,
        doc: &Document,
        options: &ExtractionOptions,
    ) -> Result<Option<ExtractedSection>> {
        let Some(title) = find_first(doc.root(), &ARTICLE_TITLE) else {
            debug!("no <article-title> element");
            return Ok(None);
        };
        let content = normalize(&text_content(title));
        Ok(found_section(SectionName::Title, content, options))
    }
}

/// First `<abstract>` anywhere in the document.
///
/// Each text node is trimmed and the pieces are joined with single spaces,
/// so paragraphs and inline elements never run together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AbstractExtractor;

impl SectionExtractor for AbstractExtractor {
    #[inline]
    fn section(&self) -> SectionName {
        SectionName::Abstract
    }

    fn extract(
        &self,
        doc: &Document,
        options: &ExtractionOptions,
    ) -> Result<Option<ExtractedSection>> {
        let Some(abstract_node) = find_first(doc.root(), &ABSTRACT) else {
            debug!("no <abstract> element");
            return Ok(None);
        };
        let joined = text_fragments(abstract_node)
            .into_iter()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let content = normalize(&joined);
        Ok(found_section(SectionName::Abstract, content, options))
    }
}

/// Author contributors (`<contrib contrib-type="author">`) in document order.
///
/// A contributor needs both a `<given-names>` and a `<surname>` with text;
/// otherwise it is skipped and does not count against `max_authors`.
/// Rendered as `"{given} {surname}"` joined with `", "`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AuthorsExtractor;

impl AuthorsExtractor {
    fn author_name(contrib: Node) -> Option<String> {
        let given = Self::name_part(contrib, find_first(contrib, &GIVEN_NAMES))?;
        let surname = Self::name_part(contrib, find_first(contrib, &SURNAME))?;
        Some(format!("{given} {surname}"))
    }

    fn name_part(contrib: Node, part: Option<Node>) -> Option<String> {
        let text = part.map(|node| normalize(&text_content(node)));
        match text {
            Some(text) if !text.is_empty() => Some(text),
            _ => {
                trace!(
                    "skipping author contrib at byte {}: incomplete name",
                    contrib.range().start
                );
                None
            }
        }
    }
}

impl SectionExtractor for AuthorsExtractor {
    #[inline]
    fn section(&self) -> SectionName {
        SectionName::Authors
    }

    fn extract(
        &self,
        doc: &Document,
        options: &ExtractionOptions,
    ) -> Result<Option<ExtractedSection>> {
        let max_authors = options.limits.max_authors;
        // Lazy walk: contribs past the cap are never visited
        let authors: Vec<String> = find_all(doc.root(), &AUTHOR_CONTRIB)
            .filter_map(Self::author_name)
            .take(max_authors)
            .collect();
        if authors.len() == max_authors {
            trace!("author list reached cap of {max_authors}");
        }

        Ok(collected_section(SectionName::Authors, authors.join(", ")))
    }
}
