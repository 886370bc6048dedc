//! Body-matter extractors: capped section summaries and conclusions.

use super::{collected_section, SectionExtractor};
use crate::locator::{
    find_all, find_child, find_first, text_content, BODY, CONCLUSIONS_SECTION, PARAGRAPH, SECTION,
    SECTION_TITLE,
};
use crate::normalize::normalize;
use jats_digest_core::{ExtractedSection, ExtractionOptions, Result, SectionName};
use log::{debug, trace};
use roxmltree::{Document, Node, NodeId};
use std::collections::HashSet;

/// Heading used for a body section without a usable `<title>`.
pub const DEFAULT_SECTION_TITLE: &str = "Section";

/// Sections of the first `<body>`, summarized and capped.
///
/// Every `<sec>` below `<body>` (nested ones included, document order) is
/// rendered as `"{title}: {p1} {p2} {p3}"` from its first non-empty
/// paragraphs. Sections without paragraph text are skipped and do not count
/// against `max_body_sections`. Entries are separated by a blank line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BodyExtractor;

impl BodyExtractor {
    fn section_title(sec: Node) -> String {
        find_child(sec, &SECTION_TITLE)
            .map(|title| normalize(&text_content(title)))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_SECTION_TITLE.to_string())
    }

    fn render_section(sec: Node, max_paragraphs: usize) -> Option<String> {
        let paragraphs: Vec<String> = find_all(sec, &PARAGRAPH)
            .map(|paragraph| normalize(&text_content(paragraph)))
            .filter(|text| !text.is_empty())
            .take(max_paragraphs)
            .collect();
        if paragraphs.is_empty() {
            trace!("body section at byte {} has no paragraph text", sec.range().start);
            return None;
        }
        Some(format!(
            "{}: {}",
            Self::section_title(sec),
            paragraphs.join(" ")
        ))
    }
}

impl SectionExtractor for BodyExtractor {
    #[inline]
    fn section(&self) -> SectionName {
        SectionName::Body
    }

    fn extract(
        &self,
        doc: &Document,
        options: &ExtractionOptions,
    ) -> Result<Option<ExtractedSection>> {
        let Some(body) = find_first(doc.root(), &BODY) else {
            debug!("no <body> element");
            return Ok(None);
        };

        let limits = options.limits;
        let mut entries = Vec::new();
        for sec in find_all(body, &SECTION) {
            if entries.len() >= limits.max_body_sections {
                trace!("body capped at {} sections", limits.max_body_sections);
                break;
            }
            if let Some(entry) = Self::render_section(sec, limits.max_paragraphs_per_section) {
                entries.push(entry);
            }
        }

        Ok(collected_section(SectionName::Body, entries.join("\n\n")))
    }
}

/// Paragraphs of every `<sec sec-type="conclusions">` anywhere in the
/// document, joined with single spaces. Not capped.
///
/// A paragraph reachable from several matching sections (nested
/// conclusions) is taken once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConclusionsExtractor;

impl SectionExtractor for ConclusionsExtractor {
    #[inline]
    fn section(&self) -> SectionName {
        SectionName::Conclusions
    }

    fn extract(
        &self,
        doc: &Document,
        _options: &ExtractionOptions,
    ) -> Result<Option<ExtractedSection>> {
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut texts = Vec::new();

        for sec in find_all(doc.root(), &CONCLUSIONS_SECTION) {
            for paragraph in find_all(sec, &PARAGRAPH) {
                if !seen.insert(paragraph.id()) {
                    continue;
                }
                let text = normalize(&text_content(paragraph));
                if !text.is_empty() {
                    texts.push(text);
                }
            }
        }

        Ok(collected_section(SectionName::Conclusions, texts.join(" ")))
    }
}
