//! Document assembler: fixed-priority ordering and plain-text rendering.

use jats_digest_core::{Digest, ExtractedSection};

/// Order sections by priority and render them as one digest string.
///
/// Input order does not matter; the output always lists Title, Abstract,
/// Authors, Body, Conclusions (absent ones skipped), each as
/// `"\n## {name}\n{content}\n"`, with the whole result trimmed. When a name
/// occurs more than once the last occurrence wins.
///
/// # Examples
///
/// ```rust
/// use jats_digest_backend::assemble;
/// use jats_digest_core::{ExtractedSection, SectionName};
///
/// let text = assemble(vec![
///     ExtractedSection::new(SectionName::Conclusions, "It works."),
///     ExtractedSection::new(SectionName::Title, "Foo Bar"),
/// ]);
/// assert_eq!(text, "## Title\nFoo Bar\n\n## Conclusions\nIt works.");
/// ```
#[must_use]
pub fn assemble<I>(sections: I) -> String
where
    I: IntoIterator<Item = ExtractedSection>,
{
    assemble_digest(sections).render()
}

/// Collect sections into a priority-ordered [`Digest`] without rendering.
#[must_use]
pub fn assemble_digest<I>(sections: I) -> Digest
where
    I: IntoIterator<Item = ExtractedSection>,
{
    sections.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jats_digest_core::SectionName;

    fn section(name: SectionName, content: &str) -> ExtractedSection {
        ExtractedSection::new(name, content)
    }

    #[test]
    fn test_assemble_nothing() {
        assert_eq!(assemble(Vec::new()), "");
    }

    #[test]
    fn test_assemble_all_sections_reversed_input() {
        let mut sections: Vec<ExtractedSection> = SectionName::ALL
            .iter()
            .map(|name| section(*name, &format!("{name} text")))
            .collect();
        sections.reverse();

        assert_eq!(
            assemble(sections),
            "## Title\nTitle text\n\n\
             ## Abstract\nAbstract text\n\n\
             ## Authors\nAuthors text\n\n\
             ## Body\nBody text\n\n\
             ## Conclusions\nConclusions text"
        );
    }

    #[test]
    fn test_assemble_skips_absent_sections() {
        let text = assemble(vec![
            section(SectionName::Authors, "A B"),
            section(SectionName::Abstract, "Short."),
        ]);
        assert_eq!(text, "## Abstract\nShort.\n\n## Authors\nA B");
    }

    #[test]
    fn test_assemble_multiline_body() {
        let text = assemble(vec![section(SectionName::Body, "One: a\n\nTwo: b")]);
        assert_eq!(text, "## Body\nOne: a\n\nTwo: b");
    }

    #[test]
    fn test_assemble_duplicate_name_last_wins() {
        let digest = assemble_digest(vec![
            section(SectionName::Title, "old"),
            section(SectionName::Title, "new"),
        ]);
        assert_eq!(digest.len(), 1);
        assert_eq!(digest.render(), "## Title\nnew");
    }
}
