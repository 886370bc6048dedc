//! Property-Based Tests
//!
//! Invariants of the digest pipeline explored with proptest:
//! - Normalization is idempotent and only emits allowed characters
//! - Extraction never panics and is deterministic for arbitrary input
//! - Section order and caps hold for generated articles

use jats_digest_backend::normalize::KEPT_PUNCTUATION;
use jats_digest_backend::{extract, normalize, JatsDigester};
use jats_digest_core::SectionName;
use proptest::prelude::*;

// ============================================================================
// Normalizer Properties
// ============================================================================

/// Property: normalize(normalize(x)) == normalize(x)
#[test]
fn proptest_normalize_idempotent() {
    proptest!(|(text in "\\PC{0,200}")| {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    });
}

/// Property: output has no edge whitespace and no whitespace runs
#[test]
fn proptest_normalize_whitespace_shape() {
    proptest!(|(text in "[ \t\n\r\\PC]{0,200}")| {
        let out = normalize(&text);
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.contains("  "), "double space in {:?}", out);
        prop_assert!(out.chars().all(|c| !c.is_whitespace() || c == ' '));
    });
}

/// Property: every kept character is alphanumeric, a space, or allowed punctuation
#[test]
fn proptest_normalize_character_set() {
    proptest!(|(text in "\\PC{0,200}")| {
        let out = normalize(&text);
        prop_assert!(out
            .chars()
            .all(|c| c.is_alphanumeric() || c == ' ' || KEPT_PUNCTUATION.contains(&c)));
    });
}

// ============================================================================
// Pipeline Properties
// ============================================================================

/// Property: arbitrary bytes never panic and always produce a string
#[test]
fn proptest_extract_no_panic_arbitrary_bytes() {
    proptest!(|(bytes in proptest::collection::vec(any::<u8>(), 0..300))| {
        let _ = extract(&bytes);
    });
}

/// Property: byte-identical input gives byte-identical output
#[test]
fn proptest_extract_deterministic() {
    proptest!(|(text in "\\PC{0,300}")| {
        let xml = format!("<article><article-title>{}</article-title></article>", escape(&text));
        prop_assert_eq!(extract(xml.as_bytes()), extract(xml.as_bytes()));
    });
}

/// Property: generated articles respect caps and section ordering
#[test]
fn proptest_generated_article_invariants() {
    proptest!(ProptestConfig::with_cases(64), |(
        authors in 0usize..12,
        sections in 0usize..10,
        paragraphs in 0usize..6,
        front_last in any::<bool>(),
    )| {
        let front = {
            let contribs: String = (0..authors)
                .map(|i| format!(
                    r#"<contrib contrib-type="author"><name><surname>S{i}</surname><given-names>G{i}</given-names></name></contrib>"#
                ))
                .collect();
            format!("<front><article-title>T</article-title>{contribs}</front>")
        };
        let body = {
            let secs: String = (0..sections)
                .map(|i| {
                    let ps: String = (0..paragraphs).map(|j| format!("<p>p{j}</p>")).collect();
                    format!("<sec><title>S{i}</title>{ps}</sec>")
                })
                .collect();
            format!("<body>{secs}</body>")
        };
        let xml = if front_last {
            format!("<article>{body}{front}</article>")
        } else {
            format!("<article>{front}{body}</article>")
        };

        let digest = JatsDigester::new().digest_bytes(xml.as_bytes()).unwrap();

        let names: Vec<SectionName> = digest.sections().iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        prop_assert_eq!(&names, &sorted);

        match digest.get(SectionName::Authors) {
            Some(section) => prop_assert_eq!(section.content.split(", ").count(), authors.min(5)),
            None => prop_assert_eq!(authors, 0),
        }

        match digest.get(SectionName::Body) {
            Some(section) => {
                let entries: Vec<&str> = section.content.split("\n\n").collect();
                prop_assert_eq!(entries.len(), sections.min(5));
                for entry in entries {
                    let (_, text) = entry.split_once(": ").unwrap();
                    prop_assert_eq!(text.split(' ').count(), paragraphs.min(3));
                }
            }
            None => prop_assert!(sections == 0 || paragraphs == 0),
        }
    });
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
