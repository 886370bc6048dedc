//! End-to-end tests for the digest pipeline
//!
//! Each test feeds raw XML bytes through `extract` / `JatsDigester` and checks
//! the rendered digest.

use jats_digest_backend::{extract, JatsDigester};
use jats_digest_core::{EmptySectionPolicy, ExtractionOptions, SectionName};

/// Full article with every recognized part, deliberately out of digest order.
const FULL_ARTICLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE article PUBLIC "-//NLM//DTD JATS (Z39.96) Journal Publishing DTD v1.2 20190208//EN" "JATS-journalpublishing1.dtd">
<article xmlns:xlink="http://www.w3.org/1999/xlink" article-type="research-article">
  <back>
    <sec sec-type="conclusions">
      <title>Conclusions</title>
      <p>Gene <italic>X</italic> regulates growth.</p>
    </sec>
  </back>
  <body>
    <sec>
      <title>Introduction</title>
      <p>Cells   divide.</p>
      <p>Some do not [1].</p>
    </sec>
    <sec sec-type="methods">
      <title>Methods</title>
      <p>We counted cells &amp; measured size.</p>
    </sec>
  </body>
  <front>
    <article-meta>
      <abstract>
        <p>Growth is <bold>regulated</bold>.</p>
        <p>We show how.</p>
      </abstract>
      <contrib-group>
        <contrib contrib-type="author">
          <name><surname>Curie</surname><given-names>Marie</given-names></name>
        </contrib>
        <contrib contrib-type="author">
          <name><surname>Darwin</surname><given-names>Charles</given-names></name>
        </contrib>
      </contrib-group>
      <title-group>
        <article-title>Growth  control in
          <italic>E. coli</italic></article-title>
      </title-group>
    </article-meta>
  </front>
</article>"#;

fn author(given: &str, surname: &str) -> String {
    format!(
        r#"<contrib contrib-type="author"><name><surname>{surname}</surname><given-names>{given}</given-names></name></contrib>"#
    )
}

fn wrap(inner: &str) -> Vec<u8> {
    format!("<article>{inner}</article>").into_bytes()
}

// ==================== FULL DOCUMENT ====================

#[test]
fn test_full_article_digest() {
    let digest = extract(FULL_ARTICLE.as_bytes());
    let expected = "## Title\n\
                    Growth control in E. coli\n\n\
                    ## Abstract\n\
                    Growth is regulated . We show how.\n\n\
                    ## Authors\n\
                    Marie Curie, Charles Darwin\n\n\
                    ## Body\n\
                    Introduction: Cells divide. Some do not 1.\n\n\
                    Methods: We counted cells measured size.\n\n\
                    ## Conclusions\n\
                    Gene X regulates growth.";
    assert_eq!(digest, expected);
}

#[test]
fn test_section_order_independent_of_source_order() {
    let digest = JatsDigester::new()
        .digest_bytes(FULL_ARTICLE.as_bytes())
        .unwrap();
    let names: Vec<SectionName> = digest.sections().iter().map(|s| s.name).collect();
    assert_eq!(names, SectionName::ALL.to_vec());

    let text = digest.render();
    let positions: Vec<usize> = SectionName::ALL
        .iter()
        .map(|name| text.find(&format!("## {name}\n")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

// ==================== TESTABLE PROPERTIES ====================

#[test]
fn test_no_recognized_elements_gives_empty_digest() {
    assert_eq!(extract(b"<article><front><journal-meta/></front></article>"), "");
    assert_eq!(extract(b"<html><body2><p>x</p></body2></html>"), "");
}

#[test]
fn test_title_whitespace_collapsed() {
    let digest = extract(&wrap("<article-title>Foo  Bar</article-title>"));
    assert!(digest.contains("## Title\nFoo Bar"), "got {digest:?}");
    assert_eq!(format!("\n{digest}\n"), "\n## Title\nFoo Bar\n");
}

#[test]
fn test_author_cap_seven_to_five() {
    let authors: String = (1..=7).map(|i| author(&format!("Given{i}"), &format!("Sur{i}"))).collect();
    let digest = extract(&wrap(&authors));
    assert_eq!(
        digest,
        "## Authors\nGiven1 Sur1, Given2 Sur2, Given3 Sur3, Given4 Sur4, Given5 Sur5"
    );
}

#[test]
fn test_body_cap_eight_sections_four_paragraphs() {
    let sections: String = (1..=8)
        .map(|i| {
            let paragraphs: String = (1..=4).map(|j| format!("<p>s{i}p{j}</p>")).collect();
            format!("<sec><title>Sec {i}</title>{paragraphs}</sec>")
        })
        .collect();
    let digest = JatsDigester::new()
        .digest_bytes(&wrap(&format!("<body>{sections}</body>")))
        .unwrap();
    let body = &digest.get(SectionName::Body).unwrap().content;
    let entries: Vec<&str> = body.split("\n\n").collect();
    assert_eq!(entries.len(), 5);
    for (i, entry) in entries.iter().enumerate() {
        let n = i + 1;
        assert_eq!(*entry, format!("Sec {n}: s{n}p1 s{n}p2 s{n}p3"));
    }
}

#[test]
fn test_contributor_missing_surname_excluded_and_not_counted() {
    let mut contribs = String::from(
        r#"<contrib contrib-type="author"><name><given-names>NoSurname</given-names></name></contrib>"#,
    );
    for i in 1..=5 {
        contribs.push_str(&author(&format!("G{i}"), &format!("S{i}")));
    }
    let digest = extract(&wrap(&contribs));
    assert!(!digest.contains("NoSurname"));
    assert_eq!(digest, "## Authors\nG1 S1, G2 S2, G3 S3, G4 S4, G5 S5");
}

#[test]
fn test_malformed_xml_yields_diagnostic() {
    for input in [
        &b"<article><unclosed>"[..],
        &b"<article><p></article>"[..],
        &b"not xml at all"[..],
        &b"<a></b>"[..],
    ] {
        let digest = extract(input);
        assert!(
            digest.starts_with("XML parsing error: "),
            "input {:?} gave {digest:?}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let digester = JatsDigester::new();
    let first = digester.extract(FULL_ARTICLE.as_bytes());
    let second = digester.extract(FULL_ARTICLE.as_bytes());
    assert_eq!(first, second);
    assert_eq!(first, extract(FULL_ARTICLE.as_bytes()));
}

// ==================== EMPTY SECTION POLICY ====================

#[test]
fn test_empty_title_and_abstract_omitted_by_default() {
    let xml = wrap("<article-title>  </article-title><abstract><p/></abstract>");
    assert_eq!(extract(&xml), "");
}

#[test]
fn test_empty_title_and_abstract_kept_on_request() {
    let xml = wrap("<article-title>  </article-title><abstract><p/></abstract>");
    let options = ExtractionOptions::default().with_empty_sections(EmptySectionPolicy::Keep);
    let digest = JatsDigester::with_options(options).extract(&xml);
    assert_eq!(digest, "## Title\n\n\n## Abstract");
}

#[test]
fn test_keep_policy_does_not_invent_missing_sections() {
    let options = ExtractionOptions::default().with_empty_sections(EmptySectionPolicy::Keep);
    assert_eq!(JatsDigester::with_options(options).extract(b"<article/>"), "");
}

// ==================== REAL-WORLD IRREGULARITIES ====================

#[test]
fn test_partial_document_keeps_recoverable_content() {
    let xml = wrap(
        r#"<front><article-meta><contrib-group><contrib contrib-type="author"><collab>Consortium</collab></contrib></contrib-group></article-meta></front>
           <body><sec><p>Untitled text.</p></sec></body>"#,
    );
    assert_eq!(extract(&xml), "## Body\nSection: Untitled text.");
}

#[test]
fn test_namespaced_document() {
    let xml = br#"<j:article xmlns:j="http://jats.nlm.nih.gov"><j:front><j:article-title>Namespaced</j:article-title></j:front></j:article>"#;
    assert_eq!(extract(xml), "## Title\nNamespaced");
}

#[test]
fn test_cdata_and_entities() {
    let xml = wrap("<abstract><p><![CDATA[Raw <text>]]> and &lt;escaped&gt; &#233;t&#233;</p></abstract>");
    assert_eq!(extract(&xml), "## Abstract\nRaw text and escaped été");
}

#[test]
fn test_concurrent_extraction() {
    let digester = JatsDigester::new();
    let expected = digester.extract(FULL_ARTICLE.as_bytes());
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| digester.extract(FULL_ARTICLE.as_bytes())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
