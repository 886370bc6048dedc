//! JATS article digest extraction for `jats_digest`
//!
//! Turns a scientific article in JATS/NLM XML (`PubMed` Central, bioRxiv,
//! publisher feeds) into a short plain-text digest that a text-generation
//! model can summarize.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         JatsDigester                         │
//! │   bytes ─► decode_input ─► parse_document (roxmltree tree)   │
//! └──────────────────────────────────────────────────────────────┘
//!                                 │
//!      ┌──────────┬───────────────┼─────────────┬───────────────┐
//!      ▼          ▼               ▼             ▼               ▼
//!   Title     Abstract        Authors         Body        Conclusions
//!      │          │               │             │               │
//!      └──────────┴─── locator + normalize ─────┴───────────────┘
//!                                 │
//!                                 ▼
//!                      assemble (fixed priority)
//! ```
//!
//! - [`normalize()`] - whitespace collapse and noise removal
//! - [`locator`] - element-name (+ attribute) queries over the tree
//! - [`extractors`] - the five section rules and their caps
//! - [`assemble`] - ordering and rendering
//! - [`JatsDigester`] / [`extract`] - the parse boundary
//!
//! # Example
//!
//! ```rust
//! use jats_digest_backend::{JatsDigester, extract};
//! use jats_digest_core::{ExtractionOptions, SectionName};
//!
//! let xml = br#"<article>
//!   <front><article-meta>
//!     <title-group><article-title>Foo  Bar</article-title></title-group>
//!     <contrib-group>
//!       <contrib contrib-type="author">
//!         <name><surname>Lovelace</surname><given-names>Ada</given-names></name>
//!       </contrib>
//!     </contrib-group>
//!   </article-meta></front>
//! </article>"#;
//!
//! assert_eq!(extract(xml), "## Title\nFoo Bar\n\n## Authors\nAda Lovelace");
//!
//! let digester = JatsDigester::with_options(ExtractionOptions::default().with_max_authors(0));
//! let digest = digester.digest_bytes(xml).unwrap();
//! assert!(digest.get(SectionName::Authors).is_none());
//! ```

pub mod assembler;
pub mod digester;
pub mod extractors;
pub mod locator;
pub mod normalize;

pub use assembler::{assemble, assemble_digest};
pub use digester::{decode_input, extract, parse_document, JatsDigester};
pub use extractors::{
    default_extractors, AbstractExtractor, AuthorsExtractor, BodyExtractor,
    ConclusionsExtractor, SectionExtractor, TitleExtractor,
};
pub use locator::ElementQuery;
pub use normalize::normalize;
