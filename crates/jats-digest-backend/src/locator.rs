//! Tree locator: element-name queries over a parsed JATS document
//!
//! Matching compares local element names and plain attribute values only.
//! There is no namespace resolution and no schema validation, so documents
//! that merely resemble JATS are handled on a best-effort basis. A query
//! that matches nothing is an ordinary outcome, never an error.
//!
//! Elements used by the extractors:
//!
//! | Query | JATS element |
//! |-------|--------------|
//! | [`ARTICLE_TITLE`] | `<article-title>` |
//! | [`ABSTRACT`] | `<abstract>` |
//! | [`AUTHOR_CONTRIB`] | `<contrib contrib-type="author">` |
//! | [`GIVEN_NAMES`] / [`SURNAME`] | `<given-names>` / `<surname>` |
//! | [`BODY`] / [`SECTION`] / [`SECTION_TITLE`] / [`PARAGRAPH`] | `<body>`, `<sec>`, `<title>`, `<p>` |
//! | [`CONCLUSIONS_SECTION`] | `<sec sec-type="conclusions">` |

use roxmltree::Node;

/// Element name plus an optional attribute equality predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementQuery<'q> {
    name: &'q str,
    attribute: Option<(&'q str, &'q str)>,
}

impl<'q> ElementQuery<'q> {
    /// Match elements by local name.
    #[inline]
    #[must_use]
    pub const fn named(name: &'q str) -> Self {
        Self {
            name,
            attribute: None,
        }
    }

    /// Additionally require `attribute == value`.
    #[inline]
    #[must_use]
    pub const fn with_attribute(self, attribute: &'q str, value: &'q str) -> Self {
        Self {
            name: self.name,
            attribute: Some((attribute, value)),
        }
    }

    /// Whether `node` is an element satisfying this query.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        node.is_element()
            && node.tag_name().name() == self.name
            && self
                .attribute
                .map_or(true, |(key, value)| node.attribute(key) == Some(value))
    }
}

pub const ARTICLE_TITLE: ElementQuery<'static> = ElementQuery::named("article-title");
pub const ABSTRACT: ElementQuery<'static> = ElementQuery::named("abstract");
pub const AUTHOR_CONTRIB: ElementQuery<'static> =
    ElementQuery::named("contrib").with_attribute("contrib-type", "author");
pub const GIVEN_NAMES: ElementQuery<'static> = ElementQuery::named("given-names");
pub const SURNAME: ElementQuery<'static> = ElementQuery::named("surname");
pub const BODY: ElementQuery<'static> = ElementQuery::named("body");
pub const SECTION: ElementQuery<'static> = ElementQuery::named("sec");
pub const SECTION_TITLE: ElementQuery<'static> = ElementQuery::named("title");
pub const PARAGRAPH: ElementQuery<'static> = ElementQuery::named("p");
pub const CONCLUSIONS_SECTION: ElementQuery<'static> =
    ElementQuery::named("sec").with_attribute("sec-type", "conclusions");

/// First element matching `query` strictly below `scope`, in document order.
///
/// Pass `doc.root()` as the scope to search the whole tree.
#[must_use]
pub fn find_first<'a, 'input>(
    scope: Node<'a, 'input>,
    query: &ElementQuery,
) -> Option<Node<'a, 'input>> {
    find_all(scope, query).next()
}

/// All elements matching `query` strictly below `scope`, in document order.
pub fn find_all<'a, 'input, 'q>(
    scope: Node<'a, 'input>,
    query: &'q ElementQuery<'q>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'q
where
    'a: 'q,
    'input: 'q,
{
    // descendants() yields the scope itself first
    scope
        .descendants()
        .skip(1)
        .filter(move |node| query.matches(node))
}

/// First direct child of `parent` matching `query`.
#[must_use]
pub fn find_child<'a, 'input>(
    parent: Node<'a, 'input>,
    query: &ElementQuery,
) -> Option<Node<'a, 'input>> {
    parent.children().find(|node| query.matches(node))
}

/// Text nodes below `node` in reading order, markup ignored.
#[must_use]
pub fn text_fragments<'a>(node: Node<'a, '_>) -> Vec<&'a str> {
    node.descendants()
        .filter(|child| child.is_text())
        .filter_map(|text_node| text_node.text())
        .collect()
}

/// Concatenation of every text node below `node`.
#[must_use]
pub fn text_content(node: Node) -> String {
    text_fragments(node).concat()
}
