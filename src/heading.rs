//! Heading representation for parsed documents.
//!
//! A heading is a single leveled entry in a document's structure, carrying
//! the text shown in navigation, a per-document unique slug, and an opaque
//! handle back to the rendered node for position queries. Headings arrive
//! flat from the document scanner; the outline builder assigns `children`
//! to turn them into a forest.

use serde::Serialize;

/// Opaque handle to a rendered document node, used only for position queries.
///
/// The scanner assigns these in document order; the viewport maps them back
/// to rendered offsets. Nothing else inspects the inner index.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ElementId(
    /// Scanner-assigned document-order index.
    pub usize,
);

#[derive(Clone, Serialize)]
/// A single document heading with depth, navigation text, and anchor identity.
pub struct Heading {
    /// Heading depth, `1` to `6` for `h1` to `h6`.
    pub level: usize,
    /// Rendered text with inline decorations stripped.
    pub title: String,
    /// Per-document unique id, typically the anchor id of the heading.
    pub slug: String,
    /// Navigable reference derived from the slug (`#slug`).
    pub link: String,
    /// Handle to the rendered node backing this heading.
    #[serde(skip)]
    pub element: ElementId,
    /// Nested headings, populated only by the outline builder.
    pub children: Vec<Heading>,
}

impl Heading {
    #[must_use]
    /// Creates a flat heading with no children, deriving `link` from `slug`.
    pub fn new(level: usize, title: impl Into<String>, slug: impl Into<String>, element: ElementId) -> Self {
        let slug = slug.into();
        let link = format!("#{slug}");
        Self {
            level,
            title: title.into(),
            slug,
            link,
            element,
            children: Vec::new(),
        }
    }
}
