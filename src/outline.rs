//! The outline builder turns a flat, leveled heading sequence into a forest.
//!
//! Nesting follows a nearest-unclaimed-ancestor rule rather than strict
//! level arithmetic: each heading attaches to the closest earlier heading
//! with a strictly smaller level, so depth gaps (an h4 directly under an
//! h2) still produce a sensible tree. Building the outline also refreshes
//! the session's resolved-header cache, the flat document-order list the
//! anchor tracker reads.

use crate::heading::{ElementId, Heading};

/// Which heading depths participate in the outline.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutlineRange {
    /// Outline is turned off; building yields nothing and clears the cache.
    Disabled,
    /// Include exactly one depth.
    Level(usize),
    /// Include an inclusive depth band.
    Band(usize, usize),
    /// Include everything below the document title, equivalent to `Band(2, 6)`.
    Deep,
}

impl Default for OutlineRange {
    fn default() -> Self {
        Self::Level(2)
    }
}

impl OutlineRange {
    #[must_use]
    /// Parses the config/CLI spelling of a range.
    ///
    /// Accepts `"false"`, `"deep"`, a single depth like `"2"`, or an
    /// inclusive band like `"2-4"`. Anything unrecognised falls back to the
    /// default single-depth outline.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text {
            "false" => Self::Disabled,
            "deep" => Self::Deep,
            _ => {
                if let Some((lo, hi)) = text.split_once('-') {
                    match (lo.trim().parse(), hi.trim().parse()) {
                        (Ok(lo), Ok(hi)) => Self::Band(lo, hi),
                        _ => Self::default(),
                    }
                } else {
                    text.parse().map_or_else(|_| Self::default(), Self::Level)
                }
            }
        }
    }

    /// Resolves to a closed `[lo, hi]` depth interval, `None` when disabled.
    fn bounds(self) -> Option<(usize, usize)> {
        match self {
            Self::Disabled => None,
            Self::Level(level) => Some((level, level)),
            Self::Band(lo, hi) => Some((lo, hi)),
            Self::Deep => Some((2, 6)),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
/// One cache entry: a heading that survived the range filter, in document order.
pub struct ResolvedHeader {
    /// Handle to the rendered heading node, for position queries.
    pub element: ElementId,
    /// The heading's navigable anchor (`#slug`).
    pub link: String,
}

#[derive(Default)]
/// Owns the resolved-header cache for one rendered document.
///
/// One session is current per document at a time. The builder overwrites the
/// cache wholesale on every rebuild; the anchor tracker only ever reads it.
/// Keeping the cache on an owned session (rather than a process global)
/// lets multiple documents and tests coexist without cross-contamination.
pub struct OutlineSession {
    resolved: Vec<ResolvedHeader>,
}

impl OutlineSession {
    #[must_use]
    /// Creates a session with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// The flat, range-filtered, document-ordered headings from the last build.
    ///
    /// This is the tracker's only source of "all navigable headings in
    /// order"; callers must not flatten the returned forest instead.
    pub fn resolved_headers(&self) -> &[ResolvedHeader] {
        &self.resolved
    }

    /// Builds the outline forest and refreshes the resolved-header cache.
    ///
    /// Filters `headings` to the depths `range` admits, records the
    /// survivors in the cache, then nests them: the first heading roots the
    /// forest, and every later heading scans backward for the first earlier
    /// heading with a strictly smaller level. A heading with no such
    /// ancestor becomes a new root. Returns roots only.
    pub fn build_outline(&mut self, headings: &[Heading], range: OutlineRange) -> Vec<Heading> {
        let Some((lo, hi)) = range.bounds() else {
            self.resolved.clear();
            return Vec::new();
        };

        let mut nodes: Vec<Heading> = headings
            .iter()
            .filter(|h| h.level >= lo && h.level <= hi)
            .cloned()
            .collect();

        self.resolved.clear();
        for node in &nodes {
            self.resolved.push(ResolvedHeader {
                element: node.element,
                link: node.link.clone(),
            });
        }

        // Backward scan per node: the first earlier heading with a smaller
        // level claims this one. Depth gaps attach to the nearest real
        // ancestor, not to an intervening deeper sibling.
        let mut parent: Vec<Option<usize>> = vec![None; nodes.len()];
        for i in 1..nodes.len() {
            for j in (0..i).rev() {
                if nodes[j].level < nodes[i].level {
                    parent[i] = Some(j);
                    break;
                }
            }
        }

        // Materialise children back to front so each node is complete
        // before its parent absorbs it, preserving document order.
        let mut roots = Vec::new();
        while let Some(node) = nodes.pop() {
            match parent[nodes.len()] {
                Some(p) => nodes[p].children.insert(0, node),
                None => roots.insert(0, node),
            }
        }

        roots
    }
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
