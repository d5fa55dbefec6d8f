//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over different
//! document formats (markdown, org-mode, restructuredtext, etc.) by
//! providing tree-sitter queries that locate headings and their title text.

pub mod markdown;

/// Tree-sitter bindings for one document format.
pub trait Format {
    /// The tree-sitter grammar for this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every heading node in a document.
    fn heading_query(&self) -> &str;
    /// Query capturing the title text within a heading node.
    fn title_query(&self) -> &str;
}
