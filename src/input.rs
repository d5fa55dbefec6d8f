//! Document scanning: file discovery and heading extraction.
//!
//! This is the document structure provider: it walks the given paths for
//! matching files and reads each one into a flat, document-ordered heading
//! sequence via tree-sitter. Slugs are derived here, GitHub-style, with
//! duplicate titles suffixed `-1`, `-2`, and so on, so anchor links are
//! unique within a document. Headings with no usable title never leave
//! this module.

use crate::formats::Format;
use crate::heading::{ElementId, Heading};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// One parsed file: its text plus the headings found in it.
pub struct ScannedDocument {
    /// Source file this document was read from.
    pub path: PathBuf,
    /// Full file contents, the "rendered" document the viewport scrolls.
    pub source: String,
    /// Flat heading sequence in document order. `Heading::element` indexes
    /// into `heading_rows`.
    pub headings: Vec<Heading>,
    /// Zero-based source row of each heading, indexed by element id.
    pub heading_rows: Vec<usize>,
}

/// Collects files matching the extension filter from the given paths.
///
/// Files are taken as-is; directories are walked recursively. Results keep
/// the order paths were given in, with directory contents sorted.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_files(&path, extensions, &mut documents)?;
        } else if matches_extension(&path, extensions) {
            documents.push(path);
        }
    }
    Ok(documents)
}

fn collect_files(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for entry in entries {
        if entry.is_dir() {
            collect_files(&entry, extensions, out)?;
        } else if matches_extension(&entry, extensions) {
            out.push(entry);
        }
    }
    Ok(())
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

/// Reads one file and extracts its flat heading sequence.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the format's grammar or
/// queries fail to load.
pub fn scan_document(path: &Path, format: &impl Format) -> io::Result<ScannedDocument> {
    let source = fs::read_to_string(path)?;
    let language = format.language();

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "parse failed"))?;

    let heading_query = Query::new(&language, format.heading_query())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    let title_query = Query::new(&language, format.title_query())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let mut headings = Vec::new();
    let mut heading_rows = Vec::new();
    let mut seen_slugs: HashMap<String, usize> = HashMap::new();

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&heading_query, tree.root_node(), source.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let Some(level) = heading_level(node) else {
                continue;
            };
            let Some(raw_title) = title_text(node, &title_query, &source) else {
                continue;
            };
            let title = clean_title(&raw_title);
            if title.is_empty() {
                continue;
            }
            let slug = unique_slug(&title, &mut seen_slugs);
            let element = ElementId(headings.len());
            heading_rows.push(node.start_position().row);
            headings.push(Heading::new(level, title, slug, element));
        }
    }

    Ok(ScannedDocument {
        path: path.to_path_buf(),
        source,
        headings,
        heading_rows,
    })
}

/// Reads the heading depth from the ATX marker child (`atx_h3_marker` -> 3).
fn heading_level(node: Node) -> Option<usize> {
    let mut walk = node.walk();
    for child in node.children(&mut walk) {
        if let Some(rest) = child.kind().strip_prefix("atx_h") {
            if let Some(digit) = rest.strip_suffix("_marker") {
                if let Ok(level) = digit.parse() {
                    return Some(level);
                }
            }
        }
    }
    None
}

/// Captures the inline title text within one heading node.
fn title_text(node: Node, query: &Query, source: &str) -> Option<String> {
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, node, source.as_bytes());
    while let Some(m) = matches.next() {
        if let Some(capture) = m.captures.first() {
            return source.get(capture.node.byte_range()).map(str::to_owned);
        }
    }
    None
}

/// Strips inline decorations from raw heading text.
///
/// Inline HTML tags are removed, which drops self-closing badge components
/// wholly while keeping the inner text of paired tags. Code-span backticks
/// are removed and whitespace is collapsed.
fn clean_title(raw: &str) -> String {
    let mut out = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '<' => {
                for inner in chars.by_ref() {
                    if inner == '>' {
                        break;
                    }
                }
            }
            '`' => {}
            _ => out.push(c),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derives a GitHub-style slug, disambiguating repeats with `-N` suffixes.
fn unique_slug(title: &str, seen: &mut HashMap<String, usize>) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if matches!(c, ' ' | '-' | '_') {
            slug.push('-');
        }
    }
    if slug.is_empty() {
        slug.push_str("section");
    }

    let count = seen.entry(slug.clone()).or_insert(0);
    let unique = if *count == 0 {
        slug.clone()
    } else {
        format!("{slug}-{count}")
    };
    *count += 1;
    unique
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
