use super::{OutlineRange, OutlineSession};
use crate::heading::{ElementId, Heading};

fn headings(levels: &[usize]) -> Vec<Heading> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| Heading::new(level, format!("h{i}"), format!("h{i}"), ElementId(i)))
        .collect()
}

fn count(forest: &[Heading]) -> usize {
    forest.iter().map(|h| 1 + count(&h.children)).sum()
}

fn preorder(forest: &[Heading], out: &mut Vec<String>) {
    for h in forest {
        out.push(h.slug.clone());
        preorder(&h.children, out);
    }
}

#[test]
fn test_full_range_preserves_count_and_order() {
    let input = headings(&[1, 3, 2, 4, 2, 6, 5]);
    let mut session = OutlineSession::new();
    let forest = session.build_outline(&input, OutlineRange::Band(1, 6));

    assert_eq!(count(&forest), input.len());

    let mut flattened = Vec::new();
    preorder(&forest, &mut flattened);
    let expected: Vec<String> = input.iter().map(|h| h.slug.clone()).collect();
    assert_eq!(flattened, expected, "pre-order must match document order");
}

#[test]
fn test_skipped_depth_attaches_to_nearest_ancestor() {
    // h2, h4, h3: both the h4 and the h3 belong to the h2. The h3's
    // nearest smaller-level ancestor is the h2, not the h4.
    let input = headings(&[2, 4, 3]);
    let mut session = OutlineSession::new();
    let forest = session.build_outline(&input, OutlineRange::Band(1, 6));

    assert_eq!(forest.len(), 1);
    let root = &forest[0];
    assert_eq!(root.level, 2);
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].level, 4);
    assert_eq!(root.children[1].level, 3);
    assert!(root.children[0].children.is_empty());
}

#[test]
fn test_single_depth_band_yields_flat_roots() {
    let input = headings(&[1, 2, 3, 2, 1, 2]);
    let mut session = OutlineSession::new();
    let forest = session.build_outline(&input, OutlineRange::Band(2, 2));

    assert_eq!(forest.len(), 3);
    for root in &forest {
        assert_eq!(root.level, 2);
        assert!(root.children.is_empty());
    }
}

#[test]
fn test_disabled_range_clears_cache() {
    let input = headings(&[1, 2, 3]);
    let mut session = OutlineSession::new();

    let forest = session.build_outline(&input, OutlineRange::Band(1, 6));
    assert!(!forest.is_empty());
    assert_eq!(session.resolved_headers().len(), 3);

    let forest = session.build_outline(&input, OutlineRange::Disabled);
    assert!(forest.is_empty());
    assert!(
        session.resolved_headers().is_empty(),
        "disabling the outline must clear the previous cache"
    );
}

#[test]
fn test_empty_input() {
    let mut session = OutlineSession::new();
    let forest = session.build_outline(&[], OutlineRange::Band(1, 6));
    assert!(forest.is_empty());
    assert!(session.resolved_headers().is_empty());
}

#[test]
fn test_identical_levels_stay_flat() {
    let input = headings(&[3, 3, 3, 3]);
    let mut session = OutlineSession::new();
    let forest = session.build_outline(&input, OutlineRange::Band(1, 6));

    assert_eq!(forest.len(), 4);
    assert!(forest.iter().all(|h| h.children.is_empty()));
}

#[test]
fn test_range_excluding_everything_empties_cache() {
    let input = headings(&[2, 3, 4]);
    let mut session = OutlineSession::new();

    session.build_outline(&input, OutlineRange::Deep);
    assert_eq!(session.resolved_headers().len(), 3);

    let forest = session.build_outline(&input, OutlineRange::Band(5, 6));
    assert!(forest.is_empty());
    assert!(session.resolved_headers().is_empty());
}

#[test]
fn test_cache_holds_filtered_document_order() {
    let input = headings(&[1, 2, 4, 2, 5]);
    let mut session = OutlineSession::new();
    session.build_outline(&input, OutlineRange::Deep);

    let links: Vec<&str> = session
        .resolved_headers()
        .iter()
        .map(|h| h.link.as_str())
        .collect();
    assert_eq!(links, vec!["#h1", "#h2", "#h3", "#h4"]);
    assert_eq!(session.resolved_headers()[0].element, ElementId(1));
}

#[test]
fn test_deep_is_two_to_six() {
    let input = headings(&[1, 2, 6]);
    let mut session = OutlineSession::new();
    let forest = session.build_outline(&input, OutlineRange::Deep);

    assert_eq!(count(&forest), 2);
    assert_eq!(forest[0].level, 2);
}

#[test]
fn test_range_parsing() {
    assert_eq!(OutlineRange::parse("false"), OutlineRange::Disabled);
    assert_eq!(OutlineRange::parse("deep"), OutlineRange::Deep);
    assert_eq!(OutlineRange::parse("3"), OutlineRange::Level(3));
    assert_eq!(OutlineRange::parse("2-4"), OutlineRange::Band(2, 4));
    assert_eq!(OutlineRange::parse(" 2-4 "), OutlineRange::Band(2, 4));
    assert_eq!(OutlineRange::parse("garbage"), OutlineRange::Level(2));
    assert_eq!(OutlineRange::default(), OutlineRange::Level(2));
}
