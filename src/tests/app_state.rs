use super::{AppState, DocumentState, FileMode, OutlinePane, View};
use crate::anchor::Tunables;
use crate::formats::markdown::MarkdownFormat;
use crate::heading::{ElementId, Heading};
use crate::outline::{OutlineRange, OutlineSession};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// A look-ahead of 2 rows keeps the proximity scan meaningful in a
/// 40-line fixture.
fn tight_tunables() -> Tunables {
    Tunables {
        look_ahead: 2.0,
        ..Tunables::default()
    }
}

/// 40 lines with headings at rows 0 (h1), 10 and 20 (h2).
fn fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut content = String::new();
    for i in 0..40 {
        match i {
            0 => content.push_str("# One\n"),
            10 => content.push_str("## Two\n"),
            20 => content.push_str("## Three\n"),
            _ => {
                content.push_str(&format!("line {i}\n"));
            }
        }
    }
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn open_fixture(file: &NamedTempFile) -> DocumentState {
    let mut doc = DocumentState::open(
        file.path(),
        &MarkdownFormat,
        OutlineRange::Deep,
        tight_tunables(),
        0,
    )
    .unwrap();
    doc.viewport_rows = 10;
    doc
}

#[test]
fn test_open_builds_outline_and_nav() {
    let file = fixture();
    let doc = open_fixture(&file);

    assert_eq!(doc.lines.len(), 40);
    assert_eq!(doc.heading_rows, vec![0, 10, 20]);
    assert_eq!(doc.headings.len(), 3);

    // Deep excludes the h1 title; the two h2s become roots.
    assert_eq!(doc.outline.len(), 2);
    assert_eq!(doc.session.resolved_headers().len(), 2);
    let links: Vec<&str> = doc.nav.entries.iter().map(|e| e.link.as_str()).collect();
    assert_eq!(links, vec!["#two", "#three"]);
}

#[test]
fn test_initial_pass_at_page_top_is_inactive() {
    let file = fixture();
    let mut doc = open_fixture(&file);

    doc.poll(0);
    assert_eq!(doc.tracker.active_link(), None);
    assert_eq!(doc.nav.active_row(), None);
}

#[test]
fn test_scrolling_moves_the_active_entry() {
    let file = fixture();
    let mut doc = open_fixture(&file);
    doc.poll(0);

    doc.scroll_to(11, 200);
    assert_eq!(doc.tracker.active_link(), Some("#two"));
    assert_eq!(doc.nav.active_row(), Some(0));
    assert!(doc.tracker.marker().visible);

    // Max scroll shows the final viewport: the bottom override activates
    // the last heading.
    doc.scroll_to(doc.max_scroll(), 400);
    assert_eq!(doc.tracker.active_link(), Some("#three"));

    doc.scroll_to(0, 600);
    assert_eq!(doc.tracker.active_link(), None);
}

#[test]
fn test_jump_to_outline_entry_is_a_route_change() {
    let file = fixture();
    let mut doc = open_fixture(&file);

    doc.outline_cursor = 1;
    doc.jump_to_cursor();

    assert_eq!(doc.scroll, 20);
    assert_eq!(doc.hash.as_deref(), Some("#three"));
    assert_eq!(doc.tracker.active_link(), Some("#three"));
    assert_eq!(doc.nav.active_row(), Some(1));
}

#[test]
fn test_reload_reevaluates_against_last_hash() {
    let file = fixture();
    let mut doc = open_fixture(&file);

    doc.outline_cursor = 0;
    doc.jump_to_cursor();
    assert_eq!(doc.hash.as_deref(), Some("#two"));

    let mut content = fs::read_to_string(file.path()).unwrap();
    content.push_str("## Four\n");
    fs::write(file.path(), content).unwrap();

    doc.reload(&MarkdownFormat, OutlineRange::Deep).unwrap();
    assert_eq!(doc.nav.entries.len(), 3);
    assert_eq!(doc.tracker.active_link(), Some("#two"));
}

#[test]
fn test_unmounted_tracker_ignores_scrolling() {
    let file = fixture();
    let mut doc = open_fixture(&file);

    doc.scroll_to(11, 200);
    assert_eq!(doc.tracker.active_link(), Some("#two"));

    doc.unmount();
    doc.scroll_to(doc.max_scroll(), 5000);
    assert_eq!(doc.scroll, 30, "the pane still scrolls");
    assert_eq!(
        doc.tracker.active_link(),
        Some("#two"),
        "the dead tracker leaves its state untouched"
    );
}

#[test]
fn test_outline_pane_depths_follow_nesting() {
    let headings: Vec<Heading> = [2, 3, 2]
        .iter()
        .enumerate()
        .map(|(i, &level)| Heading::new(level, format!("h{i}"), format!("h{i}"), ElementId(i)))
        .collect();
    let mut session = OutlineSession::new();
    let forest = session.build_outline(&headings, OutlineRange::Deep);

    let mut pane = OutlinePane::default();
    pane.rebuild(&forest);

    let depths: Vec<usize> = pane.entries.iter().map(|e| e.depth).collect();
    assert_eq!(depths, vec![0, 1, 0]);
}

#[test]
fn test_single_file_skips_file_list() {
    let file = fixture();
    let app = AppState::new(
        vec![file.path().to_path_buf()],
        OutlineRange::Deep,
        tight_tunables(),
    );
    assert!(app.file_mode == FileMode::Single);
    assert!(app.current_view == View::Document);
}

#[test]
fn test_open_and_close_document() {
    let file_a = fixture();
    let file_b = fixture();
    let mut app = AppState::new(
        vec![file_a.path().to_path_buf(), file_b.path().to_path_buf()],
        OutlineRange::Deep,
        tight_tunables(),
    );
    assert!(app.current_view == View::FileList);

    app.open_current(&MarkdownFormat, 0);
    assert!(app.document.is_some());
    assert!(app.current_view == View::Document);

    app.close_document();
    assert!(app.document.is_none());
    assert!(app.current_view == View::FileList);
}
