//! The core state machine bridging scanned documents and the interactive viewer.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated
//! as the user scrolls and navigates. One `DocumentState` is current at a
//! time; it owns the outline session, the rendered outline pane, and the
//! anchor tracker for that document, so switching documents tears the whole
//! set down together and a stale tracker can never touch a live pane.

use crate::anchor::{AnchorTracker, NavContainer, Tunables, Viewport};
use crate::formats::Format;
use crate::heading::{ElementId, Heading};
use crate::input::{self, ScannedDocument};
use crate::outline::{OutlineRange, OutlineSession};
use std::io;
use std::path::{Path, PathBuf};

#[derive(PartialEq)]
/// Determines navigation scope and quit behavior based on project size.
pub enum FileMode {
    /// Single-file mode quits directly to shell.
    Single,
    /// Multi-file mode returns to file list before quitting.
    Multi,
}

#[derive(PartialEq)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Displays available files for multi-file projects.
    FileList,
    /// Shows the document beside its outline.
    Document,
}

#[derive(Clone, Copy, PartialEq, Eq)]
/// Which pane receives navigation keys in the document view.
pub enum Focus {
    /// Keys scroll the document text.
    Document,
    /// Keys move the outline cursor.
    Outline,
}

/// One rendered outline anchor in the navigation pane.
pub struct NavEntry {
    /// Anchor link this entry navigates to.
    pub link: String,
    /// Display text.
    pub title: String,
    /// Nesting depth within the outline forest, zero for roots.
    pub depth: usize,
    /// Whether this entry carries the "active" decoration.
    pub active: bool,
}

#[derive(Default)]
/// The rendered navigation container: one anchor row per outline entry.
pub struct OutlinePane {
    /// Pre-order flattened outline entries, top to bottom.
    pub entries: Vec<NavEntry>,
}

impl OutlinePane {
    /// Rebuilds the anchor rows from an outline forest, dropping all
    /// decorations.
    pub fn rebuild(&mut self, outline: &[Heading]) {
        self.entries.clear();
        for root in outline {
            self.push_entry(root, 0);
        }
    }

    fn push_entry(&mut self, heading: &Heading, depth: usize) {
        self.entries.push(NavEntry {
            link: heading.link.clone(),
            title: heading.title.clone(),
            depth,
            active: false,
        });
        for child in &heading.children {
            self.push_entry(child, depth + 1);
        }
    }

    #[must_use]
    /// Row index of the currently decorated entry, if any.
    pub fn active_row(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.active)
    }
}

impl NavContainer for OutlinePane {
    fn anchor_top(&self, link: &str) -> Option<f64> {
        self.entries
            .iter()
            .position(|e| e.link == link)
            .map(row_offset)
    }

    fn mark_active(&mut self, link: &str) {
        for entry in &mut self.entries {
            if entry.link == link {
                entry.active = true;
            }
        }
    }

    fn clear_active(&mut self, link: &str) {
        for entry in &mut self.entries {
            if entry.link == link {
                entry.active = false;
            }
        }
    }
}

/// Snapshot of the document pane's geometry for one recomputation pass.
struct DocViewport<'a> {
    scroll_top: f64,
    viewport_height: f64,
    document_height: f64,
    heading_rows: &'a [usize],
}

impl Viewport for DocViewport<'_> {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn absolute_top(&self, element: ElementId) -> Option<f64> {
        self.heading_rows.get(element.0).copied().map(row_offset)
    }
}

#[allow(clippy::cast_precision_loss)]
/// Maps a text row to the tracker's offset coordinate space.
fn row_offset(row: usize) -> f64 {
    row as f64
}

/// Everything owned by the currently open document.
pub struct DocumentState {
    /// Source file backing this document.
    pub path: PathBuf,
    /// Document text, one entry per rendered row.
    pub lines: Vec<String>,
    /// Flat extracted headings in document order.
    pub headings: Vec<Heading>,
    /// Rendered row of each heading, indexed by element id.
    pub heading_rows: Vec<usize>,
    /// Outline forest for the navigation pane.
    pub outline: Vec<Heading>,
    /// Owns the resolved-header cache shared by builder and tracker.
    pub session: OutlineSession,
    /// Active-section tracker mounted on the outline pane.
    pub tracker: AnchorTracker,
    /// Rendered navigation anchors.
    pub nav: OutlinePane,
    /// Current scroll offset of the document pane, in rows.
    pub scroll: usize,
    /// Height of the document pane, updated on every draw.
    pub viewport_rows: usize,
    /// Cursor position in the outline pane.
    pub outline_cursor: usize,
    /// Fragment of the last navigation, the "current hash".
    pub hash: Option<String>,
}

impl DocumentState {
    /// Scans a file, builds its outline, and mounts a fresh tracker.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open(
        path: &Path,
        format: &impl Format,
        range: OutlineRange,
        tunables: Tunables,
        now: u64,
    ) -> io::Result<Self> {
        let scanned = input::scan_document(path, format)?;
        let ScannedDocument {
            path,
            source,
            headings,
            heading_rows,
        } = scanned;

        let mut session = OutlineSession::new();
        let outline = session.build_outline(&headings, range);
        let mut nav = OutlinePane::default();
        nav.rebuild(&outline);

        let mut tracker = AnchorTracker::new(tunables);
        tracker.mount(now);

        Ok(Self {
            path,
            lines: source.lines().map(str::to_owned).collect(),
            headings,
            heading_rows,
            outline,
            session,
            tracker,
            nav,
            scroll: 0,
            viewport_rows: 0,
            outline_cursor: 0,
            hash: None,
        })
    }

    #[must_use]
    /// Largest scroll offset that still shows a full viewport (or the last
    /// partial one).
    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_rows)
    }

    /// Scrolls the document by a signed number of rows and feeds the
    /// tracker one scroll event.
    pub fn scroll_by(&mut self, delta: isize, now: u64) {
        let target = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll.saturating_add(delta.unsigned_abs())
        };
        self.scroll_to(target, now);
    }

    /// Scrolls the document to an absolute row and feeds the tracker one
    /// scroll event.
    pub fn scroll_to(&mut self, row: usize, now: u64) {
        self.scroll = row.min(self.max_scroll());
        let viewport = DocViewport {
            scroll_top: row_offset(self.scroll),
            viewport_height: row_offset(self.viewport_rows),
            document_height: row_offset(self.lines.len()),
            heading_rows: &self.heading_rows,
        };
        self.tracker
            .on_scroll(now, &viewport, &self.session, &mut self.nav);
    }

    /// Runs any due deferred recomputation. Call once per turn of the
    /// event loop.
    pub fn poll(&mut self, now: u64) {
        let viewport = DocViewport {
            scroll_top: row_offset(self.scroll),
            viewport_height: row_offset(self.viewport_rows),
            document_height: row_offset(self.lines.len()),
            heading_rows: &self.heading_rows,
        };
        self.tracker
            .poll(now, &viewport, &self.session, &mut self.nav);
    }

    /// Navigates to the outline entry under the cursor.
    ///
    /// This is a route change: the document jumps to the heading's row and
    /// the tracker activates the target fragment directly, bypassing the
    /// scroll-proximity scan.
    pub fn jump_to_cursor(&mut self) {
        let Some(entry) = self.nav.entries.get(self.outline_cursor) else {
            return;
        };
        let link = entry.link.clone();
        if let Some(row) = self.row_of_link(&link) {
            self.scroll = row.min(self.max_scroll());
        }
        self.hash = Some(link.clone());
        self.tracker
            .on_content_updated(Some(&link), &mut self.nav);
    }

    /// Re-scans the file and rebuilds the outline in place.
    ///
    /// Treated as a content update: the tracker re-evaluates against the
    /// last navigated fragment rather than the scroll position.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be re-read or parsed.
    pub fn reload(
        &mut self,
        format: &impl Format,
        range: OutlineRange,
    ) -> io::Result<()> {
        let scanned = input::scan_document(&self.path, format)?;
        self.lines = scanned.source.lines().map(str::to_owned).collect();
        self.headings = scanned.headings;
        self.heading_rows = scanned.heading_rows;
        self.outline = self.session.build_outline(&self.headings, range);
        self.nav.rebuild(&self.outline);
        self.scroll = self.scroll.min(self.max_scroll());
        self.outline_cursor = self
            .outline_cursor
            .min(self.nav.entries.len().saturating_sub(1));

        let hash = self.hash.clone();
        self.tracker
            .on_content_updated(hash.as_deref(), &mut self.nav);
        Ok(())
    }

    /// Stops tracking before the document is dropped or replaced.
    pub fn unmount(&mut self) {
        self.tracker.unmount();
    }

    /// Row of the heading a link points at, if it still exists.
    fn row_of_link(&self, link: &str) -> Option<usize> {
        self.headings
            .iter()
            .find(|h| h.link == link)
            .and_then(|h| self.heading_rows.get(h.element.0).copied())
    }
}

/// Bridges scanned documents and the interactive viewer.
pub struct AppState {
    /// File paths available for viewing in multi-file mode.
    pub files: Vec<PathBuf>,
    /// Selected file in the file list view.
    pub current_file_index: usize,
    /// Controls navigation behavior and file list visibility.
    pub file_mode: FileMode,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// The currently open document, if any.
    pub document: Option<DocumentState>,
    /// Which pane receives navigation keys.
    pub focus: Focus,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Configured outline depth range.
    pub range: OutlineRange,
    /// Configured active-section tuning constants.
    pub tunables: Tunables,
}

impl AppState {
    #[must_use]
    /// Initialises application state and determines file mode.
    ///
    /// Single-file projects skip the file list and quit directly to shell,
    /// while multi-file projects show a file selector and return to it on
    /// 'q'.
    pub fn new(files: Vec<PathBuf>, range: OutlineRange, tunables: Tunables) -> Self {
        let file_mode = if files.len() == 1 {
            FileMode::Single
        } else {
            FileMode::Multi
        };
        let current_view = match file_mode {
            FileMode::Single => View::Document,
            FileMode::Multi => View::FileList,
        };

        Self {
            files,
            current_file_index: 0,
            file_mode,
            current_view,
            document: None,
            focus: Focus::Document,
            message: None,
            range,
            tunables,
        }
    }

    /// Opens the selected file as the current document.
    pub fn open_current(&mut self, format: &impl Format, now: u64) {
        if let Some(mut doc) = self.document.take() {
            doc.unmount();
        }
        match DocumentState::open(
            &self.files[self.current_file_index],
            format,
            self.range,
            self.tunables,
            now,
        ) {
            Ok(doc) => {
                self.document = Some(doc);
                self.current_view = View::Document;
                self.focus = Focus::Document;
                self.message = None;
            }
            Err(e) => {
                self.message = Some(format!("Error opening file: {e}"));
                self.current_view = View::FileList;
            }
        }
    }

    /// Closes the current document, unmounting its tracker.
    pub fn close_document(&mut self) {
        if let Some(mut doc) = self.document.take() {
            doc.unmount();
        }
        self.current_view = View::FileList;
    }

    /// Runs any due deferred recomputation for the open document.
    pub fn poll(&mut self, now: u64) {
        if let Some(doc) = self.document.as_mut() {
            doc.poll(now);
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
