//! The UI renders the application state into something visible and scrollable.
//!
//! The draw function dispatches based on the current view (file list or
//! document). The document view shows the text beside the outline pane,
//! with the active entry decorated and the marker glyph alongside it.

use crate::app_state::{AppState, Focus, View};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    match app.current_view {
        View::FileList => draw_file_list(f, app),
        View::Document => draw_document(f, app),
    }
}

fn draw_file_list(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let style = if i == app.current_file_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(path.display().to_string()).style(style)
        })
        .collect();

    let title = format!("Files ({})", app.files.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[0]);

    let help = "↑/↓: Navigate | Enter: Open | q: Quit";
    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, chunks[1]);
}

fn draw_document(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(38)])
        .split(chunks[0]);

    let focus = app.focus;
    let Some(doc) = app.document.as_mut() else {
        return;
    };

    // The viewport geometry the tracker reads comes from this draw.
    let doc_block = Block::default()
        .borders(Borders::ALL)
        .title(doc.path.display().to_string())
        .border_style(border_style(focus == Focus::Document));
    let doc_inner = doc_block.inner(panes[0]);
    doc.viewport_rows = usize::from(doc_inner.height);
    doc.scroll = doc.scroll.min(doc.max_scroll());

    let visible: Vec<Line> = doc
        .lines
        .iter()
        .skip(doc.scroll)
        .take(doc.viewport_rows)
        .map(|text| {
            if text.trim_start().starts_with('#') {
                Line::from(Span::styled(
                    text.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(text.clone())
            }
        })
        .collect();

    f.render_widget(doc_block, panes[0]);
    f.render_widget(Paragraph::new(visible), doc_inner);

    let marker = doc.tracker.marker();
    let items: Vec<ListItem> = doc
        .nav
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let glyph = if entry.active && marker.visible {
                "▍ "
            } else {
                "  "
            };
            let indent = "  ".repeat(entry.depth);
            let spans = vec![
                Span::styled(glyph.to_owned(), Style::default().fg(Color::Yellow)),
                Span::raw(indent),
                Span::raw(entry.title.clone()),
            ];

            let style = if entry.active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if focus == Focus::Outline && i == doc.outline_cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let outline_title = doc
        .tracker
        .active_link()
        .map_or_else(|| "Outline".to_owned(), |link| format!("Outline {link}"));
    let outline = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(outline_title)
            .border_style(border_style(focus == Focus::Outline)),
    );
    f.render_widget(outline, panes[1]);

    let help_text = app.message.clone().unwrap_or_else(|| match focus {
        Focus::Document => {
            "↑/↓/PgUp/PgDn/Home/End: Scroll | Tab: Outline | r: Reload | q: Back/Quit".to_owned()
        }
        Focus::Outline => "↑/↓: Navigate | Enter: Jump | Tab: Document | q: Back/Quit".to_owned(),
    });
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}
