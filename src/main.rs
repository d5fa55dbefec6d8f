//! lodestar: a scroll-synchronized outline viewer for markdown.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use lodestar::{app_state, config, formats, input, outline, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "lodestar")]
#[command(about = "Scroll-synchronized outline navigation for markdown", long_about = None)]
struct Args {
    /// Files or directories to view
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Outline depth range: "false", "deep", a depth, or "lo-hi"
    #[arg(long)]
    outline: Option<String>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Print each document's outline as JSON instead of opening the TUI
    #[arg(long)]
    dump_outline: bool,
}

#[derive(Serialize)]
/// JSON surface for `--dump-outline`: one record per scanned file.
struct OutlineDump {
    file: String,
    outline: Vec<lodestar::heading::Heading>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if let Some(range) = args.outline {
        cfg.outline = range;
    }

    let documents = input::find_documents(args.paths, &cfg.file_extensions)?;

    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    if args.dump_outline {
        return dump_outlines(&documents, &cfg);
    }

    let state = app_state::AppState::new(documents, cfg.outline_range(), cfg.tunables());
    run_tui(state)
}

fn dump_outlines(documents: &[PathBuf], cfg: &config::Config) -> io::Result<()> {
    let format = formats::markdown::MarkdownFormat;
    let range = cfg.outline_range();
    let mut dumps = Vec::new();

    for path in documents {
        let scanned = input::scan_document(path, &format)?;
        let mut session = outline::OutlineSession::new();
        let forest = session.build_outline(&scanned.headings, range);
        dumps.push(OutlineDump {
            file: scanned.path.display().to_string(),
            outline: forest,
        });
    }

    let json = serde_json::to_string_pretty(&dumps).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

fn run_tui(mut app: app_state::AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Milliseconds elapsed since the loop started, the tracker's clock.
fn ticks(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[allow(clippy::too_many_lines)]
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> io::Result<()> {
    let format = formats::markdown::MarkdownFormat;
    let start = Instant::now();

    if app.file_mode == app_state::FileMode::Single {
        app.open_current(&format, ticks(start));
    }

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(25))? {
            if let Event::Key(key) = event::read()? {
                let now = ticks(start);
                match app.current_view {
                    app_state::View::FileList => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Up => {
                            if app.current_file_index > 0 {
                                app.current_file_index -= 1;
                            }
                        }
                        KeyCode::Down => {
                            if app.current_file_index < app.files.len() - 1 {
                                app.current_file_index += 1;
                            }
                        }
                        KeyCode::Enter => {
                            app.open_current(&format, now);
                        }
                        _ => {}
                    },
                    app_state::View::Document => match key.code {
                        KeyCode::Char('q') => {
                            app.close_document();
                            if app.file_mode == app_state::FileMode::Single {
                                return Ok(());
                            }
                        }
                        KeyCode::Tab => {
                            app.focus = match app.focus {
                                app_state::Focus::Document => app_state::Focus::Outline,
                                app_state::Focus::Outline => app_state::Focus::Document,
                            };
                        }
                        KeyCode::Char('r') => {
                            let range = app.range;
                            if let Some(doc) = app.document.as_mut() {
                                match doc.reload(&format, range) {
                                    Ok(()) => app.message = Some("Reloaded".to_owned()),
                                    Err(e) => {
                                        app.message = Some(format!("Error reloading: {e}"));
                                    }
                                }
                            }
                        }
                        KeyCode::Up => match app.focus {
                            app_state::Focus::Document => {
                                if let Some(doc) = app.document.as_mut() {
                                    doc.scroll_by(-1, now);
                                }
                            }
                            app_state::Focus::Outline => {
                                if let Some(doc) = app.document.as_mut() {
                                    doc.outline_cursor = doc.outline_cursor.saturating_sub(1);
                                }
                            }
                        },
                        KeyCode::Down => match app.focus {
                            app_state::Focus::Document => {
                                if let Some(doc) = app.document.as_mut() {
                                    doc.scroll_by(1, now);
                                }
                            }
                            app_state::Focus::Outline => {
                                if let Some(doc) = app.document.as_mut() {
                                    if doc.outline_cursor + 1 < doc.nav.entries.len() {
                                        doc.outline_cursor += 1;
                                    }
                                }
                            }
                        },
                        KeyCode::PageUp => {
                            if let Some(doc) = app.document.as_mut() {
                                let page = isize::try_from(doc.viewport_rows).unwrap_or(isize::MAX);
                                doc.scroll_by(-page, now);
                            }
                        }
                        KeyCode::PageDown => {
                            if let Some(doc) = app.document.as_mut() {
                                let page = isize::try_from(doc.viewport_rows).unwrap_or(isize::MAX);
                                doc.scroll_by(page, now);
                            }
                        }
                        KeyCode::Home => {
                            if let Some(doc) = app.document.as_mut() {
                                doc.scroll_to(0, now);
                            }
                        }
                        KeyCode::End => {
                            if let Some(doc) = app.document.as_mut() {
                                let bottom = doc.max_scroll();
                                doc.scroll_to(bottom, now);
                            }
                        }
                        KeyCode::Enter => {
                            if app.focus == app_state::Focus::Outline {
                                if let Some(doc) = app.document.as_mut() {
                                    doc.jump_to_cursor();
                                }
                            }
                        }
                        _ => {}
                    },
                }
            }
        }

        app.poll(ticks(start));
    }
}
