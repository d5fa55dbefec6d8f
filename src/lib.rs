//! lodestar: scroll-synchronized outline navigation for markdown documents.
//!
//! Two cooperating pieces sit at the core: the outline builder
//! ([`outline`]) turns a flat, leveled heading sequence into a forest and
//! refreshes the resolved-header cache, and the anchor tracker ([`anchor`])
//! watches scroll position to keep exactly one outline link active. The
//! remaining modules are the host around them: document scanning
//! ([`input`], [`formats`]), throttle-and-debounce scheduling
//! ([`schedule`]), configuration ([`config`]), and the TUI ([`app_state`],
//! [`ui`]).

pub mod anchor;
pub mod app_state;
pub mod config;
pub mod formats;
pub mod heading;
pub mod input;
pub mod outline;
pub mod schedule;
pub mod ui;
