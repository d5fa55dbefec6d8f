//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a lodestar.toml, and if present we load
//! settings from there. This provides the outline depth range, file
//! extension preferences, and every active-section tuning constant.

use crate::anchor::Tunables;
use crate::outline::OutlineRange;
use facet::Facet;
use std::fs;

#[derive(Facet, Clone)]
/// User preferences loaded from lodestar.toml or falling back to defaults.
pub struct Config {
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = "2".to_string())]
    /// Outline depth range: `"false"`, `"deep"`, a depth, or a `lo-hi` band.
    pub outline: String,
    #[facet(default = 144.0)]
    /// Look-ahead distance below the viewport top for active detection.
    pub look_ahead: f64,
    #[facet(default = 1.0)]
    /// Tolerance for treating a scroll position as page top or bottom.
    pub edge_tolerance: f64,
    #[facet(default = 39.0)]
    /// Marker offset added to the active anchor's top.
    pub marker_active_offset: f64,
    #[facet(default = 33.0)]
    /// Marker resting offset while hidden.
    pub marker_rest_offset: f64,
    #[facet(default = 100)]
    /// Throttle-and-debounce window for scroll recomputation, in
    /// milliseconds.
    pub scroll_window: u64,
}

impl Config {
    #[must_use]
    /// Load configuration from lodestar.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("lodestar.toml") {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }

    #[must_use]
    /// The configured outline depth range.
    pub fn outline_range(&self) -> OutlineRange {
        OutlineRange::parse(&self.outline)
    }

    #[must_use]
    /// The configured active-section tuning constants.
    pub fn tunables(&self) -> Tunables {
        Tunables {
            look_ahead: self.look_ahead,
            edge_tolerance: self.edge_tolerance,
            marker_active_offset: self.marker_active_offset,
            marker_rest_offset: self.marker_rest_offset,
            scroll_window: self.scroll_window,
        }
    }
}
