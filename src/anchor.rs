//! Scroll-synchronized tracking of the active outline entry.
//!
//! A tracker watches one scrollable document and keeps exactly one outline
//! link "active", moving a visual marker alongside it. Scroll events are
//! throttled-and-debounced; route changes bypass the scroll math and
//! activate the navigation target's fragment directly. The tracker reads
//! the session's resolved-header cache and never looks at the outline's
//! tree shape: active-section detection only needs a flat, position-ordered
//! list.

use crate::heading::ElementId;
use crate::outline::OutlineSession;
use crate::schedule::ThrottleDebounce;

/// Position source for the scrollable document being tracked.
///
/// All reads happen synchronously at recomputation time; nothing is cached
/// between passes. `absolute_top` may fail for a heading that is currently
/// unreachable (detached or re-laid-out); that heading is excluded from the
/// pass, not from the cache, and is re-evaluated next time.
pub trait Viewport {
    /// Current scroll offset from the top of the document.
    fn scroll_top(&self) -> f64;
    /// Height of the visible region.
    fn viewport_height(&self) -> f64;
    /// Full height of the document.
    fn document_height(&self) -> f64;
    /// Absolute top offset of a heading's rendered node, if reachable.
    fn absolute_top(&self, element: ElementId) -> Option<f64>;
}

/// Rendered navigation container holding one anchor per outline link.
pub trait NavContainer {
    /// Vertical offset of the anchor matching `link` exactly, if present.
    fn anchor_top(&self, link: &str) -> Option<f64>;
    /// Applies the "active" decoration to the anchor matching `link`.
    fn mark_active(&mut self, link: &str);
    /// Removes the "active" decoration from the anchor matching `link`.
    fn clear_active(&mut self, link: &str);
}

#[derive(Clone, Copy, PartialEq, Debug)]
/// Position and visibility of the active-entry indicator.
pub struct Marker {
    /// Vertical offset of the marker within the navigation container.
    pub top: f64,
    /// Whether the marker is shown at all.
    pub visible: bool,
}

#[derive(Clone, Copy, Debug)]
/// UI-tuning constants for active-section detection and marker placement.
///
/// These are behavioral knobs, not invariants; the defaults reproduce the
/// values this tracker was tuned with and can be overridden from config.
pub struct Tunables {
    /// How far below the viewport top a heading may sit and still count as
    /// entered, roughly "viewport top plus sticky-header height".
    pub look_ahead: f64,
    /// Distance from the document's very top or bottom that still counts
    /// as being at that edge.
    pub edge_tolerance: f64,
    /// Marker offset added to the active anchor's top.
    pub marker_active_offset: f64,
    /// Marker resting offset while hidden.
    pub marker_rest_offset: f64,
    /// Throttle-and-debounce window for scroll recomputation, in ticks.
    pub scroll_window: u64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            look_ahead: 144.0,
            edge_tolerance: 1.0,
            marker_active_offset: 39.0,
            marker_rest_offset: 33.0,
            scroll_window: 100,
        }
    }
}

/// Maintains the single active outline link for one mounted container.
///
/// Starts inactive; `mount` arms one deferred initial pass and `unmount`
/// cancels anything pending, after which every entry point is a no-op. No
/// tracker state survives unmount.
pub struct AnchorTracker {
    tunables: Tunables,
    schedule: ThrottleDebounce,
    prev_active_link: Option<String>,
    marker: Marker,
    mounted: bool,
}

impl AnchorTracker {
    #[must_use]
    /// Creates an unmounted tracker with the given tuning.
    pub fn new(tunables: Tunables) -> Self {
        let marker = Marker {
            top: tunables.marker_rest_offset,
            visible: false,
        };
        Self {
            tunables,
            schedule: ThrottleDebounce::new(tunables.scroll_window),
            prev_active_link: None,
            marker,
            mounted: false,
        }
    }

    #[must_use]
    /// The currently active link, if any.
    pub fn active_link(&self) -> Option<&str> {
        self.prev_active_link.as_deref()
    }

    #[must_use]
    /// Current marker position and visibility.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Starts tracking: installs state and defers the first recomputation
    /// to the next poll, mirroring a next-paint callback.
    pub fn mount(&mut self, now: u64) {
        self.mounted = true;
        self.schedule.force(now);
    }

    /// Stops tracking and cancels any pending recomputation.
    ///
    /// A deferred run that would have fired after this point never runs;
    /// marker and decoration state are left untouched.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.schedule.cancel();
    }

    /// Feeds one scroll event at `now`, recomputing immediately when the
    /// throttle window is clear.
    pub fn on_scroll(
        &mut self,
        now: u64,
        viewport: &impl Viewport,
        session: &OutlineSession,
        container: &mut impl NavContainer,
    ) {
        if !self.mounted {
            return;
        }
        if self.schedule.on_event(now) {
            self.set_active_link(viewport, session, container);
        }
    }

    /// Runs any due deferred recomputation (trailing debounce or the
    /// initial post-mount pass). Call once per turn of the host loop.
    pub fn poll(
        &mut self,
        now: u64,
        viewport: &impl Viewport,
        session: &OutlineSession,
        container: &mut impl NavContainer,
    ) {
        if self.schedule.poll(now) && self.mounted {
            self.set_active_link(viewport, session, container);
        }
    }

    /// Handles a route change: the active link comes straight from the
    /// navigation target's fragment, bypassing scroll math entirely.
    pub fn on_content_updated(&mut self, hash: Option<&str>, container: &mut impl NavContainer) {
        if !self.mounted {
            return;
        }
        self.activate_link(hash, container);
    }

    /// One scroll-driven pass over the resolved-header cache.
    fn set_active_link(
        &mut self,
        viewport: &impl Viewport,
        session: &OutlineSession,
        container: &mut impl NavContainer,
    ) {
        let scroll_top = viewport.scroll_top();
        let viewport_height = viewport.viewport_height();
        let document_height = viewport.document_height();
        let is_bottom =
            (scroll_top + viewport_height - document_height).abs() < self.tunables.edge_tolerance;

        // Headings may be repositioned or detached between passes; drop the
        // unreachable ones from this pass only and order the rest by offset.
        let mut headers: Vec<(&str, f64)> = session
            .resolved_headers()
            .iter()
            .filter_map(|h| {
                viewport
                    .absolute_top(h.element)
                    .map(|top| (h.link.as_str(), top))
            })
            .collect();
        headers.sort_by(|a, b| a.1.total_cmp(&b.1));

        if headers.is_empty() {
            self.activate_link(None, container);
            return;
        }

        // Page top overrides everything.
        if scroll_top < self.tunables.edge_tolerance {
            self.activate_link(None, container);
            return;
        }

        // Page bottom highlights the last heading regardless of proximity.
        if is_bottom {
            if let Some(&(link, _)) = headers.last() {
                let link = link.to_owned();
                self.activate_link(Some(&link), container);
            }
            return;
        }

        // Otherwise the last heading at or above the look-ahead line wins.
        let mut active_link: Option<String> = None;
        for (link, top) in headers {
            if top > scroll_top + self.tunables.look_ahead {
                break;
            }
            active_link = Some(link.to_owned());
        }
        self.activate_link(active_link.as_deref(), container);
    }

    /// Applies activation side effects shared by the scroll and route paths.
    fn activate_link(&mut self, link: Option<&str>, container: &mut impl NavContainer) {
        if let Some(prev) = self.prev_active_link.take() {
            container.clear_active(&prev);
        }

        if let Some(link) = link {
            if let Some(anchor_top) = container.anchor_top(link) {
                container.mark_active(link);
                self.prev_active_link = Some(link.to_owned());
                self.marker = Marker {
                    top: anchor_top + self.tunables.marker_active_offset,
                    visible: true,
                };
                return;
            }
        }

        self.marker = Marker {
            top: self.tunables.marker_rest_offset,
            visible: false,
        };
    }
}

#[cfg(test)]
#[path = "tests/anchor.rs"]
mod tests;
