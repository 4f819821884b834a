// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty tracking at two levels.
//!
//! # Per node
//!
//! [`DirtyState`] holds the node-local staleness: the style-dirty flag and
//! the cached bounding rectangle. An empty cache *is* the geometry-dirty
//! state; the next [`bounding_rect`](crate::displayable::Displayable::bounding_rect)
//! call recomputes it. Every style mutation sets the style-dirty flag and
//! empties the cache, even when the written value is unchanged.
//!
//! The two flags are cleared by different parties: the paint backend clears
//! style-dirty once it has resynced its style resources, while the generic
//! repaint flag on [`Element`](crate::element::Element) is cleared by the
//! scheduler in [`Scene::evaluate`](crate::scene::Scene::evaluate).
//!
//! # Per scene
//!
//! A [`Scene`](crate::scene::Scene) uses multi-channel dirty tracking (via
//! [`understory_dirty`]) to find which nodes need work:
//!
//! - **Propagating**: [`TRANSFORM`] is marked with
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has dependency edges
//!   from child to parent, since world transforms are inherited.
//! - **Local-only**: [`PAINT`] is marked for the changed node only.
//! - **Structural**: [`TOPOLOGY`] is marked on insert/remove/reparent and
//!   triggers a traversal-order rebuild.

use core::cell::Cell;

use kurbo::Rect;
use understory_dirty::Channel;

/// Placement changed; world transforms of the subtree need recomputing.
pub const TRANSFORM: Channel = Channel::new(0);

/// Node needs a repaint (style, attribute, or placement change).
pub const PAINT: Channel = Channel::new(1);

/// Tree topology changed; triggers a traversal-order rebuild.
pub const TOPOLOGY: Channel = Channel::new(2);

/// Node-local staleness: style-dirty flag and bounding-rect cache.
#[derive(Clone, Debug, Default)]
pub struct DirtyState {
    style: bool,
    bounds: Cell<Option<Rect>>,
}

impl DirtyState {
    /// Creates a clean state with an empty bounds cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks style resources stale and drops the cached bounds.
    pub fn mark_style(&mut self) {
        self.style = true;
        self.invalidate_bounds();
    }

    /// Returns whether style resources are stale.
    #[inline]
    #[must_use]
    pub fn is_style_dirty(&self) -> bool {
        self.style
    }

    /// Clears the style-dirty flag.
    #[inline]
    pub fn clear_style(&mut self) {
        self.style = false;
    }

    /// Drops the cached bounds.
    #[inline]
    pub fn invalidate_bounds(&mut self) {
        self.bounds.set(None);
    }

    /// Returns the cached bounds without computing anything.
    #[inline]
    #[must_use]
    pub fn cached_bounds(&self) -> Option<Rect> {
        self.bounds.get()
    }

    /// Returns whether the bounds cache is empty.
    #[inline]
    #[must_use]
    pub fn is_geometry_dirty(&self) -> bool {
        self.bounds.get().is_none()
    }

    /// Returns the cached bounds, filling the cache from `compute` if empty.
    ///
    /// Takes `&self`: populating a cache is not a mutation anybody observes.
    pub fn bounds_or_insert_with(&self, compute: impl FnOnce() -> Option<Rect>) -> Option<Rect> {
        if let Some(rect) = self.bounds.get() {
            return Some(rect);
        }
        let rect = compute();
        self.bounds.set(rect);
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_computed_once() {
        let state = DirtyState::new();
        let mut calls = 0;
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        for _ in 0..3 {
            let got = state.bounds_or_insert_with(|| {
                calls += 1;
                Some(rect)
            });
            assert_eq!(got, Some(rect));
        }
        assert_eq!(calls, 1, "cache should absorb repeat queries");
        assert!(!state.is_geometry_dirty());
    }

    #[test]
    fn mark_style_empties_cache() {
        let mut state = DirtyState::new();
        let _ = state.bounds_or_insert_with(|| Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
        state.mark_style();
        assert!(state.is_style_dirty());
        assert!(state.is_geometry_dirty());
        assert_eq!(state.cached_bounds(), None);
    }

    #[test]
    fn clearing_style_keeps_bounds_state() {
        let mut state = DirtyState::new();
        state.mark_style();
        state.clear_style();
        assert!(!state.is_style_dirty());
        assert!(state.is_geometry_dirty());
    }
}
