// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for scene frames.
//!
//! [`TraceSink`] has one method per event the scene emits while evaluating,
//! painting, and hit testing. All method bodies default to no-ops, so a sink
//! implements only the events it cares about.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! The core has no clock, so events carry the scene's frame counter (see
//! [`Scene::frame_index`](crate::scene::Scene::frame_index)) instead of
//! timestamps.

use kurbo::Point;

use crate::id::NodeId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted at the end of [`Scene::evaluate_traced`](crate::scene::Scene::evaluate_traced).
///
/// Counts mirror the lengths of the corresponding
/// [`FrameChanges`](crate::scene::FrameChanges) lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvaluateEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Nodes whose world transform was recomputed.
    pub transforms: u32,
    /// Nodes that need a repaint.
    pub repaint: u32,
    /// Repainted nodes whose style resources are stale.
    pub restyle: u32,
    /// Nodes inserted since the previous evaluate.
    pub added: u32,
    /// Nodes removed since the previous evaluate.
    pub removed: u32,
    /// Whether the traversal order was rebuilt.
    pub topology_changed: bool,
}

/// Emitted once per node drawn by [`Scene::paint`](crate::scene::Scene::paint).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintNodeEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// The node that was drawn.
    pub node: NodeId,
    /// Whether the painter was asked to resync style resources first.
    pub restyled: bool,
    /// Whether the node allows off-screen culling.
    pub culling: bool,
}

/// Emitted by [`Scene::hit_test_traced`](crate::scene::Scene::hit_test_traced).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitTestEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Query point in world space.
    pub point: Point,
    /// Nodes tested before the walk stopped.
    pub tested: u32,
    /// The top-most node hit, if any.
    pub hit: Option<NodeId>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a [`Scene`](crate::scene::Scene).
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after an evaluate pass.
    fn on_evaluate(&mut self, e: &EvaluateEvent) {
        _ = e;
    }

    /// Called after a node is drawn.
    fn on_paint_node(&mut self, e: &PaintNodeEvent) {
        _ = e;
    }

    /// Called after a hit test.
    fn on_hit_test(&mut self, e: &HitTestEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`EvaluateEvent`].
    #[inline]
    pub fn evaluate(&mut self, e: &EvaluateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_evaluate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PaintNodeEvent`].
    #[inline]
    pub fn paint_node(&mut self, e: &PaintNodeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_paint_node(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HitTestEvent`].
    #[inline]
    pub fn hit_test(&mut self, e: &HitTestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_hit_test(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

/// Saturating length conversion for event counts.
pub(crate) fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
