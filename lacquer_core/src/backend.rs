// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint backend contract.
//!
//! The core never paints. A backend (canvas, SVG, GPU) implements
//! [`Painter`] and is driven by [`Scene::paint`](crate::scene::Scene::paint),
//! which walks the paint list in order and, for each node:
//!
//! 1. calls [`Painter::sync_style`] if the node's style resources are stale,
//!    then clears the node's style-dirty flag;
//! 2. runs the draw hook sequence around [`Painter::draw`].
//!
//! A backend that keeps retained objects (an SVG `<path>`, a GPU buffer) can
//! store its own id in the node's
//! [`backend_handle`](crate::displayable::Displayable::backend_handle) slot
//! and use [`FrameChanges`](crate::scene::FrameChanges) to skip clean nodes.
//!
//! ```rust,ignore
//! fn on_frame(scene: &mut Scene, painter: &mut CanvasPainter) {
//!     // Animate: write styles, placements.
//!     scene.update(node, |n| n.set_style("opacity", 0.5));
//!
//!     // Evaluate: drain dirty channels, recompute world transforms.
//!     let changes = scene.evaluate();
//!
//!     // Paint: resync stale styles, draw in paint order.
//!     if !changes.repaint.is_empty() {
//!         scene.paint(painter, &mut Tracer::none());
//!     }
//! }
//! ```

use crate::displayable::Displayable;
use crate::id::NodeId;

/// Draws nodes onto a backend surface.
pub trait Painter {
    /// Rebuilds backend resources derived from the node's style (gradients,
    /// fonts, dash patterns).
    ///
    /// Called only when the node is style-dirty, right before
    /// [`draw`](Self::draw).
    fn sync_style(&mut self, id: NodeId, node: &Displayable) {
        _ = (id, node);
    }

    /// Draws one node. Its world transform is
    /// `node.element().world_transform()`.
    fn draw(&mut self, id: NodeId, node: &Displayable);
}
