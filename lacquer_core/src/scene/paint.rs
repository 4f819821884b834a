// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint ordering and the paint pass.

use alloc::vec;
use alloc::vec::Vec;

use super::store::Scene;
use crate::backend::Painter;
use crate::displayable::Displayable;
use crate::id::NodeId;
use crate::trace::{PaintNodeEvent, Tracer};

impl Scene {
    /// Returns every live node in paint order, bottom-most first.
    ///
    /// Nodes are sorted by `(z_level, z, z2)`; ties keep depth-first
    /// traversal order. Invisible nodes are included. Nodes serving as
    /// another node's clip path are not: they only shape hits and painting
    /// of the nodes they clip.
    #[must_use]
    pub fn display_list(&self) -> Vec<NodeId> {
        let mut order = if self.traversal_dirty {
            let mut fresh = Vec::new();
            self.collect_traversal(&mut fresh);
            fresh
        } else {
            self.traversal_order.clone()
        };
        let clips = self.clip_sources();
        order.retain(|&idx| !clips[idx as usize]);
        // Stable, so equal keys stay in traversal order.
        order.sort_by(|&a, &b| {
            let (a, b) = (self.node_at(a).paint_order(), self.node_at(b).paint_order());
            a.0.total_cmp(&b.0)
                .then(a.1.total_cmp(&b.1))
                .then(a.2.total_cmp(&b.2))
        });
        order.into_iter().map(|idx| self.id_at(idx)).collect()
    }

    /// Returns whether `id` is a clip path of some live node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[must_use]
    pub fn is_clip_source(&self, id: NodeId) -> bool {
        self.validate(id);
        self.clip_sources()[id.idx as usize]
    }

    /// Flags, per slot, the live nodes referenced as clip paths.
    fn clip_sources(&self) -> Vec<bool> {
        let mut marked = vec![false; self.nodes.len()];
        for clips in self.nodes.iter().flatten().filter_map(Displayable::clip_paths) {
            for &clip in clips {
                if self.is_alive(clip) {
                    marked[clip.idx as usize] = true;
                }
            }
        }
        marked
    }

    /// Returns the nodes to draw, bottom-most first: the display list
    /// without invisible nodes.
    #[must_use]
    pub fn paint_list(&self) -> Vec<NodeId> {
        let mut list = self.display_list();
        list.retain(|&id| !self.get(id).invisible());
        list
    }

    /// Draws the paint list with `painter`.
    ///
    /// Style-dirty nodes are resynced through [`Painter::sync_style`] first
    /// and their style-dirty flag is cleared. Each draw call is wrapped in
    /// the node's hook sequence (see
    /// [`Displayable::draw_with`](crate::displayable::Displayable::draw_with)).
    ///
    /// Returns the number of nodes drawn.
    pub fn paint(&mut self, painter: &mut dyn Painter, tracer: &mut Tracer<'_>) -> usize {
        let list = self.paint_list();
        let frame_index = self.frame_index;
        for &id in &list {
            let node = self.slot_mut(id);
            let restyled = node.is_style_dirty();
            if restyled {
                painter.sync_style(id, node);
                node.clear_style_dirty();
            }
            node.draw_with(|n| painter.draw(id, n));
            tracer.paint_node(&PaintNodeEvent {
                frame_index,
                node: id,
                restyled,
                culling: node.culling(),
            });
        }
        list.len()
    }
}
