// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-level hit testing.
//!
//! The display list is walked top-most first. A node is hit when its own
//! [`hit`](crate::displayable::Displayable::hit) test passes and the point
//! lies inside every clip path of the node and of all its ancestors. Clip
//! paths are tested with their node's
//! [`contains`](crate::displayable::Displayable::contains); handles of
//! removed clip nodes are skipped.
//!
//! Invisible nodes take part: invisibility only affects painting. Clip
//! nodes themselves never hit, since they are left out of the display list.
//! World transforms are those of the last [`evaluate`](Scene::evaluate).

use kurbo::Point;

use super::store::Scene;
use super::traverse::Ancestry;
use crate::id::NodeId;
use crate::trace::{HitTestEvent, Tracer, count};

impl Scene {
    /// Returns the top-most node hit by the world-space `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.hit_test_traced(point, &mut Tracer::none())
    }

    /// Like [`hit_test`](Self::hit_test), emitting a [`HitTestEvent`] to
    /// `tracer`.
    #[must_use]
    pub fn hit_test_traced(&self, point: Point, tracer: &mut Tracer<'_>) -> Option<NodeId> {
        let list = self.display_list();
        let mut tested = 0;
        let mut hit = None;
        for &id in list.iter().rev() {
            tested += 1;
            if self.get(id).hit(point) && self.is_unclipped(id, point) {
                hit = Some(id);
                break;
            }
        }
        tracer.hit_test(&HitTestEvent {
            frame_index: self.frame_index,
            point,
            tested: count(tested),
            hit,
        });
        hit
    }

    /// Returns whether `point` survives every clip path on the way from `id`
    /// up to its root.
    #[must_use]
    pub fn is_unclipped(&self, id: NodeId, point: Point) -> bool {
        self.validate(id);
        Ancestry::new(self, id.idx).all(|idx| {
            self.node_at(idx).clip_paths().is_none_or(|clips| {
                clips
                    .iter()
                    .filter_map(|&clip| self.try_get(clip))
                    .all(|clip| clip.contains(point))
            })
        })
    }
}
