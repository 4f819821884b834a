// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame evaluation and change tracking.
//!
//! Evaluation follows a drain-recompute pattern for each dirty channel:
//!
//! 1. **TRANSFORM**: drain dirty indices in parent-before-child order and
//!    refresh each node's world transform from its parent's. Every node
//!    whose world transform was refreshed also needs a repaint.
//! 2. **PAINT**: drain dirty indices, note which of them are style-dirty,
//!    and clear their generic dirty flag. The style-dirty flag stays set
//!    until the painter resyncs (see [`Scene::paint`]).
//! 3. **TOPOLOGY**: drain and discard (the traversal order was already
//!    rebuilt at the start of evaluation if needed).
//!
//! [`FrameChanges`] uses raw slot indices (`u32`) rather than
//! [`NodeId`](crate::id::NodeId) handles so that backends can index the
//! scene directly through [`Scene::node_at`].

use alloc::vec::Vec;

use kurbo::Affine;

use super::store::Scene;
use crate::dirty;
use crate::id::INVALID;
use crate::trace::{EvaluateEvent, Tracer, count};

/// The set of changes produced by a single [`Scene::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Nodes whose world transform was recomputed.
    pub transforms: Vec<u32>,
    /// Nodes that need a repaint.
    pub repaint: Vec<u32>,
    /// Subset of `repaint` whose style resources are stale.
    pub restyle: Vec<u32>,
    /// Nodes inserted since the last evaluate.
    pub added: Vec<u32>,
    /// Nodes removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.repaint.clear();
        self.restyle.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
            && self.repaint.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl Scene {
    /// Evaluates the scene, refreshing world transforms and returning the set
    /// of changes.
    pub fn evaluate(&mut self) -> FrameChanges {
        self.evaluate_traced(&mut Tracer::none())
    }

    /// Like [`evaluate`](Self::evaluate), emitting an
    /// [`EvaluateEvent`] to `tracer`.
    pub fn evaluate_traced(&mut self, tracer: &mut Tracer<'_>) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes, tracer);
        changes
    }

    /// Like [`evaluate_traced`](Self::evaluate_traced), but reuses a
    /// caller-provided buffer to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges, tracer: &mut Tracer<'_>) {
        changes.clear();
        self.frame_index += 1;

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        let dirty_transforms: Vec<u32> = self
            .dirty
            .drain(dirty::TRANSFORM)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_transforms {
            let p = self.parent[idx as usize];
            let parent_world = if p != INVALID {
                self.node_at(p).element().world_transform()
            } else {
                Affine::IDENTITY
            };
            if let Some(node) = self.nodes[idx as usize].as_mut() {
                node.element_mut().set_parent_world(parent_world);
                node.mark_dirty();
                changes.transforms.push(idx);
                self.dirty.mark(idx, dirty::PAINT);
            }
        }

        let dirty_paint: Vec<u32> = self
            .dirty
            .drain(dirty::PAINT)
            .deterministic()
            .run()
            .collect();
        for idx in dirty_paint {
            let Some(node) = self.nodes[idx as usize].as_mut() else {
                continue;
            };
            if node.is_style_dirty() {
                changes.restyle.push(idx);
            }
            node.element_mut().clear_dirty();
            changes.repaint.push(idx);
        }

        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);

        tracer.evaluate(&EvaluateEvent {
            frame_index: self.frame_index,
            transforms: count(changes.transforms.len()),
            repaint: count(changes.repaint.len()),
            restyle: count(changes.restyle.len()),
            added: count(changes.added.len()),
            removed: count(changes.removed.len()),
            topology_changed: changes.topology_changed,
        });
    }

    /// Returns the current traversal order (depth-first pre-order).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called at least
    /// once since the last topology change.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    fn rebuild_traversal_order(&mut self) {
        let mut order = core::mem::take(&mut self.traversal_order);
        order.clear();
        self.collect_traversal(&mut order);
        self.traversal_order = order;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::displayable::Displayable;
    use crate::options::DisplayableOptions;
    use crate::style::Style;
    use crate::testing::BoxKind;

    fn node() -> Displayable {
        Displayable::new(DisplayableOptions::new(), None).unwrap()
    }

    fn boxed() -> Displayable {
        Displayable::with_kind(
            BoxKind::default(),
            DisplayableOptions::new().style(Style::from_iter([("width", 10.0), ("height", 10.0)])),
            None,
        )
        .unwrap()
    }

    #[test]
    fn evaluate_computes_world_transforms() {
        let mut scene = Scene::new();
        let parent = scene.insert(node());
        let child = scene.insert(node());
        scene.update(parent, |n| n.element_mut().set_position(10.0, 0.0));
        scene.update(child, |n| n.element_mut().set_position(0.0, 5.0));
        scene.add_child(parent, child);

        let _ = scene.evaluate();

        assert_eq!(
            scene.get(child).element().world_transform(),
            Affine::translate((10.0, 5.0))
        );
    }

    #[test]
    fn moving_a_parent_moves_the_subtree() {
        let mut scene = Scene::new();
        let parent = scene.insert(node());
        let child = scene.insert(node());
        let grandchild = scene.insert(node());
        scene.add_child(parent, child);
        scene.add_child(child, grandchild);
        let _ = scene.evaluate();

        scene.update(parent, |n| n.element_mut().set_position(3.0, 4.0));
        let changes = scene.evaluate();

        assert!(changes.transforms.contains(&grandchild.index()));
        assert!(changes.repaint.contains(&grandchild.index()));
        let p = scene
            .get(grandchild)
            .element()
            .transform_point_to_world(Point::ORIGIN);
        assert_eq!(p, Point::new(3.0, 4.0));
    }

    #[test]
    fn detaching_resets_the_inherited_transform() {
        let mut scene = Scene::new();
        let parent = scene.insert(node());
        let child = scene.insert(node());
        scene.update(parent, |n| n.element_mut().set_position(5.0, 5.0));
        scene.add_child(parent, child);
        let _ = scene.evaluate();

        scene.remove_from_parent(child);
        let _ = scene.evaluate();
        assert_eq!(scene.get(child).element().world_transform(), Affine::IDENTITY);
    }

    #[test]
    fn first_evaluate_reports_everything() {
        let mut scene = Scene::new();
        let a = scene.insert(node());
        let b = scene.insert(node());
        let changes = scene.evaluate();
        assert!(changes.topology_changed);
        assert_eq!(changes.added, vec![a.index(), b.index()]);
        assert_eq!(changes.repaint, vec![a.index(), b.index()]);
        assert!(!scene.get(a).is_dirty());
    }

    #[test]
    fn no_change_evaluate_returns_empty() {
        let mut scene = Scene::new();
        let _ = scene.insert(node());
        let _ = scene.evaluate();
        let changes = scene.evaluate();
        assert!(changes.is_empty(), "got {changes:?}");
    }

    #[test]
    fn style_write_reports_restyle() {
        let mut scene = Scene::new();
        let id = scene.insert(boxed());
        let _ = scene.evaluate();
        scene.update(id, |n| n.clear_style_dirty());

        scene.update(id, |n| n.set_style("fill", "red"));
        let changes = scene.evaluate();
        assert_eq!(changes.repaint, vec![id.index()]);
        assert_eq!(changes.restyle, vec![id.index()]);
        assert!(changes.transforms.is_empty());
        assert!(!scene.get(id).is_dirty(), "evaluate clears the generic flag");
        assert!(scene.get(id).is_style_dirty(), "painter clears the style flag");
    }

    #[test]
    fn attribute_write_repaints_without_restyle() {
        let mut scene = Scene::new();
        let id = scene.insert(boxed());
        let _ = scene.evaluate();
        scene.update(id, |n| n.clear_style_dirty());

        scene.update(id, |n| n.set_z(2.0));
        let changes = scene.evaluate();
        assert_eq!(changes.repaint, vec![id.index()]);
        assert!(changes.restyle.is_empty());
    }

    #[test]
    fn read_only_update_marks_nothing() {
        let mut scene = Scene::new();
        let id = scene.insert(boxed());
        let _ = scene.evaluate();
        let hit = scene.update(id, |n| n.contains(Point::new(1.0, 1.0)));
        assert!(hit);
        assert!(scene.evaluate().is_empty());
    }

    #[test]
    fn style_animation_frame_is_routed() {
        let mut scene = Scene::new();
        let id = scene.insert(boxed());
        let _ = scene.evaluate();
        scene.update(id, |n| n.clear_style_dirty());

        scene.on_animation_frame(id, "style");
        let changes = scene.evaluate();
        assert_eq!(changes.restyle, vec![id.index()]);
    }

    #[test]
    fn removal_is_reported_once() {
        let mut scene = Scene::new();
        let id = scene.insert(node());
        let _ = scene.evaluate();
        let _ = scene.remove(id);
        let changes = scene.evaluate();
        assert_eq!(changes.removed, vec![id.index()]);
        assert!(changes.topology_changed);
        assert!(scene.evaluate().removed.is_empty());
    }

    #[test]
    fn traversal_is_depth_first_pre_order() {
        let mut scene = Scene::new();
        let root = scene.insert(node());
        let a = scene.insert(node());
        let b = scene.insert(node());
        let a1 = scene.insert(node());
        scene.add_child(root, a);
        scene.add_child(root, b);
        scene.add_child(a, a1);
        let _ = scene.evaluate();
        assert_eq!(
            scene.traversal_order(),
            &[root.index(), a.index(), a1.index(), b.index()]
        );
    }

    #[test]
    fn frame_index_counts_evaluations() {
        let mut scene = Scene::new();
        assert_eq!(scene.frame_index(), 0);
        let _ = scene.evaluate();
        let _ = scene.evaluate();
        assert_eq!(scene.frame_index(), 2);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn evaluate_traced_emits_counts() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Last(Option<EvaluateEvent>);
        impl TraceSink for Last {
            fn on_evaluate(&mut self, e: &EvaluateEvent) {
                self.0 = Some(*e);
            }
        }

        let mut scene = Scene::new();
        let _ = scene.insert(node());
        let _ = scene.insert(node());
        let mut sink = Last::default();
        let _ = scene.evaluate_traced(&mut Tracer::new(&mut sink));
        let e = sink.0.expect("event emitted");
        assert_eq!(e.frame_index, 1);
        assert_eq!(e.added, 2);
        assert!(e.topology_changed);
    }
}
