// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node storage with allocation, topology, and mutation tracking.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::traverse::Children;
use crate::dirty;
use crate::displayable::Displayable;
use crate::id::{INVALID, NodeId};

/// Arena of [`Displayable`] nodes forming an ordered forest.
///
/// Nodes are addressed by [`NodeId`] handles. Removed nodes free their slot
/// for reuse, and generation counters make old handles fail validation.
/// Topology lives in parallel index arrays next to the node slots.
#[derive(Debug)]
pub struct Scene {
    // -- Nodes --
    pub(crate) nodes: Vec<Option<Displayable>>,

    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
    pub(crate) frame_index: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            frame_index: 0,
        }
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Returns whether the scene has no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of completed evaluate passes.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    // -- Allocation API --

    /// Moves a node into the scene as a new root and returns its handle.
    ///
    /// The node is reported in the next [`evaluate`](Self::evaluate) as
    /// added, transformed, and needing a repaint.
    pub fn insert(&mut self, node: Displayable) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.nodes[i] = Some(node);
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            idx
        } else {
            let idx = u32::try_from(self.nodes.len())
                .ok()
                .filter(|&idx| idx != INVALID)
                .unwrap_or_else(|| panic!("scene is full"));
            self.nodes.push(Some(node));
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.generation.push(0);
            idx
        };

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.dirty.mark(idx, dirty::TRANSFORM);
        self.dirty.mark(idx, dirty::PAINT);

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Removes a node, returning it and freeing its slot for reuse.
    ///
    /// Hover-mirror links pointing at the node from a live counterpart are
    /// cleared. Clip paths naming the node are left alone; stale clip
    /// handles are ignored by hit testing.
    ///
    /// # Panics
    ///
    /// Panics if the node has children (remove them first) or if the handle
    /// is stale.
    pub fn remove(&mut self, id: NodeId) -> Displayable {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot remove node with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        self.dirty.remove_key(idx);
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        let node = match self.nodes[idx as usize].take() {
            Some(node) => node,
            None => unreachable!("validated slot holds a node"),
        };

        if let Some(mirror) = node.hover_mirror.filter(|&m| self.is_alive(m)) {
            self.slot_mut(mirror).source_of = None;
        }
        if let Some(source) = node.source_of.filter(|&s| self.is_alive(s)) {
            self.slot_mut(source).hover_mirror = None;
        }

        node
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        let i = id.idx as usize;
        i < self.nodes.len() && self.generation[i] == id.generation && self.nodes[i].is_some()
    }

    // -- Node access --

    /// Returns the node behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Displayable {
        self.validate(id);
        self.node_at(id.idx)
    }

    /// Returns the node behind a handle, or `None` if the handle is stale.
    #[must_use]
    pub fn try_get(&self, id: NodeId) -> Option<&Displayable> {
        if self.is_alive(id) {
            self.nodes[id.idx as usize].as_ref()
        } else {
            None
        }
    }

    /// Mutates a node and records what changed.
    ///
    /// A changed placement marks the transform channel for the node's
    /// subtree. A node left dirty by `f` is reported for repaint.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn update<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Displayable) -> R) -> R {
        self.validate(id);
        let node = self.slot_mut(id);
        let placement = *node.element().placement();
        let out = f(&mut *node);
        let moved = *node.element().placement() != placement;
        let repaint = node.is_dirty();

        if moved {
            self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
        }
        if repaint {
            self.dirty.mark(id.idx, dirty::PAINT);
        }
        out
    }

    /// Routes an animation write on `target_key` to the node.
    ///
    /// See [`Displayable::on_animation_frame`].
    pub fn on_animation_frame(&mut self, id: NodeId, target_key: &str) {
        self.update(id, |node| node.on_animation_frame(target_key));
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, or
    /// if `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        assert!(!self.is_ancestor_or_self(c, p), "cannot add an ancestor as a child");

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        // World transforms are inherited.
        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);

        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Detaches `child` from its parent, making it a root.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "node has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);
        self.dirty.remove_dependency(c, p, dirty::TRANSFORM);

        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Returns the parent of a node, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.id_at(p))
    }

    /// Returns an iterator over the direct children of a node.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the live nodes without a parent, in slot order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&i| self.parent[i] == INVALID && self.nodes[i].is_some())
            .filter_map(|i| u32::try_from(i).ok())
            .map(|idx| self.id_at(idx))
            .collect()
    }

    // -- Hover mirrors --

    /// Links `mirror` as the hover proxy drawn in place of `source`, or
    /// unlinks `source` when `mirror` is `None`.
    ///
    /// Any previous link of either node is cleared first, in both roles, so
    /// each node takes part in at most one pair.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or `mirror` is `source`.
    pub fn set_hover_mirror(&mut self, source: NodeId, mirror: Option<NodeId>) {
        self.validate(source);
        if let Some(m) = mirror {
            self.validate(m);
            assert!(m != source, "a node cannot mirror itself");
        }

        if let Some(old) = self.hover_mirror(source) {
            self.slot_mut(old).source_of = None;
        }
        if let Some(m) = mirror {
            if let Some(owner) = self.source_of(source) {
                self.slot_mut(owner).hover_mirror = None;
                self.dirty.mark(owner.idx, dirty::PAINT);
            }
            self.slot_mut(source).source_of = None;
            if let Some(proxy) = self.hover_mirror(m) {
                self.slot_mut(proxy).source_of = None;
            }
            self.slot_mut(m).hover_mirror = None;
            if let Some(old_source) = self.source_of(m) {
                self.slot_mut(old_source).hover_mirror = None;
                self.dirty.mark(old_source.idx, dirty::PAINT);
            }
            self.slot_mut(m).source_of = Some(source);
            self.dirty.mark(m.idx, dirty::PAINT);
        }

        self.slot_mut(source).hover_mirror = mirror;
        self.dirty.mark(source.idx, dirty::PAINT);
    }

    /// Returns the live hover proxy of `id`, if linked.
    #[must_use]
    pub fn hover_mirror(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).hover_mirror.filter(|&m| self.is_alive(m))
    }

    /// Returns the live node that `id` is a hover proxy of, if linked.
    #[must_use]
    pub fn source_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).source_of.filter(|&s| self.is_alive(s))
    }

    // -- Raw-index accessors --
    //
    // These accept raw slot indices (as found in `FrameChanges`) rather than
    // `NodeId` handles. Only use with indices that came from `FrameChanges`
    // or `traversal_order()`.

    /// Returns the node at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is out of range or empty.
    #[must_use]
    pub fn node_at(&self, idx: u32) -> &Displayable {
        match self.nodes.get(idx as usize) {
            Some(Some(node)) => node,
            _ => panic!("no node at slot {idx}"),
        }
    }

    /// Returns the current handle for raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    #[must_use]
    pub fn id_at(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            self.is_alive(id),
            "stale NodeId: {id:?} (current gen: {})",
            self.generation
                .get(id.idx as usize)
                .copied()
                .unwrap_or(u32::MAX)
        );
    }

    /// Returns the node behind a validated handle.
    pub(crate) fn slot_mut(&mut self, id: NodeId) -> &mut Displayable {
        match self.nodes.get_mut(id.idx as usize) {
            Some(Some(node)) => node,
            _ => panic!("stale NodeId: {id:?}"),
        }
    }

    /// Returns whether `idx` is `of` or one of its ancestors.
    fn is_ancestor_or_self(&self, idx: u32, of: u32) -> bool {
        let mut cur = of;
        while cur != INVALID {
            if cur == idx {
                return true;
            }
            cur = self.parent[cur as usize];
        }
        false
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::options::DisplayableOptions;

    fn node() -> Displayable {
        Displayable::new(DisplayableOptions::new(), None).unwrap()
    }

    #[test]
    fn insert_and_remove() {
        let mut scene = Scene::new();
        let id = scene.insert(node());
        assert!(scene.is_alive(id));
        assert_eq!(scene.len(), 1);
        let _ = scene.remove(id);
        assert!(!scene.is_alive(id));
        assert!(scene.is_empty());
        assert!(scene.try_get(id).is_none());
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut scene = Scene::new();
        let id1 = scene.insert(node());
        let _ = scene.remove(id1);
        let id2 = scene.insert(node());
        assert!(!scene.is_alive(id1));
        assert!(scene.is_alive(id2));
        assert_eq!(id1.index(), id2.index());
        assert_ne!(id1.generation(), id2.generation());
    }

    #[test]
    fn add_child_and_query() {
        let mut scene = Scene::new();
        let parent = scene.insert(node());
        let a = scene.insert(node());
        let b = scene.insert(node());

        scene.add_child(parent, a);
        scene.add_child(parent, b);

        assert_eq!(scene.parent(a), Some(parent));
        let kids: Vec<_> = scene.children(parent).collect();
        assert_eq!(kids, vec![a, b]);
        assert_eq!(scene.roots(), vec![parent]);
    }

    #[test]
    fn remove_from_parent_makes_a_root() {
        let mut scene = Scene::new();
        let parent = scene.insert(node());
        let child = scene.insert(node());
        scene.add_child(parent, child);
        scene.remove_from_parent(child);
        assert_eq!(scene.parent(child), None);
        assert!(scene.children(parent).next().is_none());
        assert!(scene.roots().contains(&child));
    }

    #[test]
    fn removing_a_middle_child_keeps_siblings_linked() {
        let mut scene = Scene::new();
        let parent = scene.insert(node());
        let a = scene.insert(node());
        let b = scene.insert(node());
        let c = scene.insert(node());
        for kid in [a, b, c] {
            scene.add_child(parent, kid);
        }
        let _ = scene.remove(b);
        let kids: Vec<_> = scene.children(parent).collect();
        assert_eq!(kids, vec![a, c]);
    }

    #[test]
    #[should_panic(expected = "cannot remove node with children")]
    fn remove_with_children_panics() {
        let mut scene = Scene::new();
        let parent = scene.insert(node());
        let child = scene.insert(node());
        scene.add_child(parent, child);
        let _ = scene.remove(parent);
    }

    #[test]
    #[should_panic(expected = "cannot add an ancestor as a child")]
    fn cycles_are_rejected() {
        let mut scene = Scene::new();
        let a = scene.insert(node());
        let b = scene.insert(node());
        scene.add_child(a, b);
        scene.add_child(b, a);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn removed_handle_panics_on_get() {
        let mut scene = Scene::new();
        let id = scene.insert(node());
        let _ = scene.remove(id);
        let _ = scene.get(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn removed_handle_panics_on_update() {
        let mut scene = Scene::new();
        let id = scene.insert(node());
        let _ = scene.remove(id);
        scene.update(id, |n| n.set_z(1.0));
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn removed_handle_panics_on_add_child() {
        let mut scene = Scene::new();
        let root = scene.insert(node());
        let id = scene.insert(node());
        let _ = scene.remove(id);
        scene.add_child(root, id);
    }

    #[test]
    fn update_returns_closure_result() {
        let mut scene = Scene::new();
        let id = scene.insert(node());
        let z = scene.update(id, |n| {
            n.set_z(9.0);
            n.z()
        });
        assert_eq!(z, 9.0);
        assert_eq!(scene.get(id).z(), 9.0);
    }

    #[test]
    fn hover_mirror_links_both_ways() {
        let mut scene = Scene::new();
        let source = scene.insert(node());
        let mirror = scene.insert(node());
        scene.set_hover_mirror(source, Some(mirror));
        assert_eq!(scene.hover_mirror(source), Some(mirror));
        assert_eq!(scene.source_of(mirror), Some(source));

        scene.set_hover_mirror(source, None);
        assert_eq!(scene.hover_mirror(source), None);
        assert_eq!(scene.source_of(mirror), None);
    }

    #[test]
    fn relinking_a_mirror_clears_its_old_source() {
        let mut scene = Scene::new();
        let first = scene.insert(node());
        let second = scene.insert(node());
        let mirror = scene.insert(node());
        scene.set_hover_mirror(first, Some(mirror));
        scene.set_hover_mirror(second, Some(mirror));
        assert_eq!(scene.hover_mirror(first), None);
        assert_eq!(scene.source_of(mirror), Some(second));
    }

    #[test]
    fn chaining_mirrors_keeps_pairs_disjoint() {
        let mut scene = Scene::new();
        let a = scene.insert(node());
        let b = scene.insert(node());
        let c = scene.insert(node());
        scene.set_hover_mirror(a, Some(b));
        scene.set_hover_mirror(b, Some(c));
        assert_eq!(scene.hover_mirror(a), None);
        assert_eq!(scene.source_of(b), None);
        assert_eq!(scene.hover_mirror(b), Some(c));

        scene.set_hover_mirror(c, Some(b));
        assert_eq!(scene.hover_mirror(b), None);
        assert_eq!(scene.source_of(c), None);
        assert_eq!(scene.source_of(b), Some(c));
    }

    #[test]
    fn removing_a_mirror_clears_the_link() {
        let mut scene = Scene::new();
        let source = scene.insert(node());
        let mirror = scene.insert(node());
        scene.set_hover_mirror(source, Some(mirror));
        let removed = scene.remove(mirror);
        assert_eq!(removed.source_of(), Some(source));
        assert_eq!(scene.hover_mirror(source), None);
        assert_eq!(scene.get(source).hover_mirror(), None);
    }

    #[test]
    fn stale_mirror_reads_as_none_after_slot_reuse() {
        let mut scene = Scene::new();
        let source = scene.insert(node());
        let mirror = scene.insert(node());
        scene.set_hover_mirror(source, Some(mirror));
        let _ = scene.remove(source);
        let reused = scene.insert(node());
        assert_eq!(reused.index(), source.index());
        assert_eq!(scene.source_of(mirror), None);
    }
}
