// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use alloc::vec::Vec;

use super::store::Scene;
use crate::id::{INVALID, NodeId};

/// An iterator over the direct children of a node.
///
/// Created by [`Scene::children`].
#[derive(Debug)]
pub struct Children<'a> {
    scene: &'a Scene,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(scene: &'a Scene, first: u32) -> Self {
        Self {
            scene,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.scene.next_sibling[idx as usize];
        Some(self.scene.id_at(idx))
    }
}

/// An iterator from a node up through its ancestors, starting with the node
/// itself.
#[derive(Debug)]
pub(crate) struct Ancestry<'a> {
    scene: &'a Scene,
    current: u32,
}

impl<'a> Ancestry<'a> {
    pub(crate) fn new(scene: &'a Scene, start: u32) -> Self {
        Self {
            scene,
            current: start,
        }
    }
}

impl Iterator for Ancestry<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.scene.parent[idx as usize];
        Some(idx)
    }
}

impl Scene {
    /// Appends the depth-first pre-order of all live nodes to `out`.
    ///
    /// Roots are visited in slot order, children in sibling order.
    pub(crate) fn collect_traversal(&self, out: &mut Vec<u32>) {
        let mut stack = Vec::new();
        for root in self.roots().into_iter().rev() {
            stack.push(root.idx);
        }
        while let Some(idx) = stack.pop() {
            out.push(idx);
            let mark = stack.len();
            let mut child = self.first_child[idx as usize];
            while child != INVALID {
                stack.push(child);
                child = self.next_sibling[child as usize];
            }
            stack[mark..].reverse();
        }
    }
}
