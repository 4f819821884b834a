// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascaded clip-path lists.

use alloc::vec::Vec;

use crate::id::NodeId;

/// A non-empty, ordered list of path nodes that clip a node and its subtree.
///
/// The existence of a `ClipPaths` value alone signals "this node is
/// clipped", so an empty list cannot be constructed. Nodes store
/// `Option<ClipPaths>`; `None` means no clipping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipPaths(Vec<NodeId>);

impl ClipPaths {
    /// Wraps `paths`, returning `None` if the list is empty.
    #[must_use]
    pub fn new(paths: Vec<NodeId>) -> Option<Self> {
        if paths.is_empty() {
            None
        } else {
            Some(Self(paths))
        }
    }

    /// Returns the clip paths in application order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }

    /// Returns the number of clip paths (always at least one).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Appends another clip path.
    pub fn push(&mut self, path: NodeId) {
        self.0.push(path);
    }

    /// Returns an iterator over the clip paths.
    pub fn iter(&self) -> core::slice::Iter<'_, NodeId> {
        self.0.iter()
    }

    /// Consumes the list and returns the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<NodeId> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ClipPaths {
    type Item = &'a NodeId;
    type IntoIter = core::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn empty_list_is_rejected() {
        assert!(ClipPaths::new(Vec::new()).is_none());
    }

    #[test]
    fn non_empty_list_keeps_order() {
        let a = NodeId::from_raw_parts(3, 0);
        let b = NodeId::from_raw_parts(1, 2);
        let clips = ClipPaths::new(vec![a, b]).expect("two paths");
        assert_eq!(clips.as_slice(), &[a, b]);
        assert_eq!(clips.len(), 2);
        assert!(!clips.is_empty());
    }
}
