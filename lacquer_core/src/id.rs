// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node and backend identity types.

use core::fmt;

/// Sentinel value indicating "no node" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a node in a [`Scene`](crate::scene::Scene).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a node is removed and the slot is reused. Nodes
/// refer to each other (clip paths, hover mirrors) through these handles
/// only, so dropping a node never has to chase references.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Slot index into the scene's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the scene's generation for this slot.
    pub(crate) generation: u32,
}

impl NodeId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Reassembles a handle from its raw parts.
    ///
    /// Intended for decoding recorded diagnostics. A handle built this way is
    /// only meaningful to the scene that originally issued it.
    #[inline]
    #[must_use]
    pub const fn from_raw_parts(idx: u32, generation: u32) -> Self {
        Self { idx, generation }
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}

/// An opaque slot for a paint backend's own retained element.
///
/// An SVG backend might store the index of its `<path>` element here. The
/// core only stores the value and hands it back; it never interprets it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendHandle(pub u64);

impl fmt::Debug for BackendHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BackendHandle({})", self.0)
    }
}
