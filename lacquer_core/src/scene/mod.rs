// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene arena.
//!
//! A [`Scene`] owns [`Displayable`](crate::displayable::Displayable) nodes
//! and arranges them in an ordered forest. It supplies what a single node
//! cannot know on its own:
//!
//! - An identity ([`NodeId`](crate::id::NodeId)): a generational handle that
//!   becomes stale when the node is removed. Clip paths and hover mirrors
//!   refer to other nodes through these handles.
//! - Topology: parent, first-child, and sibling links.
//! - World transforms: each node's placement is composed with its parent's
//!   world transform during [`evaluate`](Scene::evaluate).
//! - Paint order: [`display_list`](Scene::display_list) and
//!   [`paint_list`](Scene::paint_list).
//! - Hit testing with clip-path cascade:
//!   [`hit_test`](Scene::hit_test).
//!
//! # Dirty tracking
//!
//! Nodes are mutated through [`Scene::update`], which notices what the
//! closure changed and marks the corresponding channel (see
//! [`dirty`](crate::dirty)):
//!
//! - **TRANSFORM**: a changed placement; propagates to all descendants.
//! - **PAINT**: the node's generic dirty flag was left set; local-only.
//! - **TOPOLOGY**: insert, remove, attach, or detach; triggers a
//!   traversal-order rebuild.

mod evaluate;
mod hit;
mod paint;
mod store;
mod traverse;

pub use evaluate::FrameChanges;
pub use store::Scene;
pub use traverse::Children;
