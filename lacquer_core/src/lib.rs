// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode paintable nodes with dirty tracking and hit testing.
//!
//! `lacquer_core` provides the node type a 2-D rendering engine draws: a
//! [`Displayable`](displayable::Displayable) holding a mutable style bag,
//! paint-order attributes, and a placement, together with the bookkeeping
//! that tells a paint backend what went stale. It is `no_std` compatible
//! (with `alloc`) and never paints anything itself.
//!
//! # Architecture
//!
//! ```text
//!   Scene::update(id, |n| n.set_style(..)) ──► dirty channels
//!                                                   │
//!                 ┌─────────────────────────────────┘
//!                 ▼
//!   Scene::evaluate() ──► FrameChanges ──► Scene::paint(painter)
//!                                               │
//!                 ┌─────────────────────────────┘
//!                 ▼
//!   BeforeDraw → InnerBeforeDraw → Painter::draw → InnerAfterDraw → AfterDraw
//! ```
//!
//! **[`displayable`]**: The paintable node. Style writes invalidate the
//! cached bounding rectangle and flag style resources for resync.
//!
//! **[`kind`]**: The [`NodeKind`](kind::NodeKind) trait through which shape
//! crates supply style policy, bounds, and hit shape.
//!
//! **[`style`]**: The style bag and its default-merge rule.
//!
//! **[`dirty`]**: Per-node dirty state and the scene's dirty channels
//! (via `understory_dirty`).
//!
//! **[`scene`]**: Arena with generational handles, world-transform
//! propagation, paint ordering, and hit testing with clip-path cascade.
//!
//! **[`backend`]**: The [`Painter`](backend::Painter) trait that paint
//! backends implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! scene instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod attr;
pub mod backend;
pub mod clip;
pub mod dirty;
pub mod displayable;
pub mod element;
pub mod error;
pub mod hooks;
pub mod id;
pub mod kind;
pub mod options;
pub mod scene;
pub mod style;
pub mod trace;
pub mod transform;
pub mod value;

#[cfg(test)]
mod testing;
