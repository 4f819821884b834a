// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for lacquer
//! diagnostics.
//!
//! This crate provides [`TraceSink`](lacquer_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//!
//! ```
//! use lacquer_core::displayable::Displayable;
//! use lacquer_core::options::DisplayableOptions;
//! use lacquer_core::scene::Scene;
//! use lacquer_core::trace::Tracer;
//! use lacquer_debug::recorder::{RecordedEvent, RecorderSink, decode};
//!
//! let mut scene = Scene::new();
//! let _ = scene.insert(Displayable::new(DisplayableOptions::new(), None).unwrap());
//!
//! let mut rec = RecorderSink::new();
//! let _ = scene.evaluate_traced(&mut Tracer::new(&mut rec));
//!
//! let events: Vec<_> = decode(rec.as_bytes()).collect();
//! assert!(matches!(events[..], [RecordedEvent::Evaluate(e)] if e.added == 1));
//! ```

pub mod chrome;
pub mod pretty;
pub mod recorder;
