// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use kurbo::Point;

use lacquer_core::id::NodeId;
use lacquer_core::trace::{EvaluateEvent, HitTestEvent, PaintNodeEvent, TraceSink};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_EVALUATE: u8 = 1;
const TAG_PAINT_NODE: u8 = 2;
const TAG_HIT_TEST: u8 = 3;

const FLAG_RESTYLED: u8 = 1 << 0;
const FLAG_CULLING: u8 = 1 << 1;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_node(&mut self, id: NodeId) {
        self.write_u32(id.index());
        self.write_u32(id.generation());
    }

    fn write_option_node(&mut self, id: Option<NodeId>) {
        match id {
            Some(id) => {
                self.write_u8(1);
                self.write_node(id);
            }
            None => {
                self.write_u8(0);
                self.write_node(NodeId::from_raw_parts(0, 0));
            }
        }
    }
}

impl TraceSink for RecorderSink {
    fn on_evaluate(&mut self, e: &EvaluateEvent) {
        self.write_u8(TAG_EVALUATE);
        self.write_u64(e.frame_index);
        self.write_u32(e.transforms);
        self.write_u32(e.repaint);
        self.write_u32(e.restyle);
        self.write_u32(e.added);
        self.write_u32(e.removed);
        self.write_u8(u8::from(e.topology_changed));
    }

    fn on_paint_node(&mut self, e: &PaintNodeEvent) {
        self.write_u8(TAG_PAINT_NODE);
        self.write_u64(e.frame_index);
        self.write_node(e.node);
        let mut flags = 0;
        if e.restyled {
            flags |= FLAG_RESTYLED;
        }
        if e.culling {
            flags |= FLAG_CULLING;
        }
        self.write_u8(flags);
    }

    fn on_hit_test(&mut self, e: &HitTestEvent) {
        self.write_u8(TAG_HIT_TEST);
        self.write_u64(e.frame_index);
        self.write_f64(e.point.x);
        self.write_f64(e.point.y);
        self.write_u32(e.tested);
        self.write_option_node(e.hit);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// An [`EvaluateEvent`].
    Evaluate(EvaluateEvent),
    /// A [`PaintNodeEvent`].
    PaintNode(PaintNodeEvent),
    /// A [`HitTestEvent`].
    HitTest(HitTestEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_node(&mut self) -> Option<NodeId> {
        let idx = self.read_u32()?;
        let generation = self.read_u32()?;
        Some(NodeId::from_raw_parts(idx, generation))
    }

    fn read_option_node(&mut self) -> Option<Option<NodeId>> {
        let present = self.read_u8()?;
        let node = self.read_node()?;
        Some((present != 0).then_some(node))
    }

    fn decode_evaluate(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Evaluate(EvaluateEvent {
            frame_index: self.read_u64()?,
            transforms: self.read_u32()?,
            repaint: self.read_u32()?,
            restyle: self.read_u32()?,
            added: self.read_u32()?,
            removed: self.read_u32()?,
            topology_changed: self.read_u8()? != 0,
        }))
    }

    fn decode_paint_node(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let node = self.read_node()?;
        let flags = self.read_u8()?;
        Some(RecordedEvent::PaintNode(PaintNodeEvent {
            frame_index,
            node,
            restyled: flags & FLAG_RESTYLED != 0,
            culling: flags & FLAG_CULLING != 0,
        }))
    }

    fn decode_hit_test(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::HitTest(HitTestEvent {
            frame_index: self.read_u64()?,
            point: Point::new(self.read_f64()?, self.read_f64()?),
            tested: self.read_u32()?,
            hit: self.read_option_node()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_EVALUATE => self.decode_evaluate(),
            TAG_PAINT_NODE => self.decode_paint_node(),
            TAG_HIT_TEST => self.decode_hit_test(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
