// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Recorded events carry no timestamps, so each event is placed at its
//! ordinal position in the recording, one microsecond apart. Frames are
//! separated by the evaluate events, which also emit a counter track.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for (ts, recorded) in decode(bytes).enumerate() {
        match recorded {
            RecordedEvent::Evaluate(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Evaluate",
                    "cat": "Scene",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                        "transforms": e.transforms,
                        "added": e.added,
                        "removed": e.removed,
                        "topology_changed": e.topology_changed,
                    }
                }));
                events.push(json!({
                    "ph": "C",
                    "name": "Repaint",
                    "cat": "Scene",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "repaint": e.repaint,
                        "restyle": e.restyle,
                    }
                }));
            }
            RecordedEvent::PaintNode(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Paint",
                    "cat": "Paint",
                    "ts": ts,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "node": e.node.index(),
                        "generation": e.node.generation(),
                        "restyled": e.restyled,
                        "culling": e.culling,
                    }
                }));
            }
            RecordedEvent::HitTest(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "HitTest",
                    "cat": "Input",
                    "ts": ts,
                    "pid": 0,
                    "tid": 2,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "x": e.point.x,
                        "y": e.point.y,
                        "tested": e.tested,
                        "hit": e.hit.map(|id| id.index()),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use kurbo::Point;
    use lacquer_core::id::NodeId;
    use lacquer_core::trace::{EvaluateEvent, HitTestEvent, PaintNodeEvent, TraceSink};

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_evaluate(&EvaluateEvent {
            frame_index: 1,
            repaint: 1,
            added: 1,
            topology_changed: true,
            ..EvaluateEvent::default()
        });
        rec.on_paint_node(&PaintNodeEvent {
            frame_index: 1,
            node: NodeId::from_raw_parts(0, 0),
            restyled: true,
            culling: false,
        });
        rec.on_hit_test(&HitTestEvent {
            frame_index: 1,
            point: Point::new(4.0, 4.0),
            tested: 1,
            hit: None,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 4);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "Evaluate");
        assert_eq!(parsed[1]["ph"], "C");
        assert_eq!(parsed[1]["args"]["repaint"], 1);

        assert_eq!(parsed[2]["name"], "Paint");
        assert_eq!(parsed[2]["ts"], 1);
        assert_eq!(parsed[2]["args"]["restyled"], true);

        assert_eq!(parsed[3]["name"], "HitTest");
        assert!(parsed[3]["args"]["hit"].is_null());
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
