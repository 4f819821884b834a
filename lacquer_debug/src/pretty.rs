// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use lacquer_core::trace::{EvaluateEvent, HitTestEvent, PaintNodeEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_evaluate(&mut self, e: &EvaluateEvent) {
        let topology = if e.topology_changed { " topology" } else { "" };
        let _ = writeln!(
            self.writer,
            "[eval] frame={} transforms={} repaint={} restyle={} +{} -{}{topology}",
            e.frame_index, e.transforms, e.repaint, e.restyle, e.added, e.removed,
        );
    }

    fn on_paint_node(&mut self, e: &PaintNodeEvent) {
        let restyled = if e.restyled { " restyled" } else { "" };
        let culling = if e.culling { " culling" } else { "" };
        let _ = writeln!(
            self.writer,
            "[paint] frame={} node={:?}{restyled}{culling}",
            e.frame_index, e.node,
        );
    }

    fn on_hit_test(&mut self, e: &HitTestEvent) {
        let result = match e.hit {
            Some(id) => format!("{id:?}"),
            None => "miss".to_owned(),
        };
        let _ = writeln!(
            self.writer,
            "[hit] frame={} at ({:.1}, {:.1}) tested={} -> {result}",
            e.frame_index, e.point.x, e.point.y, e.tested,
        );
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use lacquer_core::id::NodeId;

    use super::*;

    fn printed(f: impl FnOnce(&mut PrettyPrintSink<Vec<u8>>)) -> String {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        f(&mut sink);
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_evaluate() {
        let output = printed(|sink| {
            sink.on_evaluate(&EvaluateEvent {
                frame_index: 1,
                transforms: 2,
                repaint: 3,
                restyle: 1,
                added: 3,
                removed: 0,
                topology_changed: true,
            });
        });
        assert!(output.starts_with("[eval]"), "got: {output}");
        assert!(output.contains("frame=1"), "got: {output}");
        assert!(output.contains("topology"), "got: {output}");
    }

    #[test]
    fn pretty_print_paint_flags() {
        let output = printed(|sink| {
            sink.on_paint_node(&PaintNodeEvent {
                frame_index: 2,
                node: NodeId::from_raw_parts(5, 1),
                restyled: true,
                culling: false,
            });
        });
        assert!(output.contains("NodeId(5@gen1)"), "got: {output}");
        assert!(output.contains("restyled"), "got: {output}");
        assert!(!output.contains("culling"), "got: {output}");
    }

    #[test]
    fn pretty_print_hit_miss() {
        let output = printed(|sink| {
            sink.on_hit_test(&HitTestEvent {
                frame_index: 2,
                point: Point::new(1.5, 2.0),
                tested: 4,
                hit: None,
            });
        });
        assert!(output.contains("at (1.5, 2.0)"), "got: {output}");
        assert!(output.ends_with("-> miss\n"), "got: {output}");
    }
}
