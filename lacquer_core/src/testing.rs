// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node kinds shared by unit tests.

use kurbo::{Point, Rect};

use crate::displayable::Displayable;
use crate::error::Error;
use crate::kind::NodeKind;
use crate::style::Style;

/// Width of the border band that hits when `hollow` is set.
const BORDER: f64 = 1.0;

/// An axis-aligned box sized by the `width` and `height` style keys.
///
/// Missing keys mean zero. Non-numeric values are rejected. A hollow box
/// only hits within [`BORDER`] of its edges.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BoxKind {
    pub(crate) hollow: bool,
}

impl NodeKind for BoxKind {
    fn name(&self) -> &'static str {
        "box"
    }

    fn normalize_style(&self, style: Style) -> Result<Style, Error> {
        for key in ["width", "height"] {
            if style.get(key).is_some_and(|v| v.as_number().is_none()) {
                return Err(Error::InvalidStyle {
                    key: key.into(),
                    reason: "expected a number",
                });
            }
        }
        Ok(style)
    }

    fn bounding_rect(&self, style: &Style) -> Option<Rect> {
        let width = style.number("width").unwrap_or(0.0);
        let height = style.number("height").unwrap_or(0.0);
        Some(Rect::new(0.0, 0.0, width, height))
    }

    fn contains(&self, node: &Displayable, point: Point) -> bool {
        if !node.rect_contains(point) {
            return false;
        }
        if !self.hollow {
            return true;
        }
        let local = node.element().transform_point_to_local(point);
        node.bounding_rect()
            .is_some_and(|rect| !rect.inset(-BORDER).contains(local))
    }
}
