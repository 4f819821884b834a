// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind behavior of paintable nodes.
//!
//! A [`Displayable`] only knows the protocol: when bounds go stale, how a
//! style bag is adopted, in which order draw hooks run. What a valid style
//! looks like, how big the node is, and what counts as a hit are decided by
//! its [`NodeKind`]. Path and shape crates implement this trait; the core
//! ships only [`BaseKind`].

use core::fmt;

use kurbo::{Point, Rect};

use crate::displayable::Displayable;
use crate::error::Error;
use crate::style::Style;

/// Behavior supplied by a concrete kind of paintable node.
///
/// Every method has a default, but [`normalize_style`](Self::normalize_style)
/// defaults to failing: a kind must decide how raw style input is validated
/// before nodes of that kind accept one.
pub trait NodeKind: fmt::Debug {
    /// Short name used in errors and diagnostics.
    fn name(&self) -> &'static str;

    /// Validates and defaults a raw style bag.
    ///
    /// # Errors
    ///
    /// The default implementation always returns
    /// [`Error::StyleNotImplemented`].
    fn normalize_style(&self, style: Style) -> Result<Style, Error> {
        _ = style;
        Err(Error::StyleNotImplemented { kind: self.name() })
    }

    /// Computes the node's bounding rectangle in local space.
    ///
    /// Called only when the node's bounds cache is empty. `None` means the
    /// node has no extent and can never be hit through its rectangle.
    fn bounding_rect(&self, style: &Style) -> Option<Rect> {
        _ = style;
        None
    }

    /// Returns whether `point` (in world space) hits `node`.
    ///
    /// Defaults to [`Displayable::rect_contains`]. Override for
    /// non-rectangular hit areas.
    fn contains(&self, node: &Displayable, point: Point) -> bool {
        node.rect_contains(point)
    }

    /// Runs after the public `BeforeDraw` hook, before the paint call.
    fn inner_before_draw(&self, node: &Displayable) {
        _ = node;
    }

    /// Runs after the paint call, before the public `AfterDraw` hook.
    fn inner_after_draw(&self, node: &Displayable) {
        _ = node;
    }
}

/// The bare paintable node: no style policy, no extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BaseKind;

impl NodeKind for BaseKind {
    fn name(&self) -> &'static str {
        "displayable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_kind_refuses_styles() {
        let err = BaseKind.normalize_style(Style::new()).unwrap_err();
        assert_eq!(
            err,
            Error::StyleNotImplemented {
                kind: "displayable"
            }
        );
    }

    #[test]
    fn base_kind_has_no_bounds() {
        assert_eq!(BaseKind.bounding_rect(&Style::new()), None);
    }
}
