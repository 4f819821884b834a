// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decomposed 2-D placement for a node.
//!
//! Callers describe a node's placement as position, rotation, scale and an
//! origin about which rotation and scale are applied. [`Transformable`]
//! composes those into a [`kurbo::Affine`] on demand.

use kurbo::{Affine, Point, Vec2};

/// Position, rotation and scale of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transformable {
    /// Translation along x.
    pub x: f64,
    /// Translation along y.
    pub y: f64,
    /// Rotation in radians (kurbo's convention).
    pub rotation: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Point (in local space) about which rotation and scale apply.
    pub origin: Point,
}

impl Transformable {
    /// No translation, rotation or scaling.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        origin: Point::ORIGIN,
    };

    /// Returns whether this placement is the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Composes the placement into a local-to-parent transform.
    ///
    /// Applied right to left: move the origin to zero, scale, rotate, move
    /// the origin back, then translate.
    #[must_use]
    pub fn local_transform(&self) -> Affine {
        if self.is_identity() {
            return Affine::IDENTITY;
        }
        let origin = self.origin.to_vec2();
        Affine::translate(Vec2::new(self.x, self.y))
            * Affine::translate(origin)
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate(-origin)
    }
}

impl Default for Transformable {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Inverts `transform`, returning `None` when it is singular or not finite.
#[must_use]
pub fn invert(transform: Affine) -> Option<Affine> {
    let det = transform.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inverse = transform.inverse();
    inverse.is_finite().then_some(inverse)
}
