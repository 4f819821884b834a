// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graph-node capability embedded in every paintable node.
//!
//! [`Element`] carries what a generic scene-graph node knows: its placement
//! relative to its parent, the resulting world transform, a generic "needs
//! repaint" flag, and any attributes nobody claimed. Paint-specific state
//! lives one level up in [`Displayable`](crate::displayable::Displayable).

use alloc::collections::BTreeMap;
use alloc::string::String;

use kurbo::{Affine, Point};

use crate::animation::Animator;
use crate::transform::{Transformable, invert};
use crate::value::Value;

/// Transform, generic dirty flag, and overflow attributes of a node.
#[derive(Clone, Debug)]
pub struct Element {
    placement: Transformable,
    parent_world: Affine,
    world: Affine,
    inverse_world: Option<Affine>,
    dirty: bool,
    attrs: BTreeMap<String, Value>,
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

impl Element {
    /// Creates an element at the identity placement, marked dirty so the
    /// first paint pass picks it up.
    #[must_use]
    pub fn new() -> Self {
        Self {
            placement: Transformable::IDENTITY,
            parent_world: Affine::IDENTITY,
            world: Affine::IDENTITY,
            inverse_world: Some(Affine::IDENTITY),
            dirty: true,
            attrs: BTreeMap::new(),
        }
    }

    // -- Dirty flag --

    /// Flags the element as needing a repaint.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether the element needs a repaint.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the repaint flag. Called by the scheduler once a paint pass
    /// has consumed the change.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // -- Placement --

    /// Returns the decomposed placement.
    #[inline]
    #[must_use]
    pub fn placement(&self) -> &Transformable {
        &self.placement
    }

    /// Replaces the placement, recomputing the world transform.
    pub fn set_placement(&mut self, placement: Transformable) {
        self.placement = placement;
        self.refresh_world();
        self.mark_dirty();
    }

    /// Sets the translation.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.set_placement(Transformable {
            x,
            y,
            ..self.placement
        });
    }

    /// Sets the rotation in radians.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.set_placement(Transformable {
            rotation,
            ..self.placement
        });
    }

    /// Sets the scale factors.
    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        self.set_placement(Transformable {
            scale_x,
            scale_y,
            ..self.placement
        });
    }

    /// Sets the rotation/scale origin.
    pub fn set_origin(&mut self, origin: Point) {
        self.set_placement(Transformable {
            origin,
            ..self.placement
        });
    }

    /// Returns the local-to-parent transform.
    #[inline]
    #[must_use]
    pub fn local_transform(&self) -> Affine {
        self.placement.local_transform()
    }

    /// Returns the local-to-world transform.
    ///
    /// Inside a [`Scene`](crate::scene::Scene) the parent part is refreshed by
    /// [`evaluate`](crate::scene::Scene::evaluate); a standalone element has
    /// no parent, so its world transform equals its local transform.
    #[inline]
    #[must_use]
    pub fn world_transform(&self) -> Affine {
        self.world
    }

    /// Updates the cached parent world transform.
    pub(crate) fn set_parent_world(&mut self, parent_world: Affine) {
        self.parent_world = parent_world;
        self.refresh_world();
    }

    /// Maps a point from world space into this element's local space.
    ///
    /// When the world transform is singular the point is returned unchanged.
    #[must_use]
    pub fn transform_point_to_local(&self, point: Point) -> Point {
        match self.inverse_world {
            Some(inverse) => inverse * point,
            None => point,
        }
    }

    /// Maps a point from this element's local space into world space.
    #[must_use]
    pub fn transform_point_to_world(&self, point: Point) -> Point {
        self.world * point
    }

    fn refresh_world(&mut self) {
        self.world = self.parent_world * self.placement.local_transform();
        self.inverse_world = invert(self.world);
    }

    // -- Attributes --

    /// Stores an attribute no typed field claimed, marking the element dirty.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let _ = self.attrs.insert(key.into(), value.into());
        self.mark_dirty();
    }

    /// Returns an overflow attribute.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Returns all overflow attributes.
    #[must_use]
    pub fn attrs(&self) -> &BTreeMap<String, Value> {
        &self.attrs
    }

    // -- Animation --

    /// Asks `animator` to animate the sub-object named `property`.
    pub fn animate(&self, animator: &mut dyn Animator, property: &str, looping: bool) {
        animator.animate(property, looping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_element_is_dirty() {
        let mut el = Element::new();
        assert!(el.is_dirty());
        el.clear_dirty();
        assert!(!el.is_dirty());
    }

    #[test]
    fn placement_change_marks_dirty_and_updates_world() {
        let mut el = Element::new();
        el.clear_dirty();
        el.set_position(5.0, 7.0);
        assert!(el.is_dirty());
        assert_eq!(el.world_transform(), Affine::translate((5.0, 7.0)));
        assert_eq!(
            el.transform_point_to_local(Point::new(6.0, 8.0)),
            Point::new(1.0, 1.0)
        );
    }

    #[test]
    fn parent_world_composes_before_local() {
        let mut el = Element::new();
        el.set_position(1.0, 0.0);
        el.set_parent_world(Affine::scale(2.0));
        assert_eq!(
            el.transform_point_to_world(Point::ORIGIN),
            Point::new(2.0, 0.0)
        );
    }

    #[test]
    fn singular_world_leaves_point_unchanged() {
        let mut el = Element::new();
        el.set_scale(0.0, 0.0);
        let p = Point::new(3.0, 4.0);
        assert_eq!(el.transform_point_to_local(p), p);
    }

    #[test]
    fn overflow_attrs_are_kept_verbatim() {
        let mut el = Element::new();
        el.clear_dirty();
        el.set_attr("dataIndex", 4.0);
        assert!(el.is_dirty());
        assert_eq!(el.attr("dataIndex"), Some(&Value::Number(4.0)));
    }
}
