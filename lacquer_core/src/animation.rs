// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract with an external animation subsystem.
//!
//! The core does not interpolate anything. An [`Animator`] receives requests
//! to animate a named sub-object of a node; when it later writes new values
//! it reports back through
//! [`Displayable::on_animation_frame`](crate::displayable::Displayable::on_animation_frame)
//! so animated and direct mutations share one invalidation path.

/// Accepts animation requests for one node.
pub trait Animator {
    /// Starts animating the sub-object named `property` (for example
    /// [`STYLE_KEY`](crate::style::STYLE_KEY)), repeating if `looping`.
    fn animate(&mut self, property: &str, looping: bool);
}
