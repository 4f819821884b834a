// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paintable node.
//!
//! A [`Displayable`] is one drawable primitive. It combines:
//!
//! - an [`Element`]: placement, world transform, generic repaint flag,
//!   overflow attributes;
//! - a [`Style`] bag, mutated through [`set_style`](Displayable::set_style)
//!   and friends;
//! - a [`DirtyState`]: style-dirty flag and the bounding-rect cache;
//! - paint attributes read by the backend (`z_level`, `z`, `z2`,
//!   `invisible`, `culling`, `cursor`, `rect_hover`, `incremental`,
//!   clip paths, backend handle);
//! - a [`NodeKind`] supplying style policy, bounds, and hit shape.
//!
//! # Invalidation
//!
//! Every style write goes through [`mark_style_dirty`](Displayable::mark_style_dirty),
//! which sets the style-dirty flag, sets the generic repaint flag, and empties
//! the bounds cache. This happens even when the written value equals the old
//! one, and even for keys (like `opacity`) that cannot change bounds.
//! Attribute setters only set the generic repaint flag.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::animation::Animator;
use crate::attr::Attr;
use crate::clip::ClipPaths;
use crate::dirty::DirtyState;
use crate::element::Element;
use crate::error::Error;
use crate::hooks::{DrawHook, DrawHooks, HookFn};
use crate::id::{BackendHandle, NodeId};
use crate::kind::{BaseKind, NodeKind};
use crate::options::DisplayableOptions;
use crate::style::{STYLE_KEY, Style};
use crate::transform::Transformable;
use crate::value::Value;

/// Cursor shown over a node unless told otherwise.
pub const DEFAULT_CURSOR: &str = "pointer";

/// A paintable scene-graph node.
#[derive(Debug)]
pub struct Displayable {
    element: Element,
    style: Style,
    dirty: DirtyState,

    invisible: bool,
    z_level: f64,
    z: f64,
    z2: f64,
    culling: bool,
    cursor: String,
    rect_hover: bool,
    incremental: bool,

    clip_paths: Option<ClipPaths>,
    pub(crate) hover_mirror: Option<NodeId>,
    pub(crate) source_of: Option<NodeId>,
    backend_handle: Option<BackendHandle>,

    hooks: DrawHooks,
    kind: Box<dyn NodeKind>,
}

impl Displayable {
    /// Creates a bare node with no style policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StyleNotImplemented`] if `options` carries a style,
    /// since the bare node cannot normalize one.
    pub fn new(options: DisplayableOptions, default_style: Option<&Style>) -> Result<Self, Error> {
        Self::with_kind(BaseKind, options, default_style)
    }

    /// Creates a node of the given kind.
    ///
    /// Attributes are applied directly; the style (if any) is adopted
    /// through [`NodeKind::normalize_style`]; a missing style becomes an
    /// empty bag; finally keys of `default_style` are filled in wherever the
    /// caller's style lacks them under the options' [`DefaultMerge`] rule.
    ///
    /// [`DefaultMerge`]: crate::style::DefaultMerge
    ///
    /// # Errors
    ///
    /// Propagates the kind's style-normalization error.
    pub fn with_kind(
        kind: impl NodeKind + 'static,
        options: DisplayableOptions,
        default_style: Option<&Style>,
    ) -> Result<Self, Error> {
        let DisplayableOptions {
            style,
            attrs,
            clip_paths,
            hooks,
            default_merge,
        } = options;

        let mut node = Self {
            element: Element::new(),
            style: Style::new(),
            dirty: DirtyState::new(),
            invisible: false,
            z_level: 0.0,
            z: 0.0,
            z2: 0.0,
            culling: false,
            cursor: DEFAULT_CURSOR.into(),
            rect_hover: false,
            incremental: false,
            clip_paths,
            hover_mirror: None,
            source_of: None,
            backend_handle: None,
            hooks,
            kind: Box::new(kind),
        };

        for attr in attrs {
            node.apply_attr(attr);
        }

        if let Some(raw) = &style {
            node.adopt_style(raw.clone())?;
        }

        if let Some(defaults) = default_style {
            node.style.fill_missing(style.as_ref(), defaults, default_merge);
            node.mark_style_dirty();
        }

        Ok(node)
    }

    /// Returns the node kind.
    #[must_use]
    pub fn kind(&self) -> &dyn NodeKind {
        &*self.kind
    }

    // -- Element --

    /// Returns the graph-node part.
    #[inline]
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Returns the graph-node part mutably.
    #[inline]
    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    /// Returns whether the node needs a repaint.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.element.is_dirty()
    }

    /// Flags the node as needing a repaint.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.element.mark_dirty();
    }

    /// Sets a string-keyed attribute (see [`Attr::parse`]) and marks the
    /// node dirty.
    pub fn attr(&mut self, key: &str, value: impl Into<Value>) {
        self.apply_attr(Attr::parse(key, value.into()));
    }

    /// Applies a typed attribute.
    pub fn apply_attr(&mut self, attr: Attr) {
        let placement = *self.element.placement();
        match attr {
            Attr::Invisible(v) => self.invisible = v,
            Attr::ZLevel(v) => self.z_level = v,
            Attr::Z(v) => self.z = v,
            Attr::Z2(v) => self.z2 = v,
            Attr::Culling(v) => self.culling = v,
            Attr::Cursor(v) => self.cursor = v,
            Attr::RectHover(v) => self.rect_hover = v,
            Attr::Incremental(v) => self.incremental = v,
            Attr::BackendHandle(v) => self.backend_handle = Some(v),
            Attr::X(x) => self.set_placement(Transformable { x, ..placement }),
            Attr::Y(y) => self.set_placement(Transformable { y, ..placement }),
            Attr::Rotation(rotation) => self.set_placement(Transformable {
                rotation,
                ..placement
            }),
            Attr::ScaleX(scale_x) => self.set_placement(Transformable {
                scale_x,
                ..placement
            }),
            Attr::ScaleY(scale_y) => self.set_placement(Transformable {
                scale_y,
                ..placement
            }),
            Attr::OriginX(x) => self.set_placement(Transformable {
                origin: Point::new(x, placement.origin.y),
                ..placement
            }),
            Attr::OriginY(y) => self.set_placement(Transformable {
                origin: Point::new(placement.origin.x, y),
                ..placement
            }),
            Attr::Other(key, value) => self.element.set_attr(key, value),
        }
        self.mark_dirty();
    }

    /// Replaces the node's placement.
    pub fn set_placement(&mut self, placement: Transformable) {
        self.element.set_placement(placement);
    }

    // -- Style store --

    /// Returns the style bag.
    #[inline]
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Replaces the whole style bag with the kind's normalization of `style`.
    ///
    /// Nothing is merged with the previous bag.
    ///
    /// # Errors
    ///
    /// Returns the kind's error (for the bare node,
    /// [`Error::StyleNotImplemented`]) before any state changes.
    pub fn adopt_style(&mut self, style: Style) -> Result<(), Error> {
        self.style = self.kind.normalize_style(style)?;
        self.mark_style_dirty();
        Ok(())
    }

    /// Writes one style key and invalidates.
    pub fn set_style(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let _ = self.style.set(key, value);
        self.mark_style_dirty();
    }

    /// Writes several style keys and invalidates once.
    pub fn set_styles<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.style.extend(entries);
        self.mark_style_dirty();
    }

    /// Marks style resources stale, requests a repaint, and empties the
    /// bounds cache.
    pub fn mark_style_dirty(&mut self) {
        self.dirty.mark_style();
        self.element.mark_dirty();
    }

    /// Returns whether the backend still has to resync style resources.
    #[inline]
    #[must_use]
    pub fn is_style_dirty(&self) -> bool {
        self.dirty.is_style_dirty()
    }

    /// Clears the style-dirty flag. Called by the backend after resyncing.
    #[inline]
    pub fn clear_style_dirty(&mut self) {
        self.dirty.clear_style();
    }

    // -- Bounds and hit testing --

    /// Returns the local bounding rectangle, computing it if the cache is
    /// empty.
    #[must_use]
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.dirty
            .bounds_or_insert_with(|| self.kind.bounding_rect(&self.style))
    }

    /// Returns the cached bounding rectangle without computing it. `None`
    /// means the cache is empty and must be recomputed.
    #[inline]
    #[must_use]
    pub fn cached_bounding_rect(&self) -> Option<Rect> {
        self.dirty.cached_bounds()
    }

    /// Empties the bounds cache without touching any other flag.
    ///
    /// Node kinds call this when their own geometry changes.
    pub fn invalidate_bounds(&mut self) {
        self.dirty.invalidate_bounds();
    }

    /// Returns whether the world-space `point` falls inside the node's
    /// bounding rectangle.
    #[must_use]
    pub fn rect_contains(&self, point: Point) -> bool {
        let local = self.element.transform_point_to_local(point);
        self.bounding_rect()
            .is_some_and(|rect| rect.contains(local))
    }

    /// Returns whether the world-space `point` hits the node's shape.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.kind.contains(self, point)
    }

    /// Hit test as used for pointer events: the rectangle when
    /// [`rect_hover`](Self::rect_hover) is set, the shape otherwise.
    #[must_use]
    pub fn hit(&self, point: Point) -> bool {
        if self.rect_hover {
            self.rect_contains(point)
        } else {
            self.contains(point)
        }
    }

    // -- Paint attributes --

    /// Returns whether painting is skipped. Invisible nodes still hit-test.
    #[inline]
    #[must_use]
    pub fn invisible(&self) -> bool {
        self.invisible
    }

    /// Sets `invisible`.
    pub fn set_invisible(&mut self, invisible: bool) {
        self.invisible = invisible;
        self.mark_dirty();
    }

    /// Returns the coarse paint layer.
    #[inline]
    #[must_use]
    pub fn z_level(&self) -> f64 {
        self.z_level
    }

    /// Sets the coarse paint layer.
    pub fn set_z_level(&mut self, z_level: f64) {
        self.z_level = z_level;
        self.mark_dirty();
    }

    /// Returns `z`.
    #[inline]
    #[must_use]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Sets `z`.
    pub fn set_z(&mut self, z: f64) {
        self.z = z;
        self.mark_dirty();
    }

    /// Returns `z2`.
    #[inline]
    #[must_use]
    pub fn z2(&self) -> f64 {
        self.z2
    }

    /// Sets `z2`.
    pub fn set_z2(&mut self, z2: f64) {
        self.z2 = z2;
        self.mark_dirty();
    }

    /// Returns the `(z_level, z, z2)` paint-order key.
    ///
    /// Compare keys with [`f64::total_cmp`] per component.
    #[inline]
    #[must_use]
    pub fn paint_order(&self) -> (f64, f64, f64) {
        (self.z_level, self.z, self.z2)
    }

    /// Returns whether the backend may skip the node when off screen.
    #[inline]
    #[must_use]
    pub fn culling(&self) -> bool {
        self.culling
    }

    /// Sets `culling`.
    pub fn set_culling(&mut self, culling: bool) {
        self.culling = culling;
        self.mark_dirty();
    }

    /// Returns the cursor label.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    /// Sets the cursor label.
    pub fn set_cursor(&mut self, cursor: impl Into<String>) {
        self.cursor = cursor.into();
        self.mark_dirty();
    }

    /// Returns whether pointer hits use the bounding rectangle only.
    #[inline]
    #[must_use]
    pub fn rect_hover(&self) -> bool {
        self.rect_hover
    }

    /// Sets `rect_hover`.
    pub fn set_rect_hover(&mut self, rect_hover: bool) {
        self.rect_hover = rect_hover;
        self.mark_dirty();
    }

    /// Returns whether the node is painted progressively.
    #[inline]
    #[must_use]
    pub fn incremental(&self) -> bool {
        self.incremental
    }

    /// Sets `incremental`.
    pub fn set_incremental(&mut self, incremental: bool) {
        self.incremental = incremental;
        self.mark_dirty();
    }

    /// Returns the clip paths, if any.
    #[inline]
    #[must_use]
    pub fn clip_paths(&self) -> Option<&ClipPaths> {
        self.clip_paths.as_ref()
    }

    /// Sets the clip paths; an empty list removes clipping.
    pub fn set_clip_paths(&mut self, paths: Vec<NodeId>) {
        self.clip_paths = ClipPaths::new(paths);
        self.mark_dirty();
    }

    /// Removes clipping, returning the previous clip paths.
    pub fn take_clip_paths(&mut self) -> Option<ClipPaths> {
        let old = self.clip_paths.take();
        self.mark_dirty();
        old
    }

    /// Returns the backend handle slot.
    #[inline]
    #[must_use]
    pub fn backend_handle(&self) -> Option<BackendHandle> {
        self.backend_handle
    }

    /// Sets the backend handle slot. Does not request a repaint.
    pub fn set_backend_handle(&mut self, handle: Option<BackendHandle>) {
        self.backend_handle = handle;
    }

    /// Returns the hover proxy drawn in place of this node, if linked.
    ///
    /// Prefer [`Scene::hover_mirror`](crate::scene::Scene::hover_mirror),
    /// which filters out removed nodes.
    #[inline]
    #[must_use]
    pub fn hover_mirror(&self) -> Option<NodeId> {
        self.hover_mirror
    }

    /// Returns the node this one is a hover proxy of, if linked.
    #[inline]
    #[must_use]
    pub fn source_of(&self) -> Option<NodeId> {
        self.source_of
    }

    // -- Lifecycle hooks --

    /// Returns the public hook callbacks.
    #[must_use]
    pub fn hooks(&self) -> &DrawHooks {
        &self.hooks
    }

    /// Installs the callback for a public hook.
    ///
    /// # Panics
    ///
    /// Panics for the inner hooks, which belong to the node kind.
    pub fn set_hook(&mut self, hook: DrawHook, callback: HookFn) {
        self.hooks.set(hook, callback);
    }

    /// Runs one hook. Hooks without an implementation do nothing.
    pub fn run_hook(&self, hook: DrawHook) {
        match hook {
            DrawHook::InnerBeforeDraw => self.kind.inner_before_draw(self),
            DrawHook::InnerAfterDraw => self.kind.inner_after_draw(self),
            DrawHook::BeforeDraw | DrawHook::AfterDraw => {
                if let Some(callback) = self.hooks.get(hook) {
                    callback(self);
                }
            }
        }
    }

    /// Runs the full hook sequence around `paint`.
    pub fn draw_with<R>(&self, paint: impl FnOnce(&Self) -> R) -> R {
        for hook in DrawHook::BEFORE_PAINT {
            self.run_hook(hook);
        }
        let out = paint(self);
        for hook in DrawHook::AFTER_PAINT {
            self.run_hook(hook);
        }
        out
    }

    // -- Animation --

    /// Asks `animator` to animate the style bag.
    pub fn animate_style(&self, animator: &mut dyn Animator, looping: bool) {
        self.element.animate(animator, STYLE_KEY, looping);
    }

    /// Reacts to the animation system having written the sub-object
    /// `target_key`.
    pub fn on_animation_frame(&mut self, target_key: &str) {
        if target_key == STYLE_KEY {
            self.mark_style_dirty();
        } else {
            self.mark_dirty();
        }
    }

    /// Gives the animation system write access to the style bag, then
    /// invalidates as if the keys had been set directly.
    pub fn animate_style_frame(&mut self, write: impl FnOnce(&mut Style)) {
        write(&mut self.style);
        self.on_animation_frame(STYLE_KEY);
    }
}
