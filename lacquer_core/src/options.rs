// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options for [`Displayable`].

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::attr::Attr;
use crate::clip::ClipPaths;
use crate::displayable::Displayable;
use crate::hooks::DrawHooks;
use crate::id::{BackendHandle, NodeId};
use crate::style::{DefaultMerge, Style};
use crate::value::Value;

/// Everything a [`Displayable`] can be constructed with.
///
/// Attributes are applied in the order they were added, so a later
/// `z(3)` wins over an earlier `attr("z", 1.0)`.
///
/// ```
/// use lacquer_core::options::DisplayableOptions;
/// use lacquer_core::style::Style;
///
/// let options = DisplayableOptions::new()
///     .z_level(1.0)
///     .z2(10.0)
///     .cursor("crosshair")
///     .attr("zlevel", 2.0)
///     .style(Style::from_iter([("fill", "red")]));
/// # let _ = options;
/// ```
#[derive(Debug, Default)]
pub struct DisplayableOptions {
    pub(crate) style: Option<Style>,
    pub(crate) attrs: Vec<Attr>,
    pub(crate) clip_paths: Option<ClipPaths>,
    pub(crate) hooks: DrawHooks,
    pub(crate) default_merge: DefaultMerge,
}

impl DisplayableOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw style bag, adopted through the node kind's policy.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Adds a string-keyed attribute (see [`Attr::parse`]).
    #[must_use]
    pub fn attr(self, key: &str, value: impl Into<Value>) -> Self {
        self.with(Attr::parse(key, value.into()))
    }

    /// Adds a typed attribute.
    #[must_use]
    pub fn with(mut self, attr: Attr) -> Self {
        self.attrs.push(attr);
        self
    }

    /// Sets `invisible`.
    #[must_use]
    pub fn invisible(self, invisible: bool) -> Self {
        self.with(Attr::Invisible(invisible))
    }

    /// Sets the coarse paint layer.
    #[must_use]
    pub fn z_level(self, z_level: f64) -> Self {
        self.with(Attr::ZLevel(z_level))
    }

    /// Sets `z`.
    #[must_use]
    pub fn z(self, z: f64) -> Self {
        self.with(Attr::Z(z))
    }

    /// Sets `z2`.
    #[must_use]
    pub fn z2(self, z2: f64) -> Self {
        self.with(Attr::Z2(z2))
    }

    /// Sets `culling`.
    #[must_use]
    pub fn culling(self, culling: bool) -> Self {
        self.with(Attr::Culling(culling))
    }

    /// Sets the pointer cursor label.
    #[must_use]
    pub fn cursor(self, cursor: impl Into<String>) -> Self {
        self.with(Attr::Cursor(cursor.into()))
    }

    /// Sets `rect_hover`.
    #[must_use]
    pub fn rect_hover(self, rect_hover: bool) -> Self {
        self.with(Attr::RectHover(rect_hover))
    }

    /// Sets `incremental`.
    #[must_use]
    pub fn incremental(self, incremental: bool) -> Self {
        self.with(Attr::Incremental(incremental))
    }

    /// Sets the backend handle slot.
    #[must_use]
    pub fn backend_handle(self, handle: BackendHandle) -> Self {
        self.with(Attr::BackendHandle(handle))
    }

    /// Sets the translation.
    #[must_use]
    pub fn position(self, x: f64, y: f64) -> Self {
        self.with(Attr::X(x)).with(Attr::Y(y))
    }

    /// Sets the clip paths; an empty list means no clipping.
    #[must_use]
    pub fn clip_paths(mut self, paths: Vec<NodeId>) -> Self {
        self.clip_paths = ClipPaths::new(paths);
        self
    }

    /// Installs the public `BeforeDraw` callback.
    #[must_use]
    pub fn before_draw(mut self, callback: impl Fn(&Displayable) + 'static) -> Self {
        self.hooks.before_draw = Some(Box::new(callback));
        self
    }

    /// Installs the public `AfterDraw` callback.
    #[must_use]
    pub fn after_draw(mut self, callback: impl Fn(&Displayable) + 'static) -> Self {
        self.hooks.after_draw = Some(Box::new(callback));
        self
    }

    /// Chooses how the default style fills gaps in the caller's style.
    #[must_use]
    pub fn default_merge(mut self, rule: DefaultMerge) -> Self {
        self.default_merge = rule;
        self
    }
}
