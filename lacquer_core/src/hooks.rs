// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw lifecycle hooks.
//!
//! A paint backend brackets every node's draw call with four hooks:
//!
//! ```text
//! BeforeDraw → InnerBeforeDraw → <paint> → InnerAfterDraw → AfterDraw
//! ```
//!
//! The public pair are optional callbacks stored in [`DrawHooks`]; the inner
//! pair belong to the node's [`NodeKind`](crate::kind::NodeKind). The core
//! never paints, it only fixes the names and the order.

use alloc::boxed::Box;
use core::fmt;

use crate::displayable::Displayable;

/// One of the four draw lifecycle points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawHook {
    /// Public hook, first.
    BeforeDraw,
    /// Kind-internal hook, right before painting.
    InnerBeforeDraw,
    /// Kind-internal hook, right after painting.
    InnerAfterDraw,
    /// Public hook, last.
    AfterDraw,
}

impl DrawHook {
    /// Hooks that run before the paint call, in order.
    pub const BEFORE_PAINT: [Self; 2] = [Self::BeforeDraw, Self::InnerBeforeDraw];

    /// Hooks that run after the paint call, in order.
    pub const AFTER_PAINT: [Self; 2] = [Self::InnerAfterDraw, Self::AfterDraw];
}

/// A hook callback.
pub type HookFn = Box<dyn Fn(&Displayable)>;

/// Optional callbacks for the public draw hooks.
#[derive(Default)]
pub struct DrawHooks {
    /// Called first, before anything is painted.
    pub before_draw: Option<HookFn>,
    /// Called last, after everything is painted.
    pub after_draw: Option<HookFn>,
}

impl fmt::Debug for DrawHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawHooks")
            .field("before_draw", &self.before_draw.is_some())
            .field("after_draw", &self.after_draw.is_some())
            .finish()
    }
}

impl DrawHooks {
    /// Returns the callback for a public hook, or `None` for the inner pair.
    #[must_use]
    pub fn get(&self, hook: DrawHook) -> Option<&HookFn> {
        match hook {
            DrawHook::BeforeDraw => self.before_draw.as_ref(),
            DrawHook::AfterDraw => self.after_draw.as_ref(),
            DrawHook::InnerBeforeDraw | DrawHook::InnerAfterDraw => None,
        }
    }

    /// Installs the callback for a public hook.
    ///
    /// # Panics
    ///
    /// Panics if `hook` is one of the inner hooks; those are implemented by
    /// the node kind.
    pub fn set(&mut self, hook: DrawHook, callback: HookFn) {
        match hook {
            DrawHook::BeforeDraw => self.before_draw = Some(callback),
            DrawHook::AfterDraw => self.after_draw = Some(callback),
            DrawHook::InnerBeforeDraw | DrawHook::InnerAfterDraw => {
                panic!("{hook:?} is implemented by the node kind, not a callback")
            }
        }
    }
}
