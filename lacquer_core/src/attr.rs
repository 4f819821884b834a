// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! String-keyed attribute dispatch.
//!
//! Attributes can arrive as `(key, value)` pairs from configuration or
//! animation code. [`Attr::parse`] maps each recognized key (including the
//! legacy aliases `zlevel` and `__svgEl`) onto a typed variant; anything
//! else becomes [`Attr::Other`] and is kept verbatim on the element.

use alloc::string::String;

use crate::id::BackendHandle;
use crate::value::Value;

/// A typed node attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Attr {
    /// `invisible`: skip painting, keep hit testing.
    Invisible(bool),
    /// `zLevel` / `zlevel`: coarse paint layer.
    ZLevel(f64),
    /// `z`: paint order within a layer.
    Z(f64),
    /// `z2`: tiebreak after `z`.
    Z2(f64),
    /// `culling`: allow the backend to skip off-screen painting.
    Culling(bool),
    /// `cursor`: pointer cursor label.
    Cursor(String),
    /// `rectHover`: hit-test against the bounding rect only.
    RectHover(bool),
    /// `incremental`: paint progressively across frames.
    Incremental(bool),
    /// `backendHandle` / `__svgEl`: backend-owned element slot.
    BackendHandle(BackendHandle),
    /// `x`: translation along x.
    X(f64),
    /// `y`: translation along y.
    Y(f64),
    /// `rotation`: rotation in radians.
    Rotation(f64),
    /// `scaleX`: horizontal scale.
    ScaleX(f64),
    /// `scaleY`: vertical scale.
    ScaleY(f64),
    /// `originX`: rotation/scale origin x.
    OriginX(f64),
    /// `originY`: rotation/scale origin y.
    OriginY(f64),
    /// Any unrecognized key, or a recognized key with an unusable value.
    Other(String, Value),
}

impl Attr {
    /// Parses a `(key, value)` pair.
    ///
    /// Boolean attributes use truthiness. Numeric attributes require a
    /// [`Value::Number`]; any other value is kept verbatim as
    /// [`Attr::Other`].
    #[must_use]
    pub fn parse(key: &str, value: Value) -> Self {
        let number = value.as_number();
        match (key, number) {
            ("invisible", _) => Self::Invisible(value.is_truthy()),
            ("culling", _) => Self::Culling(value.is_truthy()),
            ("rectHover", _) => Self::RectHover(value.is_truthy()),
            ("incremental", _) => Self::Incremental(value.is_truthy()),
            ("cursor", _) => match value {
                Value::Text(s) => Self::Cursor(s),
                other => Self::Other(key.into(), other),
            },
            ("zLevel" | "zlevel", Some(n)) => Self::ZLevel(n),
            ("z", Some(n)) => Self::Z(n),
            ("z2", Some(n)) => Self::Z2(n),
            ("backendHandle" | "__svgEl", Some(n)) if n >= 0.0 => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "backend handles are non-negative integers"
                )]
                let raw = n as u64;
                Self::BackendHandle(BackendHandle(raw))
            }
            ("x", Some(n)) => Self::X(n),
            ("y", Some(n)) => Self::Y(n),
            ("rotation", Some(n)) => Self::Rotation(n),
            ("scaleX", Some(n)) => Self::ScaleX(n),
            ("scaleY", Some(n)) => Self::ScaleY(n),
            ("originX", Some(n)) => Self::OriginX(n),
            ("originY", Some(n)) => Self::OriginY(n),
            _ => Self::Other(key.into(), value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_the_same_attr() {
        assert_eq!(Attr::parse("zLevel", 2.0.into()), Attr::ZLevel(2.0));
        assert_eq!(Attr::parse("zlevel", 2.0.into()), Attr::ZLevel(2.0));
        assert_eq!(
            Attr::parse("__svgEl", 7.0.into()),
            Attr::BackendHandle(BackendHandle(7))
        );
        assert_eq!(
            Attr::parse("backendHandle", 7.0.into()),
            Attr::BackendHandle(BackendHandle(7))
        );
    }

    #[test]
    fn flags_use_truthiness() {
        assert_eq!(Attr::parse("invisible", 1.0.into()), Attr::Invisible(true));
        assert_eq!(Attr::parse("culling", "".into()), Attr::Culling(false));
    }

    #[test]
    fn unrecognized_keys_are_kept_verbatim() {
        assert_eq!(
            Attr::parse("seriesIndex", 3.0.into()),
            Attr::Other("seriesIndex".into(), Value::Number(3.0))
        );
    }

    #[test]
    fn mistyped_numeric_key_is_kept_verbatim() {
        assert_eq!(
            Attr::parse("z", "top".into()),
            Attr::Other("z".into(), Value::from("top"))
        );
    }

    #[test]
    fn fractional_order_is_kept() {
        assert_eq!(Attr::parse("z", 0.5.into()), Attr::Z(0.5));
        assert_eq!(Attr::parse("z2", (-3.9).into()), Attr::Z2(-3.9));
    }
}
