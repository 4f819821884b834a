// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamically typed attribute and style values.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// A single value stored in a [`Style`](crate::style::Style) or in an
/// element's overflow attributes.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// An explicit "no value".
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A number (widths, opacities, font sizes, ...).
    Number(f64),
    /// A string (colors, font families, cursor names, ...).
    Text(String),
    /// An ordered sequence, such as a line dash pattern.
    List(Vec<Self>),
    /// A keyed record, such as a gradient or shadow description.
    Map(BTreeMap<String, Self>),
}

impl Value {
    /// Returns whether the value counts as "set" for default merging.
    ///
    /// `Null`, `false`, `0`, `NaN` and the empty string are falsy. Lists and
    /// maps are truthy even when empty.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::List(_) | Self::Map(_) => true,
        }
    }

    /// Returns the number, if this is a [`Value::Number`].
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string, if this is a [`Value::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items, if this is a [`Value::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries, if this is a [`Value::Map`].
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the flag, if this is a [`Value::Bool`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(entries: BTreeMap<String, Self>) -> Self {
        Self::Map(entries)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
    }

    #[test]
    fn truthy_values() {
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(-1.5).is_truthy());
        assert!(Value::from("red").is_truthy());
        assert!(Value::List(Vec::new()).is_truthy());
        assert!(Value::Map(BTreeMap::new()).is_truthy());
    }

    #[test]
    fn lists_convert_item_by_item() {
        let dash = Value::from(alloc::vec![4.0, 2.0]);
        assert_eq!(
            dash.as_list(),
            Some(&[Value::Number(4.0), Value::Number(2.0)][..])
        );
        assert_eq!(dash.as_number(), None);
        assert_eq!(Value::from("x").as_list(), None);
    }

    #[test]
    fn typed_reads_reject_other_variants() {
        assert_eq!(Value::from(2.0).as_number(), Some(2.0));
        assert_eq!(Value::from("2").as_number(), None);
        assert_eq!(Value::from("blue").as_text(), Some("blue"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(None::<f64>), Value::Null);
    }
}
