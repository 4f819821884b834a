// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style property bag and its default-merge rule.
//!
//! A [`Style`] holds visual attributes (fill, stroke, line width, font, ...)
//! separately from geometry. Which keys are meaningful is decided by the
//! node's [`NodeKind`](crate::kind::NodeKind) when a bag is adopted; the bag
//! itself accepts any key.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;

use crate::value::Value;

/// Key under which animation systems address the style sub-object.
pub const STYLE_KEY: &str = "style";

/// How [`Style::fill_missing`] decides that a caller value is "missing".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DefaultMerge {
    /// A caller value that is absent *or falsy* is replaced by the default.
    ///
    /// This is the classic rule: `{fill: ""}` merged with a default fill
    /// ends up with the default fill.
    #[default]
    Truthy,
    /// Only absent keys are filled; explicit falsy values are kept.
    Presence,
}

/// An ordered map from style key to [`Value`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    entries: BTreeMap<String, Value>,
}

impl Style {
    /// Creates an empty style bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    ///
    /// This is a raw write; it does not mark any node dirty. Use
    /// [`Displayable::set_style`](crate::displayable::Displayable::set_style)
    /// on a live node.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Returns whether `key` is present (regardless of its value).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the bag has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Returns the number stored under `key`, if any.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    /// Returns the string stored under `key`, if any.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    /// Returns the flag stored under `key`, if any.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Returns whether `key` holds a truthy value.
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(Value::is_truthy)
    }

    /// Fills keys from `defaults` into `self` wherever the caller-supplied
    /// bag `given` is missing them under `rule`.
    ///
    /// Only top-level keys are considered; values are cloned, never merged.
    /// `given` is the bag the caller originally passed in (before any
    /// normalization), so a normalizer that injects its own values does not
    /// block defaults.
    pub fn fill_missing(&mut self, given: Option<&Self>, defaults: &Self, rule: DefaultMerge) {
        for (key, value) in defaults.iter() {
            let supplied = given.and_then(|g| g.get(key));
            let missing = match rule {
                DefaultMerge::Truthy => !supplied.is_some_and(Value::is_truthy),
                DefaultMerge::Presence => supplied.is_none(),
            };
            if missing {
                self.entries.insert(key.clone(), value.clone());
            }
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Style {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.entries.insert(k.into(), v.into());
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Self::new();
        style.extend(iter);
        style
    }
}

impl<'a> IntoIterator for &'a Style {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Style {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Style {
        Style::from_iter([("fill", "red"), ("stroke", "blue")])
    }

    #[test]
    fn set_overwrites_per_key() {
        let mut style = Style::new();
        assert_eq!(style.set("lineWidth", 1.0), None);
        assert_eq!(style.set("lineWidth", 2.0), Some(Value::Number(1.0)));
        assert_eq!(style.number("lineWidth"), Some(2.0));
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn truthy_caller_value_is_never_overwritten() {
        let given = Style::from_iter([("fill", "green")]);
        let mut style = given.clone();
        style.fill_missing(Some(&given), &defaults(), DefaultMerge::Truthy);
        assert_eq!(style.text("fill"), Some("green"));
        assert_eq!(style.text("stroke"), Some("blue"));
    }

    #[test]
    fn falsy_caller_value_is_filled_under_truthy_rule() {
        let given = Style::from_iter([("fill", "")]);
        let mut style = given.clone();
        style.fill_missing(Some(&given), &defaults(), DefaultMerge::Truthy);
        assert_eq!(style.text("fill"), Some("red"));
        assert_eq!(style.text("stroke"), Some("blue"));
    }

    #[test]
    fn falsy_caller_value_is_kept_under_presence_rule() {
        let given = Style::from_iter([("fill", "")]);
        let mut style = given.clone();
        style.fill_missing(Some(&given), &defaults(), DefaultMerge::Presence);
        assert_eq!(style.text("fill"), Some(""));
        assert_eq!(style.text("stroke"), Some("blue"));
    }

    #[test]
    fn zero_counts_as_missing_under_truthy_rule() {
        let given = Style::from_iter([("opacity", 0.0)]);
        let defaults = Style::from_iter([("opacity", 1.0)]);
        let mut style = given.clone();
        style.fill_missing(Some(&given), &defaults, DefaultMerge::Truthy);
        assert_eq!(style.number("opacity"), Some(1.0));
    }

    #[test]
    fn no_caller_bag_takes_every_default() {
        let mut style = Style::new();
        style.fill_missing(None, &defaults(), DefaultMerge::Truthy);
        assert_eq!(style, defaults());
    }
}
