// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for node construction and style adoption.

use alloc::string::String;
use core::fmt;

/// Errors from [`Displayable`](crate::displayable::Displayable) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The node kind has no style-normalization policy, so a raw style bag
    /// cannot be adopted.
    StyleNotImplemented {
        /// Name of the node kind.
        kind: &'static str,
    },
    /// A style-normalization policy rejected a key.
    InvalidStyle {
        /// The rejected style key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StyleNotImplemented { kind } => {
                write!(f, "adopting a style is not implemented for `{kind}` nodes")
            }
            Self::InvalidStyle { key, reason } => write!(f, "invalid style `{key}`: {reason}"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages_name_the_culprit() {
        let err = Error::StyleNotImplemented { kind: "displayable" };
        assert_eq!(
            err.to_string(),
            "adopting a style is not implemented for `displayable` nodes"
        );
        let err = Error::InvalidStyle {
            key: "lineWidth".into(),
            reason: "expected a number",
        };
        assert_eq!(err.to_string(), "invalid style `lineWidth`: expected a number");
    }
}
