//! Pallet color handling
//!
//! This module provides the [`PalletColor`] type which validates a CSS color
//! string with the `color` crate while keeping the string exactly as the
//! configuration supplied it, so rendering clients receive it untouched.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use color::DynamicColor;
use serde::{Serialize, Serializer};

/// Color applied to pallets that do not declare one.
pub const DEFAULT_PALLET_COLOR: &str = "#8B4513";

/// A validated CSS color string attached to a pallet.
///
/// Only the string is kept; the parsed color is discarded once validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PalletColor {
    source: String,
}

impl PalletColor {
    /// Create a new `PalletColor` from a CSS color string such as "#8b4513",
    /// "rgb(139, 69, 19)" or "saddlebrown".
    ///
    /// # Examples
    ///
    /// ```
    /// use rackyard_core::color::PalletColor;
    ///
    /// let brown = PalletColor::new("#8B4513").unwrap();
    /// assert_eq!(brown.as_str(), "#8B4513");
    /// assert!(PalletColor::new("plaid").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let trimmed = color_str.trim();
        match DynamicColor::from_str(trimmed) {
            Ok(_) => Ok(Self {
                source: trimmed.to_string(),
            }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the color string as supplied.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for PalletColor {
    fn default() -> Self {
        Self::new(DEFAULT_PALLET_COLOR).expect("default pallet color is a valid CSS color")
    }
}

impl Display for PalletColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl Serialize for PalletColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}
