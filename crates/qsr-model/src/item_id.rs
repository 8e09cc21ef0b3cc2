//! Validated Kissflow item identifiers

use std::fmt;
use std::str::FromStr;

/// Literal prefix every item id must start with
pub const ITEM_ID_PREFIX: &str = "KFF-";

/// Reasons an item id is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ItemIdError {
    /// Empty or whitespace-only input
    #[error("Item ID is required")]
    Empty,

    /// Missing `KFF-` prefix
    #[error("Invalid Item ID format. Must start with 'KFF-'")]
    InvalidFormat,
}

/// Kissflow item identifier, guaranteed to start with `KFF-`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Validate a caller-supplied identifier
    ///
    /// Emptiness is judged after trimming; the prefix check applies to the
    /// raw input, so leading whitespace is rejected.
    pub fn parse(raw: &str) -> Result<Self, ItemIdError> {
        if raw.trim().is_empty() {
            return Err(ItemIdError::Empty);
        }
        if !raw.starts_with(ITEM_ID_PREFIX) {
            return Err(ItemIdError::InvalidFormat);
        }
        Ok(Self(raw.to_string()))
    }

    /// Identifier as passed by the caller
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemId {
    type Err = ItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
