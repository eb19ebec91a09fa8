/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/3/26
******************************************************************************/

//! Shared scalar types for the IronHL7 runtime.
//!
//! This module provides:
//! - [`Version`]: Supported HL7 v2.x versions
//! - [`TableId`]: Type-safe wrapper for HL7 vocabulary table numbers
//! - [`EncodingCharacters`]: The per-message delimiter set

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HL7 v2.x version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    /// HL7 v2.5
    V25,
    /// HL7 v2.5.1
    V251,
    /// HL7 v2.6
    V26,
    /// HL7 v2.7
    V27,
    /// HL7 v2.7.1
    V271,
    /// HL7 v2.8
    V28,
}

impl Version {
    /// Returns the version identifier as transmitted in MSH-12.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V25 => "2.5",
            Self::V251 => "2.5.1",
            Self::V26 => "2.6",
            Self::V27 => "2.7",
            Self::V271 => "2.7.1",
            Self::V28 => "2.8",
        }
    }
}

impl std::str::FromStr for Version {
    type Err = SchemaError;

    /// Creates a Version from an MSH-12 version string.
    ///
    /// # Arguments
    /// * `s` - The version string (e.g., "2.7.1")
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownVersion`] for unsupported versions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "2.5" => Self::V25,
            "2.5.1" => Self::V251,
            "2.6" => Self::V26,
            "2.7" => Self::V27,
            "2.7.1" => Self::V271,
            "2.8" => Self::V28,
            other => {
                return Err(SchemaError::UnknownVersion {
                    name: other.to_string(),
                });
            }
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HL7 vocabulary table number.
///
/// Coded fields (ID, IS, CWE) may be bound to an external vocabulary table
/// identified by number, e.g. table 0136 (Yes/No Indicator) or table 0399
/// (Country Code). The runtime carries the binding; it does not carry the
/// table contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct TableId(u16);

impl TableId {
    /// Creates a new table identifier.
    ///
    /// # Arguments
    /// * `id` - The table number (must be > 0)
    #[inline]
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw table number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl From<u16> for TableId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<TableId> for u16 {
    fn from(id: TableId) -> Self {
        id.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// The per-message delimiter set (MSH-1 and MSH-2).
///
/// The runtime does not perform delimiter-aware encoding itself; it carries
/// the active delimiters as shared message context so that a wire-level
/// codec layered on top can reach them through any structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingCharacters {
    /// Field separator (MSH-1), conventionally `|`.
    pub field: char,
    /// Component separator, conventionally `^`.
    pub component: char,
    /// Repetition separator, conventionally `~`.
    pub repetition: char,
    /// Escape character, conventionally `\`.
    pub escape: char,
    /// Subcomponent separator, conventionally `&`.
    pub subcomponent: char,
}

impl EncodingCharacters {
    /// Returns the standard `|^~\&` delimiter set.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Default for EncodingCharacters {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for EncodingCharacters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.field, self.component, self.repetition, self.escape, self.subcomponent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_as_str() {
        assert_eq!(Version::V27.as_str(), "2.7");
        assert_eq!(Version::V271.as_str(), "2.7.1");
        assert_eq!(Version::V28.as_str(), "2.8");
    }

    #[test]
    fn test_version_from_str() {
        assert_eq!("2.7".parse::<Version>().unwrap(), Version::V27);
        assert_eq!("2.8".parse::<Version>().unwrap(), Version::V28);
        assert!(matches!(
            "3.0".parse::<Version>(),
            Err(SchemaError::UnknownVersion { .. })
        ));
    }

    #[test]
    fn test_table_id() {
        let table = TableId::new(136);
        assert_eq!(table.value(), 136);
        assert_eq!(table.to_string(), "0136");
    }

    #[test]
    fn test_encoding_characters_standard() {
        let enc = EncodingCharacters::standard();
        assert_eq!(enc.to_string(), "|^~\\&");
        assert_eq!(enc, EncodingCharacters::default());
    }
}
