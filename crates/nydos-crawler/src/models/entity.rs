//! Entity identifiers and the detail request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidIdentifier;

/// The registry's internal numeric identifier (`dosID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityIdentifier(u64);

impl EntityIdentifier {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityIdentifier {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for EntityIdentifier {
    type Err = InvalidIdentifier;

    /// Accepts surrounding whitespace; rejects signs, decimals and empty input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidIdentifier::new(s));
        }
        trimmed.parse().map(Self).map_err(|_| InvalidIdentifier::new(s))
    }
}

impl fmt::Display for EntityIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Body of a `GetEntityRecordByID` request.
///
/// The identifier always travels as a quoted decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityRecordRequest {
    /// Identifier being looked up.
    #[serde(rename = "SearchID")]
    pub search_id: String,

    /// Unused by lookups by ID; always empty.
    pub entity_name: String,

    /// Assumed-name lookup flag; always `"false"`.
    pub assumed_name_flag: String,
}

impl EntityRecordRequest {
    /// Lookup of one entity by identifier.
    #[must_use]
    pub fn by_id(id: EntityIdentifier) -> Self {
        Self {
            search_id: id.to_string(),
            entity_name: String::new(),
            assumed_name_flag: "false".to_string(),
        }
    }
}
