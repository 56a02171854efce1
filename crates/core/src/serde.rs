//! Serde helper functions for persisted recipe data.
//!
//! Stored documents written by older tooling may carry `null` where a list is
//! expected. These helpers normalize such values so that decoded sequences are
//! never absent.

use serde::{Deserialize, Deserializer};

/// Deserialize a list of strings, treating `null` as an empty list.
///
/// Combine with `#[serde(default)]` to also accept a missing field.
pub fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(values.unwrap_or_default())
}
