//! Token metadata document for the mint flow.

use crate::attributes::Attribute;
use serde::Serialize;

/// ERC-721/1155 style metadata with OpenSea attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    pub attributes: Vec<Attribute>,
}

impl TokenMetadata {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
