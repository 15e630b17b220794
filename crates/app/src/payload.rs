//! JSON form of a compressed payload.
//!
//! ```text
//! {
//!   "compressedText": "0110111010...",
//!   "table": [["a", "0"], ["b", "110"], ...]
//! }
//! ```
//!
//! The table is written as ordered `[symbol, code]` pairs so that symbols
//! which are awkward as JSON object keys (whitespace, control characters,
//! non-ASCII) survive unchanged.

use anyhow::{Context, Result};
use huffstring_core::{CodeTable, CompressedPayload};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadDocument {
    pub compressed_text: String,
    pub table: Vec<(char, String)>,
}

impl PayloadDocument {
    pub fn from_payload(payload: &CompressedPayload) -> Self {
        Self {
            compressed_text: payload.bits().to_string(),
            table: payload
                .table()
                .iter()
                .map(|(symbol, code)| (symbol, code.to_string()))
                .collect(),
        }
    }

    /// Rebuild the payload; the table is checked for duplicate symbols here
    /// and for code validity when it is used to decode.
    pub fn into_payload(self) -> Result<CompressedPayload> {
        let table = CodeTable::from_pairs(self.table).context("invalid code table in payload")?;
        Ok(CompressedPayload::new(self.compressed_text, table))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize payload")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse payload JSON")
    }

    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write payload {}", path.display()))
    }
}
