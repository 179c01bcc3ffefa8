use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Kind of generated artifact. Serialized lowercase in the record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Campaign,
    Pitch,
    Lead,
}

impl RecordType {
    pub const ALL: [RecordType; 3] = [RecordType::Campaign, RecordType::Pitch, RecordType::Lead];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Campaign => "campaign",
            RecordType::Pitch => "pitch",
            RecordType::Lead => "lead",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted generated artifact.
///
/// Column order here is the column order of `sales_data.csv`:
/// `type, input, details, output, timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub input: String,
    pub details: String,
    pub output: String,
    /// ISO-8601 local time without offset, e.g. `2026-01-31T09:15:02.123456`.
    pub timestamp: String,
}

impl Record {
    /// Builds a record stamped with the current local time.
    pub fn new(
        record_type: RecordType,
        input: impl Into<String>,
        details: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            record_type,
            input: input.into(),
            details: details.into(),
            output: output.into(),
            timestamp: now_iso8601(),
        }
    }
}

fn now_iso8601() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
