//! Compatibility records, lookup queries and result rows

use std::fmt;

use serde::{Serialize, Serializer};

use crate::version::normalize_version;

/// Compatibility status of a library version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Numeric status code from the database
    Code(i64),
    /// Status column that did not parse as an integer (raw text kept)
    Invalid(String),
    /// The library is known but this version has no record
    Unknown,
    /// The library has no records at all
    NotYetTested,
}

impl Status {
    /// Parse the status column of a database row
    pub fn parse(text: &str) -> Self {
        text.trim()
            .parse::<i64>()
            .map_or_else(|_| Status::Invalid(text.to_string()), Status::Code)
    }

    /// Human-readable meaning of a status
    pub fn describe(&self) -> &'static str {
        match self {
            Status::Code(0) => "passes",
            Status::Code(1) => "installs but fails tests",
            Status::Code(2) => "fails to install",
            Status::Code(3) => "unsupported",
            Status::Code(_) => "unrecognized status code",
            Status::Invalid(_) => "invalid status",
            Status::Unknown => "unknown",
            Status::NotYetTested => "library not yet tested",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Code(code) => write!(f, "{code}"),
            Status::Invalid(raw) => f.write_str(raw),
            Status::Unknown => f.write_str("unknown"),
            Status::NotYetTested => f.write_str("library not yet tested"),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Status::Code(code) => serializer.serialize_i64(*code),
            other => serializer.collect_str(other),
        }
    }
}

/// One row of the compatibility database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityRecord {
    pub name: String,
    /// Normalized version (leading `v` stripped)
    pub version: String,
    pub status: Status,
    /// Pass percentage or free-form notes, carried through unchanged
    pub notes: Option<String>,
}

impl CompatibilityRecord {
    pub fn new(name: &str, version: &str, status_text: &str, notes: &str) -> Self {
        Self {
            name: name.to_string(),
            version: normalize_version(Some(version)).unwrap_or_default(),
            status: Status::parse(status_text),
            notes: Some(notes.to_string()),
        }
    }
}

/// A dependency to look up, as extracted from a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedModule {
    pub name: String,
    /// Normalized requested version; `None` asks for every known version
    pub version: Option<String>,
}

impl RequestedModule {
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            version: normalize_version(version),
        }
    }
}

/// One line of a compatibility report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupRow {
    pub name: String,
    pub version: String,
    pub status: Status,
    pub notes: Option<String>,
}

impl LookupRow {
    /// Row for a library absent from the database
    pub fn not_yet_tested(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: "*".to_string(),
            status: Status::NotYetTested,
            notes: None,
        }
    }

    /// Row for a known library whose requested version has no record
    pub fn unknown(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            status: Status::Unknown,
            notes: None,
        }
    }
}

impl From<&CompatibilityRecord> for LookupRow {
    fn from(record: &CompatibilityRecord) -> Self {
        Self {
            name: record.name.clone(),
            version: record.version.clone(),
            status: record.status.clone(),
            notes: record.notes.clone(),
        }
    }
}

impl fmt::Display for LookupRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.name,
            self.version,
            self.status,
            self.notes.as_deref().unwrap_or("")
        )
    }
}
