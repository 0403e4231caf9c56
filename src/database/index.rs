//! In-memory compatibility index
//!
//! Built once from newline-delimited `name,version,status,notes` text and
//! read-only afterwards. Every record is reachable under its literal version
//! and under its `~> major.minor` bucket, so an untested patch release falls
//! back to a tested one of the same line.
//!
//! When the same `name,version` appears twice, the [`MergePolicy`] decides;
//! the default is last-write-wins.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::database::error::DatabaseError;
use crate::database::record::{CompatibilityRecord, LookupRow, RequestedModule, Status};
use crate::parser::types::Language;
use crate::version::bucket::{approximate_bucket, is_bucket_key};
use crate::version::ordering::VersionOrdering;

/// Separator used when [`MergePolicy::MergeNotes`] joins notes
const NOTES_SEPARATOR: &str = "; ";

/// Resolution of duplicate `name,version` rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MergePolicy {
    /// The later row replaces the earlier one
    #[default]
    LastWins,
    /// The earlier row is kept, later duplicates are ignored
    FirstWins,
    /// A duplicate aborts the load
    Reject,
    /// The later status wins and both notes are kept
    MergeNotes,
}

impl std::str::FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lastWins" => Ok(MergePolicy::LastWins),
            "firstWins" => Ok(MergePolicy::FirstWins),
            "reject" => Ok(MergePolicy::Reject),
            "mergeNotes" => Ok(MergePolicy::MergeNotes),
            other => Err(format!("unknown merge policy: {other}")),
        }
    }
}

/// A database row that was skipped during construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDiagnostic {
    /// 1-indexed line number
    pub line: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("expected 4 comma-separated fields, found {0}")]
    TooFewFields(usize),
    #[error("empty library name")]
    EmptyName,
    #[error("empty version")]
    EmptyVersion,
    #[error("non-numeric status {0:?}")]
    InvalidStatus(String),
    #[error("version {0:?} collides with the bucket key syntax")]
    BucketLikeVersion(String),
}

/// Key of the per-library index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum VersionKey {
    /// A version that appears in the data
    Exact(String),
    /// A synthetic `~> major.minor` alias
    Bucket(String),
}

/// Builder for [`CompatibilityDatabase`]
#[derive(Debug, Clone)]
pub struct DatabaseBuilder {
    language: Language,
    merge_policy: MergePolicy,
    ordering: VersionOrdering,
}

impl DatabaseBuilder {
    pub fn merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    pub fn ordering(mut self, ordering: VersionOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Parse and index the database text
    pub fn build(self, text: &str) -> Result<CompatibilityDatabase, DatabaseError> {
        let mut db = CompatibilityDatabase {
            language: self.language,
            merge_policy: self.merge_policy,
            ordering: self.ordering,
            records: Vec::new(),
            index: HashMap::new(),
            diagnostics: Vec::new(),
        };

        for (line_idx, line) in text.lines().enumerate() {
            let line_num = line_idx + 1;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            match parse_row(line) {
                Ok(record) => db.insert(record, line_num)?,
                Err(reason) => {
                    warn!("Skipping database line {}: {}", line_num, reason);
                    db.diagnostics.push(LoadDiagnostic {
                        line: line_num,
                        reason,
                    });
                }
            }
        }

        debug!(
            "Database built with {:?} merging and {:?} ordering",
            db.merge_policy(),
            db.ordering()
        );
        info!(
            "Loaded {} {} compatibility records for {} libraries ({} rows skipped)",
            db.records.len(),
            db.language,
            db.index.len(),
            db.diagnostics.len()
        );

        Ok(db)
    }
}

/// Split a row into a record, rejecting rows that cannot be indexed
fn parse_row(line: &str) -> Result<CompatibilityRecord, SkipReason> {
    let fields: Vec<&str> = line.splitn(4, ',').collect();
    let [name, version, status, notes] = fields[..] else {
        return Err(SkipReason::TooFewFields(fields.len()));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(SkipReason::EmptyName);
    }

    let version = version.trim();
    if version.is_empty() {
        return Err(SkipReason::EmptyVersion);
    }

    let record = CompatibilityRecord::new(name, version, status, notes);
    if let Status::Invalid(raw) = &record.status {
        return Err(SkipReason::InvalidStatus(raw.clone()));
    }
    if is_bucket_key(&record.version) {
        return Err(SkipReason::BucketLikeVersion(record.version));
    }

    Ok(record)
}

/// Immutable index of compatibility records for one ecosystem
#[derive(Debug, Clone)]
pub struct CompatibilityDatabase {
    language: Language,
    merge_policy: MergePolicy,
    ordering: VersionOrdering,
    records: Vec<CompatibilityRecord>,
    /// name -> version key -> position in `records`
    index: HashMap<String, IndexMap<VersionKey, usize>>,
    diagnostics: Vec<LoadDiagnostic>,
}

impl CompatibilityDatabase {
    /// Start configuring a database for the given ecosystem
    pub fn builder(language: Language) -> DatabaseBuilder {
        DatabaseBuilder {
            language,
            merge_policy: MergePolicy::default(),
            ordering: VersionOrdering::default(),
        }
    }

    /// Build a database with last-write-wins merging and lexicographic ordering.
    pub fn new(language: Language, text: &str) -> Self {
        match Self::builder(language).build(text) {
            Ok(db) => db,
            Err(e) => unreachable!("last-write-wins merging rejected a row: {e}"),
        }
    }

    fn insert(&mut self, record: CompatibilityRecord, line: usize) -> Result<(), DatabaseError> {
        let bucket = approximate_bucket(Some(&record.version)).map(VersionKey::Bucket);
        let exact = VersionKey::Exact(record.version.clone());
        let existing = self
            .index
            .get(&record.name)
            .and_then(|versions| versions.get(&exact))
            .copied();

        let position = match (existing, self.merge_policy) {
            (None, _) => {
                self.records.push(record);
                self.records.len() - 1
            }
            (Some(_), MergePolicy::Reject) => {
                return Err(DatabaseError::DuplicateRecord {
                    name: record.name,
                    version: record.version,
                    line,
                });
            }
            (Some(_), MergePolicy::FirstWins) => {
                debug!(
                    "Keeping first record for {} {} (line {} ignored)",
                    record.name, record.version, line
                );
                return Ok(());
            }
            (Some(position), MergePolicy::LastWins) => {
                debug!(
                    "Replacing record for {} {} with line {}",
                    record.name, record.version, line
                );
                self.records[position] = record;
                position
            }
            (Some(position), MergePolicy::MergeNotes) => {
                let previous = &self.records[position];
                let notes = match (previous.notes.as_deref(), record.notes.as_deref()) {
                    (Some(old), Some(new)) if !old.is_empty() && !new.is_empty() && old != new => {
                        Some(format!("{old}{NOTES_SEPARATOR}{new}"))
                    }
                    (Some(old), Some("")) => Some(old.to_string()),
                    (old, new) => new.or(old).map(str::to_string),
                };
                self.records[position] = CompatibilityRecord { notes, ..record };
                position
            }
        };

        let name = self.records[position].name.clone();
        let versions = self.index.entry(name).or_default();
        versions.insert(exact, position);
        if let Some(bucket) = bucket {
            if self.merge_policy == MergePolicy::FirstWins {
                versions.entry(bucket).or_insert(position);
            } else {
                versions.insert(bucket, position);
            }
        }

        Ok(())
    }

    /// Ecosystem this database describes
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    pub fn ordering(&self) -> VersionOrdering {
        self.ordering
    }

    /// Number of distinct literal records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Library names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Rows skipped while loading
    pub fn diagnostics(&self) -> &[LoadDiagnostic] {
        &self.diagnostics
    }

    /// Look up the compatibility of `name` at `version`.
    ///
    /// - unknown library: no rows, or a single "library not yet tested" row
    ///   when `include_missing` is set
    /// - no version: every literal version of the library
    /// - exact version match, then bucket match (reporting the stored
    ///   version), then a single "unknown" row
    ///
    /// Rows are sorted by descending version using the configured ordering.
    pub fn lookup(&self, name: &str, version: Option<&str>, include_missing: bool) -> Vec<LookupRow> {
        let Some(versions) = self.index.get(name) else {
            debug!("{} is not in the {} database", name, self.language);
            return if include_missing {
                vec![LookupRow::not_yet_tested(name)]
            } else {
                Vec::new()
            };
        };

        let mut rows: Vec<LookupRow> = match version {
            None => versions
                .iter()
                .filter_map(|(key, &position)| match key {
                    VersionKey::Exact(_) => Some(LookupRow::from(&self.records[position])),
                    VersionKey::Bucket(_) => None,
                })
                .collect(),
            Some(version) => {
                let exact = versions.get(&VersionKey::Exact(version.to_string()));
                let fallback = || {
                    approximate_bucket(Some(version))
                        .and_then(|bucket| versions.get(&VersionKey::Bucket(bucket)))
                };
                match exact.or_else(fallback) {
                    Some(&position) => {
                        let record = &self.records[position];
                        if record.version != version {
                            debug!(
                                "{} {} matched approximately by {}",
                                name, version, record.version
                            );
                        }
                        vec![LookupRow::from(record)]
                    }
                    None => vec![LookupRow::unknown(name, version)],
                }
            }
        };

        self.ordering
            .sort_descending(&mut rows, |row| row.version.as_str());
        rows
    }

    /// Look up a module extracted from a manifest
    pub fn lookup_module(&self, module: &RequestedModule, include_missing: bool) -> Vec<LookupRow> {
        self.lookup(&module.name, module.version.as_deref(), include_missing)
    }
}
