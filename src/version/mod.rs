//! Version handling for compatibility lookups
//!
//! # Modules
//!
//! - [`bucket`]: Prefix normalization, segment tokenizing and `~> major.minor` bucket keys
//! - [`ordering`]: Descending ordering of result rows (lexicographic or semantic)
//! - [`semver`]: Shared semver utilities

pub mod bucket;
pub mod ordering;
pub mod semver;

pub use bucket::{BUCKET_PREFIX, Segment, approximate_bucket, normalize_version, version_segments};
pub use ordering::VersionOrdering;
