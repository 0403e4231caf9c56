//! Compatibility database layer
//!
//! - [`record`]: Records, requested modules and report rows
//! - [`index`]: The immutable name/version index with exact and bucket lookup
//! - [`error`]: Construction errors

pub mod error;
pub mod index;
pub mod record;

pub use error::DatabaseError;
pub use index::{CompatibilityDatabase, DatabaseBuilder, LoadDiagnostic, MergePolicy, SkipReason};
pub use record::{CompatibilityRecord, LookupRow, RequestedModule, Status};
