//! Parser layer
//! - traits.rs: Parser trait definition
//! - types.rs: Ecosystem codes and display names
//! - format.rs: ManifestFormat, one variant per supported dialect
//! - gemfile_lock.rs: Gemfile.lock parser
//! - package_json.rs: package.json parser
//! - package_lock_json.rs: package-lock.json parser
//! - yarn_lock.rs: yarn.lock parser
//! - packrat_lock.rs: packrat.lock parser
//! - resolve.rs: Manifest resolution against a database

pub mod format;
pub mod gemfile_lock;
pub mod package_json;
pub mod package_lock_json;
pub mod packrat_lock;
pub mod resolve;
pub mod traits;
pub mod types;
pub mod yarn_lock;

pub use format::ManifestFormat;
pub use gemfile_lock::GemfileLockParser;
pub use package_json::PackageJsonParser;
pub use package_lock_json::PackageLockJsonParser;
pub use packrat_lock::PackratLockParser;
pub use resolve::resolve_manifest;
pub use traits::{ParseError, Parser};
pub use types::{Language, UNKNOWN_LANGUAGE, UnknownLanguage, display_name};
pub use yarn_lock::YarnLockParser;
