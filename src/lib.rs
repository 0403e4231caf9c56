//! Runtime compatibility lookup for dependency manifests
//!
//! A [`CompatibilityDatabase`](database::CompatibilityDatabase) is built once
//! from `name,version,status,notes` text and answers exact and approximate
//! (`~> major.minor`) lookups. The [`parser`] layer turns Gemfile.lock,
//! package.json, package-lock.json, yarn.lock and packrat.lock content into
//! queries and resolves them into report rows.

pub mod config;
pub mod database;
pub mod logging;
pub mod parser;
pub mod version;
