//! package.json parser
//!
//! Only the `dependencies` object is consulted. Its values are version
//! ranges rather than resolved versions, so every name is looked up without
//! a version and the report lists all tested versions.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::database::record::RequestedModule;
use crate::parser::traits::{ParseError, Parser, json_error};

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PackageJsonParser {
    fn default() -> Self {
        Self::new()
    }
}

/// package.json structure (partial, only fields we need)
#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    dependencies: IndexMap<String, serde_json::Value>,
}

impl Parser for PackageJsonParser {
    fn parse(&self, content: &str) -> Result<Vec<RequestedModule>, ParseError> {
        let manifest: PackageJson =
            serde_json::from_str(content).map_err(|source| json_error("package.json", source))?;

        Ok(manifest
            .dependencies
            .into_keys()
            .map(|name| RequestedModule::new(name, None))
            .collect())
    }
}
