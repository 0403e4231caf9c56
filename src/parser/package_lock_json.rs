//! package-lock.json parser
//!
//! Queries the root package first, then every locked dependency that is
//! neither `dev` nor `optional`, in document order.
//!
//! Lockfile v1 keeps dependencies in a `dependencies` object keyed by name.
//! Lockfiles v2/v3 written without the legacy section only have `packages`,
//! keyed by install path:
//!
//! ```json
//! {
//!   "name": "my-project",
//!   "version": "1.0.0",
//!   "lockfileVersion": 3,
//!   "packages": {
//!     "": { "name": "my-project", "version": "1.0.0" },
//!     "node_modules/express": { "version": "4.18.2" },
//!     "node_modules/jest": { "version": "29.7.0", "dev": true }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::database::record::RequestedModule;
use crate::parser::traits::{ParseError, Parser, json_error};

/// Parser for package-lock.json files
pub struct PackageLockJsonParser;

impl PackageLockJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PackageLockJsonParser {
    fn default() -> Self {
        Self::new()
    }
}

/// package-lock.json structure (partial, only fields we need)
#[derive(Debug, Deserialize)]
struct PackageLockJson {
    name: Option<String>,
    version: Option<String>,
    /// Lockfile v1 dependency tree
    dependencies: Option<IndexMap<String, LockedPackage>>,
    /// Lockfile v2/v3 install-path map
    #[serde(default)]
    packages: IndexMap<String, LockedPackage>,
}

#[derive(Debug, Deserialize)]
struct LockedPackage {
    version: Option<String>,
    #[serde(default)]
    dev: bool,
    #[serde(default)]
    optional: bool,
}

impl Parser for PackageLockJsonParser {
    fn parse(&self, content: &str) -> Result<Vec<RequestedModule>, ParseError> {
        let lock: PackageLockJson =
            serde_json::from_str(content).map_err(|source| json_error("package-lock.json", source))?;

        let mut results = Vec::new();

        if let Some(name) = lock.name {
            results.push(RequestedModule::new(name, lock.version.as_deref()));
        }

        let locked: Vec<(String, LockedPackage)> = match lock.dependencies {
            Some(dependencies) => dependencies.into_iter().collect(),
            None => lock
                .packages
                .into_iter()
                .filter(|(path, _)| !path.is_empty())
                .map(|(path, package)| (extract_package_name(&path).to_string(), package))
                .collect(),
        };

        for (name, package) in locked {
            if package.dev || package.optional {
                debug!("Skipping dev/optional dependency '{}'", name);
                continue;
            }
            let Some(version) = package.version else {
                debug!("Skipping dependency '{}' with no version", name);
                continue;
            };
            results.push(RequestedModule::new(name, Some(&version)));
        }

        Ok(results)
    }
}

/// Extracts package name from a `packages` key.
///
/// - `"node_modules/express"` → `"express"`
/// - `"node_modules/@babel/core"` → `"@babel/core"`
/// - `"node_modules/express/node_modules/debug"` → `"debug"`
fn extract_package_name(key: &str) -> &str {
    key.rsplit("node_modules/").next().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn names_and_versions(modules: &[RequestedModule]) -> Vec<(&str, Option<&str>)> {
        modules
            .iter()
            .map(|m| (m.name.as_str(), m.version.as_deref()))
            .collect()
    }

    #[test]
    fn parse_v1_lockfile_skips_dev_and_optional() {
        let content = r#"{
  "name": "my-app",
  "version": "1.0.0",
  "lockfileVersion": 1,
  "dependencies": {
    "express": { "version": "4.18.2" },
    "jest": { "version": "29.7.0", "dev": true },
    "fsevents": { "version": "2.3.3", "optional": true },
    "debug": { "version": "2.6.9", "dev": false }
  }
}"#;
        let result = PackageLockJsonParser::new().parse(content).unwrap();
        assert_eq!(
            names_and_versions(&result),
            vec![
                ("my-app", Some("1.0.0")),
                ("express", Some("4.18.2")),
                ("debug", Some("2.6.9")),
            ]
        );
    }

    #[test]
    fn parse_v3_lockfile_uses_packages_section() {
        let content = r#"{
  "name": "my-app",
  "version": "1.0.0",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "my-app", "version": "1.0.0" },
    "node_modules/@babel/core": { "version": "7.23.0" },
    "node_modules/jest": { "version": "29.7.0", "dev": true },
    "node_modules/express/node_modules/debug": { "version": "2.6.9" }
  }
}"#;
        let result = PackageLockJsonParser::new().parse(content).unwrap();
        assert_eq!(
            names_and_versions(&result),
            vec![
                ("my-app", Some("1.0.0")),
                ("@babel/core", Some("7.23.0")),
                ("debug", Some("2.6.9")),
            ]
        );
    }

    #[test]
    fn parse_without_root_name_only_returns_dependencies() {
        let content = r#"{ "dependencies": { "ms": { "version": "2.1.3" } } }"#;
        let result = PackageLockJsonParser::new().parse(content).unwrap();
        assert_eq!(names_and_versions(&result), vec![("ms", Some("2.1.3"))]);
    }

    #[test]
    fn parse_fails_on_invalid_json() {
        let result = PackageLockJsonParser::new().parse("{ not json");
        assert!(matches!(
            result,
            Err(ParseError::InvalidJson {
                file_type: "package-lock.json",
                ..
            })
        ));
    }

    #[test]
    fn parse_rejects_wrongly_typed_entries_as_invalid_syntax() {
        let content = r#"{ "dependencies": { "ms": { "version": "2.1.3", "dev": "yes" } } }"#;
        let result = PackageLockJsonParser::new().parse(content);
        assert!(matches!(result, Err(ParseError::InvalidSyntax(_))));
    }

    #[rstest]
    #[case("node_modules/express", "express")]
    #[case("node_modules/@babel/core", "@babel/core")]
    #[case("node_modules/express/node_modules/debug", "debug")]
    fn extract_package_name_returns_last_segment(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(extract_package_name(key), expected);
    }
}
