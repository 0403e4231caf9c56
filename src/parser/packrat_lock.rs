//! packrat.lock parser
//!
//! Format example:
//! ```text
//! PackratFormat: 1.4
//! RVersion: 4.1.0
//! Repos: CRAN=https://cran.rstudio.com/
//!
//! Package: R6
//! Source: CRAN
//! Version: 2.5.1
//! Hash: 470851b6d5d0ac559e9d01bb352b4021
//! ```

use regex::Regex;

use crate::database::record::RequestedModule;
use crate::parser::traits::{ParseError, Parser, sort_by_name};

/// Parser for packrat.lock files
pub struct PackratLockParser {
    /// Regex for a `Package:` / `Source:` / `Version:` block
    package_re: Regex,
}

impl PackratLockParser {
    pub fn new() -> Self {
        Self {
            package_re: Regex::new(
                r"(?m)^Package:[ \t]*(\S+)[ \t]*\r?\nSource:[ \t]*\S+[ \t]*\r?\nVersion:[ \t]*(\S+)",
            )
            .unwrap(),
        }
    }
}

impl Default for PackratLockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for PackratLockParser {
    fn parse(&self, content: &str) -> Result<Vec<RequestedModule>, ParseError> {
        let mut results: Vec<RequestedModule> = self
            .package_re
            .captures_iter(content)
            .map(|caps| RequestedModule::new(&caps[1], Some(&caps[2])))
            .collect();

        sort_by_name(&mut results);
        Ok(results)
    }
}
