//! Gemfile.lock parser
//!
//! Extracts the resolved gems listed under `specs:`. Each gem sits on a line
//! indented by four spaces; its own requirements follow indented by six and
//! are not resolved versions, so they are skipped.
//!
//! ```text
//! GEM
//!   remote: https://rubygems.org/
//!   specs:
//!     rack (2.2.8)
//!     rails (7.1.2)
//!       actionpack (= 7.1.2)
//! ```

use regex::Regex;

use crate::database::record::RequestedModule;
use crate::parser::traits::{ParseError, Parser, sort_by_name};

/// Parser for Gemfile.lock files
pub struct GemfileLockParser {
    /// Regex for a resolved spec: `    name (1.2.3)`
    spec_re: Regex,
}

impl GemfileLockParser {
    pub fn new() -> Self {
        Self {
            spec_re: Regex::new(r"^ {4}([^\s(]+) \((\d[^)]*)\)\s*$").unwrap(),
        }
    }
}

impl Default for GemfileLockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for GemfileLockParser {
    fn parse(&self, content: &str) -> Result<Vec<RequestedModule>, ParseError> {
        let mut results: Vec<RequestedModule> = content
            .lines()
            .filter_map(|line| self.spec_re.captures(line))
            .map(|caps| RequestedModule::new(&caps[1], Some(&caps[2])))
            .collect();

        sort_by_name(&mut results);
        Ok(results)
    }
}
