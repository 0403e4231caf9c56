//! yarn.lock parser
//!
//! Each block starts with one or more `name@range` descriptors and carries
//! the resolved version on its first indented line:
//!
//! ```text
//! "@babel/core@^7.0.0", "@babel/core@^7.1.0":
//!   version "7.23.0"
//!   resolved "https://registry.yarnpkg.com/..."
//!
//! lodash@^4.17.21:
//!   version "4.17.21"
//! ```

use regex::Regex;

use crate::database::record::RequestedModule;
use crate::parser::traits::{ParseError, Parser, sort_by_name};

/// Parser for yarn.lock (v1) files
pub struct YarnLockParser {
    /// Regex for a block header followed by its version line
    entry_re: Regex,
}

impl YarnLockParser {
    pub fn new() -> Self {
        Self {
            entry_re: Regex::new(r#"(?m)^"?(@?[^@\s"]+)@[^\n]*:\r?\n\s+version:? "?([^"\s]+)"?"#)
                .unwrap(),
        }
    }
}

impl Default for YarnLockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for YarnLockParser {
    fn parse(&self, content: &str) -> Result<Vec<RequestedModule>, ParseError> {
        let mut results: Vec<RequestedModule> = self
            .entry_re
            .captures_iter(content)
            .map(|caps| RequestedModule::new(&caps[1], Some(&caps[2])))
            .collect();

        sort_by_name(&mut results);
        Ok(results)
    }
}
