//! Ordering of version strings in lookup results
//!
//! Reports have always listed versions by plain string comparison, so
//! `"2.0.0"` sorts above `"10.0.0"`. [`VersionOrdering::Semantic`] is an
//! opt-in alternative; the lexicographic order stays the default.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::version::semver::parse_version;

/// How result rows are ordered (always descending)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionOrdering {
    /// Byte-wise string comparison of the dotted form
    #[default]
    Lexicographic,
    /// Semantic version comparison; unparseable versions sort last
    Semantic,
}

impl VersionOrdering {
    /// Compare two versions so that sorting with this comparator yields
    /// descending order.
    pub fn compare_descending(&self, a: &str, b: &str) -> Ordering {
        match self {
            VersionOrdering::Lexicographic => b.cmp(a),
            VersionOrdering::Semantic => match (parse_version(a), parse_version(b)) {
                (Some(va), Some(vb)) => vb.cmp(&va).then_with(|| b.cmp(a)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => b.cmp(a),
            },
        }
    }

    /// Sort items in descending version order
    pub fn sort_descending<T>(&self, items: &mut [T], version_of: impl Fn(&T) -> &str) {
        items.sort_by(|a, b| self.compare_descending(version_of(a), version_of(b)));
    }
}

impl std::str::FromStr for VersionOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexicographic" => Ok(VersionOrdering::Lexicographic),
            "semantic" => Ok(VersionOrdering::Semantic),
            other => Err(format!("unknown version ordering: {other}")),
        }
    }
}
