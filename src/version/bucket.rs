//! Version normalization and approximate-match bucketing
//!
//! A bucket key coarsens a version to its `major.minor` prefix so that an
//! untested patch release can fall back to a record of the same line:
//!
//! ```text
//! "v1.2.3-beta" -> "1.2.3-beta" -> [1, 2, 3, "beta"] -> [1, 2, 3] -> "~> 1.2"
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Marker that starts every bucket key. Literal versions never start with it.
pub const BUCKET_PREFIX: &str = "~>";

/// Number of numeric segments kept in a bucket key
const BUCKET_WIDTH: usize = 2;

static VERSION_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[vV](\d.*)$").expect("version prefix regex"));

static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+|[a-z]+").expect("segment regex"));

/// A single token of a version string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Number(u64),
    Text(String),
}

/// Strip a leading `v` marker when it is directly followed by a digit.
///
/// - `"v1.2.3"` -> `"1.2.3"`
/// - `"vendor"` -> `"vendor"`
pub fn normalize_version(version: Option<&str>) -> Option<String> {
    let version = version?;
    let normalized = VERSION_PREFIX_RE
        .captures(version)
        .and_then(|caps| caps.get(1))
        .map_or(version, |m| m.as_str());
    Some(normalized.to_string())
}

/// Split a version into maximal digit runs and letter runs, in order.
///
/// Separators (`.`, `-`, `+`, ...) are dropped. Digit runs too large for a
/// `u64` are kept as text.
pub fn version_segments(version: Option<&str>) -> Option<Vec<Segment>> {
    let version = version?;
    let segments = SEGMENT_RE
        .find_iter(version)
        .map(|m| {
            let token = m.as_str();
            if token.as_bytes()[0].is_ascii_digit() {
                token
                    .parse::<u64>()
                    .map(Segment::Number)
                    .unwrap_or_else(|_| Segment::Text(token.to_string()))
            } else {
                Segment::Text(token.to_string())
            }
        })
        .collect();
    Some(segments)
}

/// Compute the `"~> major.minor"` bucket key for a version.
///
/// Trailing alphabetic segments are dropped first, then the numeric prefix
/// is truncated or zero-padded to exactly two segments.
pub fn approximate_bucket(version: Option<&str>) -> Option<String> {
    let mut segments = version_segments(version)?;

    while matches!(segments.last(), Some(Segment::Text(_))) {
        segments.pop();
    }

    let mut numbers: Vec<u64> = segments
        .iter()
        .map_while(|segment| match segment {
            Segment::Number(n) => Some(*n),
            Segment::Text(_) => None,
        })
        .take(BUCKET_WIDTH)
        .collect();
    numbers.resize(BUCKET_WIDTH, 0);

    let joined = numbers
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".");
    Some(format!("{BUCKET_PREFIX} {joined}"))
}

/// Whether a version string is shaped like a bucket key
pub fn is_bucket_key(version: &str) -> bool {
    version.starts_with(BUCKET_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("v1.2.3"), Some("1.2.3"))]
    #[case(Some("V2.0"), Some("2.0"))]
    #[case(Some("1.2.3"), Some("1.2.3"))]
    #[case(Some("vendor"), Some("vendor"))]
    #[case(Some("v"), Some("v"))]
    #[case(None, None)]
    fn normalize_version_strips_prefix_before_digit(
        #[case] input: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(normalize_version(input), expected.map(str::to_string));
    }

    #[test]
    fn version_segments_alternates_numbers_and_text() {
        assert_eq!(
            version_segments(Some("1.2.3-Beta4")),
            Some(vec![
                Segment::Number(1),
                Segment::Number(2),
                Segment::Number(3),
                Segment::Text("Beta".to_string()),
                Segment::Number(4),
            ])
        );
    }

    #[test]
    fn version_segments_returns_none_for_absent_version() {
        assert_eq!(version_segments(None), None);
    }

    #[test]
    fn version_segments_keeps_oversized_numbers_as_text() {
        assert_eq!(
            version_segments(Some("99999999999999999999999")),
            Some(vec![Segment::Text("99999999999999999999999".to_string())])
        );
    }

    #[rstest]
    #[case("1.2.3-beta", "~> 1.2")]
    #[case("2", "~> 2.0")]
    #[case("2.31.9", "~> 2.31")]
    #[case("1.0.0.rc", "~> 1.0")]
    #[case("4.2.1.beta.rc", "~> 4.2")]
    #[case("1.2b3", "~> 1.2")]
    #[case("beta", "~> 0.0")]
    #[case("", "~> 0.0")]
    fn approximate_bucket_uses_numeric_major_minor(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(approximate_bucket(Some(input)), Some(expected.to_string()));
    }

    // Trailing alphabetic segments must really be dropped: "1.rc" is not
    // allowed to leak the text segment into the key.
    #[test]
    fn approximate_bucket_drops_trailing_text_before_padding() {
        assert_eq!(approximate_bucket(Some("1.rc")), Some("~> 1.0".to_string()));
    }

    #[test]
    fn approximate_bucket_returns_none_for_absent_version() {
        assert_eq!(approximate_bucket(None), None);
    }

    #[rstest]
    #[case("~> 1.2", true)]
    #[case("1.2", false)]
    fn is_bucket_key_detects_marker(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_bucket_key(input), expected);
    }
}
