use semver::Version;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros.
/// Does NOT strip 'v' prefix (use `normalize_version` first if needed).
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Some(Version::new(1, 0, 0)))]
    #[case("1.2", Some(Version::new(1, 2, 0)))]
    #[case("1.2.3", Some(Version::new(1, 2, 3)))]
    #[case("2.31.0", Some(Version::new(2, 31, 0)))]
    #[case("1.2.3.4", None)]
    #[case("latest", None)]
    fn parse_version_pads_partial_versions(
        #[case] input: &str,
        #[case] expected: Option<Version>,
    ) {
        assert_eq!(parse_version(input), expected);
    }

    #[test]
    fn parse_version_keeps_prerelease() {
        let parsed = parse_version("1.0.0-beta.1").unwrap();
        assert_eq!(parsed.pre.as_str(), "beta.1");
    }
}
