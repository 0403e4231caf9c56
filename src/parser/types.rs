//! Common types for parsers

use std::fmt;

use serde::Deserialize;

/// Display name returned for ecosystem codes outside [`Language`]
pub const UNKNOWN_LANGUAGE: &str = "Unknown language";

/// Ecosystem a compatibility database and its manifests belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Python packages (PyPI)
    Python,
    /// JavaScript packages (npm)
    #[serde(rename = "js")]
    JavaScript,
    /// Ruby gems
    Ruby,
    /// R packages (CRAN)
    R,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Python,
        Language::JavaScript,
        Language::Ruby,
        Language::R,
    ];

    /// Returns the ecosystem code
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "js",
            Language::Ruby => "ruby",
            Language::R => "r",
        }
    }

    /// Human-readable name of the runtime this ecosystem is tested on
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "GraalPy",
            Language::JavaScript => "GraalJS",
            Language::Ruby => "TruffleRuby",
            Language::R => "FastR",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an ecosystem code outside [`Language`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown language code: {0}")]
pub struct UnknownLanguage(pub String);

impl std::str::FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Language::Python),
            "js" => Ok(Language::JavaScript),
            "ruby" => Ok(Language::Ruby),
            "r" => Ok(Language::R),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// Map an ecosystem code to its runtime label, or [`UNKNOWN_LANGUAGE`]
pub fn display_name(code: &str) -> &'static str {
    code.parse::<Language>()
        .map_or(UNKNOWN_LANGUAGE, |language| language.display_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("python", "GraalPy")]
    #[case("js", "GraalJS")]
    #[case("ruby", "TruffleRuby")]
    #[case("r", "FastR")]
    #[case("cobol", UNKNOWN_LANGUAGE)]
    #[case("", UNKNOWN_LANGUAGE)]
    #[case("Python", UNKNOWN_LANGUAGE)]
    fn display_name_returns_expected(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(display_name(code), expected);
    }

    #[test]
    fn from_str_round_trips_every_language() {
        for language in Language::ALL {
            assert_eq!(language.as_str().parse::<Language>(), Ok(language));
        }
    }

    #[test]
    fn from_str_rejects_unknown_code() {
        assert_eq!(
            "java".parse::<Language>(),
            Err(UnknownLanguage("java".to_string()))
        );
    }

    #[test]
    fn deserializes_from_code() {
        let language: Language = serde_json::from_str(r#""js""#).unwrap();
        assert_eq!(language, Language::JavaScript);
    }
}
