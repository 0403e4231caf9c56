//! Supported manifest dialects

use std::path::Path;

use crate::database::record::RequestedModule;
use crate::parser::gemfile_lock::GemfileLockParser;
use crate::parser::package_json::PackageJsonParser;
use crate::parser::package_lock_json::PackageLockJsonParser;
use crate::parser::packrat_lock::PackratLockParser;
use crate::parser::traits::{ParseError, Parser};
use crate::parser::types::Language;
use crate::parser::yarn_lock::YarnLockParser;

/// A dependency manifest or lockfile format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestFormat {
    /// Gemfile.lock (Bundler)
    GemfileLock,
    /// package.json (npm)
    PackageJson,
    /// package-lock.json (npm)
    PackageLockJson,
    /// yarn.lock (Yarn v1)
    YarnLock,
    /// packrat.lock (R)
    PackratLock,
}

impl ManifestFormat {
    pub const ALL: [ManifestFormat; 5] = [
        ManifestFormat::GemfileLock,
        ManifestFormat::PackageJson,
        ManifestFormat::PackageLockJson,
        ManifestFormat::YarnLock,
        ManifestFormat::PackratLock,
    ];

    /// Ecosystem whose database this format is resolved against
    pub fn language(&self) -> Language {
        match self {
            ManifestFormat::GemfileLock => Language::Ruby,
            ManifestFormat::PackageJson
            | ManifestFormat::PackageLockJson
            | ManifestFormat::YarnLock => Language::JavaScript,
            ManifestFormat::PackratLock => Language::R,
        }
    }

    /// Conventional file name of this format
    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestFormat::GemfileLock => "Gemfile.lock",
            ManifestFormat::PackageJson => "package.json",
            ManifestFormat::PackageLockJson => "package-lock.json",
            ManifestFormat::YarnLock => "yarn.lock",
            ManifestFormat::PackratLock => "packrat.lock",
        }
    }

    /// Detect the format from a file path
    pub fn detect(path: &Path) -> Option<ManifestFormat> {
        let file_name = path.file_name()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|format| format.file_name() == file_name)
    }

    /// Parser implementing this format
    pub fn parser(&self) -> Box<dyn Parser> {
        match self {
            ManifestFormat::GemfileLock => Box::new(GemfileLockParser::new()),
            ManifestFormat::PackageJson => Box::new(PackageJsonParser::new()),
            ManifestFormat::PackageLockJson => Box::new(PackageLockJsonParser::new()),
            ManifestFormat::YarnLock => Box::new(YarnLockParser::new()),
            ManifestFormat::PackratLock => Box::new(PackratLockParser::new()),
        }
    }

    /// Extract the ordered dependency queries from the manifest content
    pub fn extract_queries(&self, content: &str) -> Result<Vec<RequestedModule>, ParseError> {
        self.parser().parse(content)
    }
}

impl std::str::FromStr for ManifestFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gemfile-lock" => Ok(ManifestFormat::GemfileLock),
            "package-json" => Ok(ManifestFormat::PackageJson),
            "package-lock-json" => Ok(ManifestFormat::PackageLockJson),
            "yarn-lock" => Ok(ManifestFormat::YarnLock),
            "packrat-lock" => Ok(ManifestFormat::PackratLock),
            other => Err(ParseError::UnsupportedManifest(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/project/Gemfile.lock", Some(ManifestFormat::GemfileLock))]
    #[case("package.json", Some(ManifestFormat::PackageJson))]
    #[case("/app/package-lock.json", Some(ManifestFormat::PackageLockJson))]
    #[case("/app/yarn.lock", Some(ManifestFormat::YarnLock))]
    #[case("/analysis/packrat/packrat.lock", Some(ManifestFormat::PackratLock))]
    #[case("/project/Gemfile", None)]
    #[case("/project/requirements.txt", None)]
    #[case("/", None)]
    fn detect_returns_expected(#[case] path: &str, #[case] expected: Option<ManifestFormat>) {
        assert_eq!(ManifestFormat::detect(Path::new(path)), expected);
    }

    #[rstest]
    #[case(ManifestFormat::GemfileLock, Language::Ruby)]
    #[case(ManifestFormat::PackageJson, Language::JavaScript)]
    #[case(ManifestFormat::PackageLockJson, Language::JavaScript)]
    #[case(ManifestFormat::YarnLock, Language::JavaScript)]
    #[case(ManifestFormat::PackratLock, Language::R)]
    fn language_returns_target_ecosystem(
        #[case] format: ManifestFormat,
        #[case] expected: Language,
    ) {
        assert_eq!(format.language(), expected);
    }

    #[test]
    fn from_str_accepts_kebab_case_names() {
        assert_eq!(
            "yarn-lock".parse::<ManifestFormat>().unwrap(),
            ManifestFormat::YarnLock
        );
        assert!(matches!(
            "pipfile-lock".parse::<ManifestFormat>(),
            Err(ParseError::UnsupportedManifest(_))
        ));
    }
}
