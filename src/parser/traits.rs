//! Parser trait definition

use crate::database::record::RequestedModule;

/// Trait for parsing dependency manifests and lockfiles
pub trait Parser: Send + Sync {
    /// Parse the content and extract the dependencies to look up, in query order
    fn parse(&self, content: &str) -> Result<Vec<RequestedModule>, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The content is not valid JSON
    #[error("Invalid JSON in {file_type}: {source}")]
    InvalidJson {
        file_type: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Valid syntax but not the expected document shape
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    /// No parser handles the given file
    #[error("Unsupported manifest: {0}")]
    UnsupportedManifest(String),
}

/// Classify a serde_json failure: wrong document shape is a syntax error of
/// the manifest, anything else is malformed JSON
pub(crate) fn json_error(file_type: &'static str, source: serde_json::Error) -> ParseError {
    if source.is_data() {
        ParseError::InvalidSyntax(format!("{file_type}: {source}"))
    } else {
        ParseError::InvalidJson { file_type, source }
    }
}

/// Sort extracted modules by name, keeping the file order among equal names
pub(crate) fn sort_by_name(modules: &mut [RequestedModule]) {
    modules.sort_by(|a, b| a.name.cmp(&b.name));
}
