//! Resolution of a manifest against a compatibility database

use tracing::{debug, info};

use crate::database::index::CompatibilityDatabase;
use crate::database::record::LookupRow;
use crate::parser::format::ManifestFormat;
use crate::parser::traits::ParseError;

/// Parse `content` as `format` and look up every dependency.
///
/// A format belonging to another ecosystem than the database yields no rows.
/// Libraries missing from the database are reported as not yet tested, and
/// the rows of all queries are concatenated in query order.
pub fn resolve_manifest(
    db: &CompatibilityDatabase,
    format: ManifestFormat,
    content: &str,
) -> Result<Vec<LookupRow>, ParseError> {
    if format.language() != db.language() {
        debug!(
            "Skipping {} for a {} database",
            format.file_name(),
            db.language()
        );
        return Ok(Vec::new());
    }

    let queries = format.extract_queries(content)?;
    info!(
        "Resolving {} dependencies from {}",
        queries.len(),
        format.file_name()
    );

    Ok(queries
        .iter()
        .flat_map(|module| db.lookup_module(module, true))
        .collect())
}
