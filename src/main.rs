use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;

use compat_lookup::config::{AppConfig, log_path};
use compat_lookup::database::{CompatibilityDatabase, LookupRow, MergePolicy, RequestedModule};
use compat_lookup::logging;
use compat_lookup::parser::{Language, ManifestFormat, resolve_manifest};
use compat_lookup::version::VersionOrdering;

#[derive(Parser)]
#[command(name = "compat-lookup")]
#[command(version, about = "Check dependencies against a runtime compatibility database")]
struct Cli {
    /// Compatibility database (`name,version,status,notes` per line)
    #[arg(long, short = 'd', global = true)]
    database: Option<PathBuf>,

    /// Ecosystem of the database (python, js, ruby, r)
    #[arg(long, short = 'l', global = true)]
    language: Option<Language>,

    /// Configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Duplicate row handling (lastWins, firstWins, reject, mergeNotes)
    #[arg(long, global = true)]
    merge_policy: Option<MergePolicy>,

    /// Result ordering (lexicographic, semantic)
    #[arg(long, global = true)]
    ordering: Option<VersionOrdering>,

    /// Print rows as a JSON array
    #[arg(long, global = true)]
    json: bool,

    /// Write logs to the log file instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve every dependency of a manifest or lockfile
    Manifest {
        path: PathBuf,
        /// Dialect (gemfile-lock, package-json, package-lock-json, yarn-lock, packrat-lock);
        /// detected from the file name when omitted
        #[arg(long)]
        format: Option<ManifestFormat>,
    },
    /// Look up a single library
    Query {
        name: String,
        version: Option<String>,
        /// Print nothing for libraries missing from the database
        #[arg(long)]
        no_missing: bool,
    },
    /// List supported ecosystem codes
    Languages,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.then(log_path);
    let _guard = logging::init(cli.verbose, log_file.as_deref())?;

    let config = AppConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Languages => {
            for language in Language::ALL {
                println!("{}\t{}", language.as_str(), language.display_name());
            }
            Ok(())
        }
        Command::Manifest { path, format } => {
            let db = load_database(&cli, &config)?;
            let format = match format {
                Some(format) => *format,
                None => ManifestFormat::detect(path)
                    .with_context(|| format!("cannot detect manifest format of {path:?}"))?,
            };
            if format.language() != db.language() {
                warn!(
                    "{} belongs to {}, database is {}",
                    format.file_name(),
                    format.language(),
                    db.language()
                );
            }
            let content = read_file(path)?;
            let rows = resolve_manifest(&db, format, &content)
                .with_context(|| format!("failed to parse {path:?}"))?;
            print_rows(&rows, cli.json)
        }
        Command::Query {
            name,
            version,
            no_missing,
        } => {
            let db = load_database(&cli, &config)?;
            let include_missing = config.report.include_missing && !no_missing;
            let rows = query_rows(&db, name, version.as_deref(), include_missing);
            print_rows(&rows, cli.json)
        }
    }
}

fn load_database(cli: &Cli, config: &AppConfig) -> anyhow::Result<CompatibilityDatabase> {
    let path = cli
        .database
        .as_deref()
        .context("--database is required for this command")?;
    let language = cli
        .language
        .or(config.database.language)
        .context("--language is required (or set database.language in the config)")?;

    let text = read_file(path)?;
    let db = CompatibilityDatabase::builder(language)
        .merge_policy(cli.merge_policy.unwrap_or(config.database.merge_policy))
        .ordering(cli.ordering.unwrap_or(config.database.ordering))
        .build(&text)
        .with_context(|| format!("failed to load database {path:?}"))?;

    Ok(db)
}

/// Look up a single library given on the command line, normalizing its version
fn query_rows(
    db: &CompatibilityDatabase,
    name: &str,
    version: Option<&str>,
    include_missing: bool,
) -> Vec<LookupRow> {
    let module = RequestedModule::new(name, version);
    db.lookup_module(&module, include_missing)
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"))
}

fn print_rows(rows: &[LookupRow], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else {
        for row in rows {
            println!("{row}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use compat_lookup::database::Status;
    use rstest::rstest;

    #[rstest]
    #[case(Some("v2.31.0"), "2.31.0")]
    #[case(Some("2.31.0"), "2.31.0")]
    #[case(Some("v2.31.4"), "2.31.0")]
    fn query_rows_normalizes_prefixed_versions(
        #[case] version: Option<&str>,
        #[case] expected: &str,
    ) {
        let db = CompatibilityDatabase::new(Language::Python, "requests,2.31.0,0,99.0\n");

        let rows = query_rows(&db, "requests", version, true);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].version, expected);
        assert_eq!(rows[0].status, Status::Code(0));
        assert_eq!(rows[0].notes.as_deref(), Some("99.0"));
    }

    #[test]
    fn query_rows_reports_missing_library() {
        let db = CompatibilityDatabase::new(Language::Python, "requests,2.31.0,0,99.0\n");

        assert_eq!(
            query_rows(&db, "flask", Some("v3.0.0"), true),
            vec![LookupRow::not_yet_tested("flask")]
        );
        assert!(query_rows(&db, "flask", Some("v3.0.0"), false).is_empty());
    }
}
