use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Duplicate record for {name} {version} on line {line}")]
    DuplicateRecord {
        name: String,
        version: String,
        line: usize,
    },
}
