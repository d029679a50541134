//! Ingestion error types

use contracts::ContractError;
use thiserror::Error;

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Source file could not be opened
    #[error("cannot open telemetry source '{path}'")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Malformed CSV record
    #[error("malformed record in '{path}'")]
    Record {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Required identifying columns are absent from the header
    #[error("missing required columns {missing:?}")]
    MissingColumns { missing: Vec<String> },

    /// Timestamp cell in neither RFC 3339 nor `YYYY-MM-DD HH:MM:SS[.f]` form
    #[error("unparsable timestamp '{value}' at line {line} of '{path}'")]
    Timestamp {
        path: String,
        line: u64,
        value: String,
    },
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, IngestionError>;

impl From<IngestionError> for ContractError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::MissingColumns { missing } => ContractError::schema(missing),
            IngestionError::Open { path, source } | IngestionError::Record { path, source } => {
                ContractError::DataLoad {
                    message: source.to_string(),
                    path,
                    source: Some(Box::new(source)),
                }
            }
            IngestionError::Timestamp { path, line, value } => ContractError::data_load(
                path,
                format!("unparsable timestamp '{value}' at line {line}"),
            ),
        }
    }
}
