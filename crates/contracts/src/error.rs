//! Layered error definitions
//!
//! Only structural, load-time failures are errors. Per-frame misses
//! (unknown vehicle, empty lap, no plausible lap) are `Option::None`.

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Load Errors =====
    /// Source could not be opened or parsed
    #[error("failed to load telemetry from '{path}': {message}")]
    DataLoad {
        path: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Required identifying columns are absent
    #[error("telemetry schema error: missing required columns {missing:?}")]
    Schema { missing: Vec<String> },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create data load error
    pub fn data_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataLoad {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create schema error
    pub fn schema(missing: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Schema {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_columns() {
        let err = ContractError::schema(["vehicle_id", "timestamp"]);
        let msg = err.to_string();
        assert!(msg.contains("vehicle_id"), "got: {msg}");
        assert!(msg.contains("timestamp"), "got: {msg}");
    }

    #[test]
    fn test_data_load_names_path() {
        let err = ContractError::data_load("laps.csv", "not found");
        assert_eq!(
            err.to_string(),
            "failed to load telemetry from 'laps.csv': not found"
        );
    }
}
