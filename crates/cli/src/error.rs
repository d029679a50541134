//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Vehicle id not present in the session
    #[error("Unknown vehicle '{id}' (available: {})", available.join(", "))]
    UnknownVehicle { id: String, available: Vec<String> },

    /// Vehicle has no samples on the requested lap
    #[error("Vehicle '{vehicle}' has no samples on lap {lap}")]
    EmptyLap { vehicle: String, lap: u32 },

    /// Argument rejected after parsing
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    pub fn unknown_vehicle<'a>(
        id: impl Into<String>,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::UnknownVehicle {
            id: id.into(),
            available: available.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn empty_lap(vehicle: impl Into<String>, lap: u32) -> Self {
        Self::EmptyLap {
            vehicle: vehicle.into(),
            lap,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
