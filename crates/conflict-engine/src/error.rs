//! Error types for conflict-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A start time or duration on an appointment could not be parsed.
    /// `field` names the offending input (`startTime`, `durationMinutes`, ...).
    #[error("Malformed {field} '{value}': {reason}")]
    MalformedTime {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Caller-supplied parameters that can never yield a correct result.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl EngineError {
    pub(crate) fn malformed(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::MalformedTime {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// True for per-appointment input errors, false for caller configuration errors.
    pub fn is_malformed_time(&self) -> bool {
        matches!(self, EngineError::MalformedTime { .. })
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
