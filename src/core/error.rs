//! Error types for CapSim.

use thiserror::Error;

/// Result type alias for CapSim operations.
pub type Result<T> = std::result::Result<T, CapSimError>;

/// Error types for the cap-table engine.
#[derive(Error, Debug)]
pub enum CapSimError {
    /// Founding equity plus option pools does not add up to 100%.
    #[error("Total equity must sum to 100% (got {total:.4}%)")]
    EquityMismatch { total: f64 },

    /// Priced round carries neither a pre-money nor a post-money valuation.
    #[error("Priced round '{round}' requires a pre-money or post-money valuation")]
    MissingValuation { round: String },

    /// Priced round carries both valuations.
    #[error("Priced round '{round}' must specify only one of pre-money or post-money valuation")]
    ConflictingValuation { round: String },

    /// Convertible instrument without a valuation cap.
    #[error("SAFE without cap requires conversion round details (round '{round}')")]
    UncappedConvertible { round: String },

    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// A computed state broke the share or percentage invariants.
    #[error("Invariant violated in state '{label}': {message}")]
    InvariantViolation { label: String, message: String },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CapSimError {
    /// Create an equity mismatch error.
    pub fn equity_mismatch(total: f64) -> Self {
        Self::EquityMismatch { total }
    }

    /// Create a missing valuation error.
    pub fn missing_valuation(round: impl Into<String>) -> Self {
        Self::MissingValuation {
            round: round.into(),
        }
    }

    /// Create a conflicting valuation error.
    pub fn conflicting_valuation(round: impl Into<String>) -> Self {
        Self::ConflictingValuation {
            round: round.into(),
        }
    }

    /// Create an uncapped convertible error.
    pub fn uncapped_convertible(round: impl Into<String>) -> Self {
        Self::UncappedConvertible {
            round: round.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an invariant violation error.
    pub fn invariant_violation(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            label: label.into(),
            message: message.into(),
        }
    }
}

#[cfg(feature = "python")]
impl From<CapSimError> for pyo3::PyErr {
    fn from(err: CapSimError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
