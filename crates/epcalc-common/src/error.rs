//! Error types for EPCalc
//!
//! Provides a unified error type and domain-specific error variants

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using EpcError
pub type Result<T> = std::result::Result<T, EpcError>;

/// Unified error type for EPCalc operations
#[derive(Debug, Error)]
pub enum EpcError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Evaluation errors
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Model validation errors
///
/// Every variant carries the offending field path (e.g. `modules[1].weight`)
/// or category so callers can produce an actionable message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Schema error at {path}: {reason}")]
    Schema { path: String, reason: String },

    #[error(
        "Value {value} at {path} is outside [{min}, {}]",
        .max.map(|m| m.to_string()).unwrap_or_else(|| "inf".to_string())
    )]
    Range {
        path: String,
        value: Decimal,
        min: Decimal,
        /// `None` means unbounded above
        max: Option<Decimal>,
    },

    #[error("Duplicate id '{id}' in {category} at {path}")]
    DuplicateId {
        category: String,
        id: String,
        path: String,
    },

    #[error("Module weights must sum to 1.0 within {tolerance} (got {sum})")]
    WeightSum { sum: Decimal, tolerance: Decimal },

    #[error("Model has no modules, bounties or bonuses")]
    EmptyModel,
}

/// Evaluation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("Target margin {margin} must be within [0, 1)")]
    MarginRange { margin: Decimal },

    #[error("Decimal overflow while computing {stage}")]
    Overflow { stage: &'static str },
}

impl ValidationError {
    /// Stable kind name used for reporting
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Schema { .. } => "schema",
            ValidationError::Range { .. } => "range",
            ValidationError::DuplicateId { .. } => "duplicate_id",
            ValidationError::WeightSum { .. } => "weight_sum",
            ValidationError::EmptyModel => "empty_model",
        }
    }

    /// Missing or mis-typed field at `path`
    pub fn schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::Schema {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl EvaluationError {
    /// Stable kind name used for reporting
    pub fn kind(&self) -> &'static str {
        match self {
            EvaluationError::MarginRange { .. } => "margin_range",
            EvaluationError::Overflow { .. } => "overflow",
        }
    }
}

// Implement From for common external error types
impl From<serde_json::Error> for EpcError {
    fn from(err: serde_json::Error) -> Self {
        EpcError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for EpcError {
    fn from(err: std::io::Error) -> Self {
        EpcError::Storage(err.to_string())
    }
}
