//! Non-fatal validation findings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding reported by lenient validation; the model is still produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// Weights sum to 1 only within the lenient band; used as given, unnormalized
    WeightSumDrift {
        #[serde(with = "rust_decimal::serde::float")]
        sum: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        tolerance: Decimal,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::WeightSumDrift { sum, tolerance } => write!(
                f,
                "module weights sum to {} (outside strict tolerance {}); using weights as given",
                sum, tolerance
            ),
        }
    }
}
