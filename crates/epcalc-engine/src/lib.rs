//! # EPCalc Engine
//!
//! Model validation and expected-profit-per-click evaluation.
//!
//! ## EPC Formula
//!
//! ```text
//! E = E_prod + E_bty + E_bon
//! ```
//!
//! Where:
//! - E_prod: Σ w·c·a·r over product modules
//! - E_bty: Σ β·P over bounties
//! - E_bon: O · Σ q·v over bonuses, with O = Σ w·c
//!
//! Raw documents go through [`validation::Validator`] first, then
//! [`evaluation::Evaluator`]. Both are pure; nothing is kept between runs.

pub mod evaluation;
pub mod validation;

pub use evaluation::{evaluate, Evaluator};
pub use validation::{validate, Validated, Validator};

use epcalc_common::{EpcResult, Model, Result, ValidationWarning};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Escalate weight-sum warnings to failures
    pub strict: bool,
    /// Margin used for the CPC cap
    pub target_margin: Decimal,
    /// Weight-sum band that passes silently
    pub strict_tolerance: Decimal,
    /// Weight-sum band that warns in lenient mode
    pub lenient_tolerance: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict: false,
            target_margin: epcalc_common::DEFAULT_TARGET_MARGIN,
            strict_tolerance: epcalc_common::STRICT_WEIGHT_TOLERANCE,
            lenient_tolerance: epcalc_common::LENIENT_WEIGHT_TOLERANCE,
        }
    }
}

/// Output document: validated inputs, result and any validation warnings
#[derive(Debug, Clone, Serialize)]
pub struct EpcReport {
    pub inputs: Model,
    pub result: EpcResult,
    pub warnings: Vec<ValidationWarning>,
}

/// Validate-then-evaluate pipeline
pub struct EpcEngine {
    config: EngineConfig,
}

impl EpcEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Validate a raw document and evaluate it at the configured margin
    #[instrument(skip(self, raw), fields(strict = self.config.strict, margin = %self.config.target_margin))]
    pub fn run(&self, raw: &Value) -> Result<EpcReport> {
        // Margin problems are reported before the document is inspected
        let evaluator = Evaluator::new(self.config.target_margin)?;

        let validator = Validator::new(self.config.strict)
            .with_tolerances(self.config.strict_tolerance, self.config.lenient_tolerance);
        let Validated { model, warnings } = validator.validate(raw)?;

        let result = evaluator.evaluate(&model)?;
        info!(epc = %result.epc, warnings = warnings.len(), "EPC evaluated");

        Ok(EpcReport {
            inputs: model,
            result,
            warnings,
        })
    }
}

impl Default for EpcEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
