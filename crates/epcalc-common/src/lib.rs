//! # EPCalc Common
//!
//! Shared types and errors for the EPCalc expected-profit-per-click engine.
//!
//! ## Core Types
//!
//! - [`Model`]: Validated modules, bounties and bonuses
//! - [`EpcResult`]: EPC aggregates, per-1000-click totals and bid guidance
//! - [`Breakdown`]: Per-entity contributions in input order
//!
//! ## Errors
//!
//! - [`ValidationError`]: Schema, range, duplicate id, weight sum, empty model
//! - [`EvaluationError`]: Margin range and decimal overflow

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{EpcError, EvaluationError, Result, ValidationError};
pub use types::{
    model::{Bonus, Bounty, Model, Module},
    result::{Breakdown, Components, Contribution, EpcResult},
    warning::ValidationWarning,
};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Only document schema version understood by the validator
pub const SCHEMA_VERSION: u64 = 1;

/// Module weights must sum to 1 within this band to pass silently
pub const STRICT_WEIGHT_TOLERANCE: Decimal = dec!(0.000001);

/// Outside the strict band but inside this one is a warning in lenient mode
pub const LENIENT_WEIGHT_TOLERANCE: Decimal = dec!(0.01);

/// Default target margin for the CPC cap (30%)
pub const DEFAULT_TARGET_MARGIN: Decimal = dec!(0.30);

/// Scale for revenue/orders per 1000 clicks
pub const CLICKS_PER_MILLE: Decimal = dec!(1000);
