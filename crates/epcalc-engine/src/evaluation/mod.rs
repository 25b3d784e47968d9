//! Evaluation module
//!
//! Aggregate EPC formulas over a validated model, derived per-1000-click
//! totals, bid guidance and the per-entity breakdown.

pub mod evaluator;
pub mod formula;

pub use evaluator::{evaluate, Evaluator};
