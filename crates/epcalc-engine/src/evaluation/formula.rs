//! Per-entity EPC terms
//!
//! - Module order rate: w·c
//! - Module contribution: w·c·a·r
//! - Bounty contribution: β·P
//! - Bonus rate per order: q·v

use epcalc_common::{Bonus, Bounty, EvaluationError, Module};
use rust_decimal::Decimal;

pub(crate) fn mul(a: Decimal, b: Decimal, stage: &'static str) -> Result<Decimal, EvaluationError> {
    a.checked_mul(b).ok_or(EvaluationError::Overflow { stage })
}

pub(crate) fn add(a: Decimal, b: Decimal, stage: &'static str) -> Result<Decimal, EvaluationError> {
    a.checked_add(b).ok_or(EvaluationError::Overflow { stage })
}

/// Checked Σ over already-computed terms
pub(crate) fn sum(
    terms: impl IntoIterator<Item = Decimal>,
    stage: &'static str,
) -> Result<Decimal, EvaluationError> {
    terms
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, term| add(acc, term, stage))
}

/// Orders per click from one module: w·c
pub fn module_order_rate(module: &Module) -> Result<Decimal, EvaluationError> {
    mul(module.weight, module.conversion, "order_rate")
}

/// Product EPC from one module: w·c·a·r
pub fn module_contribution(module: &Module) -> Result<Decimal, EvaluationError> {
    let orders = module_order_rate(module)?;
    let order_value = mul(orders, module.avg_order_value, "product_revenue")?;
    mul(order_value, module.commission_rate, "product_revenue")
}

/// Bounty EPC: β·P
pub fn bounty_contribution(bounty: &Bounty) -> Result<Decimal, EvaluationError> {
    mul(bounty.attach_rate, bounty.payout, "bounty_revenue")
}

/// Expected bonus per order: q·v
pub fn bonus_per_order(bonus: &Bonus) -> Result<Decimal, EvaluationError> {
    mul(bonus.qualify_share, bonus.payout_per_order, "bonus_revenue")
}
