//! Bid guidance derived from EPC
//!
//! - Break-even CPC: spend per click equals revenue per click, i.e. `E`
//! - CPC cap for margin m: `E × (1 − m)`, with m in [0, 1)
//!
//! Both are undefined (`None`) when `E == 0`.

use rust_decimal::Decimal;

use crate::error::EvaluationError;

/// Reject margins outside [0, 1); never clamped
pub fn check_margin(margin: Decimal) -> Result<Decimal, EvaluationError> {
    if margin < Decimal::ZERO || margin >= Decimal::ONE {
        return Err(EvaluationError::MarginRange { margin });
    }
    Ok(margin)
}

/// Break-even CPC, or `None` when there is no finite break-even
#[inline]
pub fn break_even_cpc(epc: Decimal) -> Option<Decimal> {
    if epc.is_zero() {
        None
    } else {
        Some(epc)
    }
}

/// Maximum CPC that preserves `margin`, or `None` when EPC is zero
pub fn cpc_cap_for_margin(epc: Decimal, margin: Decimal) -> Result<Option<Decimal>, EvaluationError> {
    let margin = check_margin(margin)?;
    let Some(break_even) = break_even_cpc(epc) else {
        return Ok(None);
    };
    break_even
        .checked_mul(Decimal::ONE - margin)
        .map(Some)
        .ok_or(EvaluationError::Overflow {
            stage: "cpc_cap_for_margin",
        })
}
