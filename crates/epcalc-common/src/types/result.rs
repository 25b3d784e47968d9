//! Result Types - E = E_prod + E_bty + E_bon
//!
//! ```text
//! O      = Σ_i w_i·c_i                 orders per click
//! E_prod = Σ_i w_i·c_i·a_i·r_i         EPC from products
//! E_bty  = Σ_j β_j·P_j                 EPC from bounties
//! E_bon  = O · Σ_k q_k·v_k             EPC from order-qualified bonuses
//! E      = E_prod + E_bty + E_bon      blended EPC (USD/click)
//! ```
//!
//! Undefined bid guidance (`E == 0`) serializes as `null`, never `0`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::types::bidding;

/// One entity's share of a category total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Source entity id
    pub id: String,

    /// Contributed USD per click
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl Contribution {
    pub fn new(id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}

/// Per-entity contributions, keyed by category, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub products: Vec<Contribution>,
    pub bounties: Vec<Contribution>,
    pub bonuses: Vec<Contribution>,
}

impl Breakdown {
    /// Look up a category by its serialized name
    pub fn category(&self, name: &str) -> Option<&[Contribution]> {
        match name {
            "products" => Some(&self.products),
            "bounties" => Some(&self.bounties),
            "bonuses" => Some(&self.bonuses),
            _ => None,
        }
    }
}

/// Order rate and the three category revenues that make up EPC
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// O: orders per click
    #[serde(with = "rust_decimal::serde::float")]
    pub order_rate: Decimal,

    /// E_prod: EPC from product commissions
    #[serde(with = "rust_decimal::serde::float")]
    pub product_revenue: Decimal,

    /// E_bty: EPC from bounties
    #[serde(with = "rust_decimal::serde::float")]
    pub bounty_revenue: Decimal,

    /// E_bon: EPC from order bonuses
    #[serde(with = "rust_decimal::serde::float")]
    pub bonus_revenue: Decimal,
}

/// Evaluation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpcResult {
    pub components: Components,

    /// E: blended EPC
    #[serde(with = "rust_decimal::serde::float")]
    pub epc: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub revenue_per_1000_clicks: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub orders_per_1000_clicks: Decimal,

    /// `None` when EPC is zero
    #[serde(with = "rust_decimal::serde::float_option")]
    pub break_even_cpc: Option<Decimal>,

    /// Margin the cap below was computed for
    #[serde(with = "rust_decimal::serde::float")]
    pub target_margin: Decimal,

    /// CPC cap at `target_margin`; `None` when EPC is zero
    #[serde(rename = "cpc_cap_for_margin", with = "rust_decimal::serde::float_option")]
    pub cpc_cap: Option<Decimal>,

    pub breakdown: Breakdown,
}

impl EpcResult {
    /// CPC cap for an arbitrary margin in [0, 1)
    pub fn cpc_cap_for_margin(&self, margin: Decimal) -> Result<Option<Decimal>, EvaluationError> {
        bidding::cpc_cap_for_margin(self.epc, margin)
    }
}
