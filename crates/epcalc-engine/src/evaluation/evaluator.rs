//! EPC evaluator
//!
//! Computes, leaves first:
//! 1. O = Σ w·c
//! 2. E_prod = Σ w·c·a·r
//! 3. E_bty = Σ β·P
//! 4. E_bon = O · Σ q·v (needs O)
//! 5. E = E_prod + E_bty + E_bon
//! 6. per-1000-click totals
//! 7. break-even CPC = E, undefined when E = 0
//! 8. CPC cap = E·(1 − m), undefined when E = 0
//! 9. per-entity breakdown in input order

use epcalc_common::types::bidding;
use epcalc_common::{
    Breakdown, Components, Contribution, EpcResult, EvaluationError, Model, CLICKS_PER_MILLE,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::formula;

/// Evaluates validated models at a fixed target margin
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    target_margin: Decimal,
}

impl Evaluator {
    /// Margin must lie in [0, 1)
    pub fn new(target_margin: Decimal) -> Result<Self, EvaluationError> {
        Ok(Self {
            target_margin: bidding::check_margin(target_margin)?,
        })
    }

    #[instrument(skip(self, model), fields(margin = %self.target_margin))]
    pub fn evaluate(&self, model: &Model) -> Result<EpcResult, EvaluationError> {
        let order_rate = formula::sum(
            model
                .modules
                .iter()
                .map(formula::module_order_rate)
                .collect::<Result<Vec<_>, _>>()?,
            "order_rate",
        )?;

        let products = model
            .modules
            .iter()
            .map(|m| {
                formula::module_contribution(m).map(|amount| Contribution::new(m.id.clone(), amount))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let product_revenue = formula::sum(products.iter().map(|c| c.amount), "product_revenue")?;

        let bounties = model
            .bounties
            .iter()
            .map(|b| {
                formula::bounty_contribution(b).map(|amount| Contribution::new(b.id.clone(), amount))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let bounty_revenue = formula::sum(bounties.iter().map(|c| c.amount), "bounty_revenue")?;

        let per_order = model
            .bonuses
            .iter()
            .map(formula::bonus_per_order)
            .collect::<Result<Vec<_>, _>>()?;
        let bonus_revenue = formula::mul(
            order_rate,
            formula::sum(per_order.iter().copied(), "bonus_revenue")?,
            "bonus_revenue",
        )?;
        let bonuses = model
            .bonuses
            .iter()
            .zip(&per_order)
            .map(|(k, rate)| {
                formula::mul(order_rate, *rate, "bonus_revenue")
                    .map(|amount| Contribution::new(k.id.clone(), amount))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let epc = formula::sum([product_revenue, bounty_revenue, bonus_revenue], "epc")?;

        let revenue_per_1000_clicks =
            formula::mul(epc, CLICKS_PER_MILLE, "revenue_per_1000_clicks")?;
        let orders_per_1000_clicks =
            formula::mul(order_rate, CLICKS_PER_MILLE, "orders_per_1000_clicks")?;

        let break_even_cpc = bidding::break_even_cpc(epc);
        let cpc_cap = bidding::cpc_cap_for_margin(epc, self.target_margin)?;

        debug!(
            %order_rate,
            %product_revenue,
            %bounty_revenue,
            %bonus_revenue,
            %epc,
            "EPC components computed"
        );

        Ok(EpcResult {
            components: Components {
                order_rate,
                product_revenue,
                bounty_revenue,
                bonus_revenue,
            },
            epc,
            revenue_per_1000_clicks,
            orders_per_1000_clicks,
            break_even_cpc,
            target_margin: self.target_margin,
            cpc_cap,
            breakdown: Breakdown {
                products,
                bounties,
                bonuses,
            },
        })
    }
}

/// Evaluate a model at `target_margin`
pub fn evaluate(model: &Model, target_margin: Decimal) -> Result<EpcResult, EvaluationError> {
    Evaluator::new(target_margin)?.evaluate(model)
}
