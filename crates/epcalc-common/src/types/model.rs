//! Model Types - modules, bounties and bonuses
//!
//! A model describes one click's worth of expected yield across three
//! revenue categories:
//! - Modules: product placements, weighted by share of clicks (Σw = 1)
//! - Bounties: flat payouts attached per click, independent of orders
//! - Bonuses: per-order adders, scaled by the aggregate order rate
//!
//! All rates are decimals (0.03), never percentages (3).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product placement contributing orders and commission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Unique id within `modules`
    pub id: String,

    /// Share of product clicks routed to this module (w, 0-1)
    #[serde(with = "rust_decimal::serde::float")]
    pub weight: Decimal,

    /// Purchase conversion per click (c, >= 0)
    #[serde(with = "rust_decimal::serde::float")]
    pub conversion: Decimal,

    /// Average order value in USD (a, >= 0)
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_order_value: Decimal,

    /// Commission rate on order value (r, 0-1)
    #[serde(with = "rust_decimal::serde::float")]
    pub commission_rate: Decimal,
}

impl Module {
    pub fn new(
        id: impl Into<String>,
        weight: Decimal,
        conversion: Decimal,
        avg_order_value: Decimal,
        commission_rate: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            weight,
            conversion,
            avg_order_value,
            commission_rate,
        }
    }
}

/// Fixed payout attached to a click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounty {
    /// Unique id within `bounties`
    pub id: String,

    /// Probability a click triggers the bounty (β, 0-1)
    #[serde(with = "rust_decimal::serde::float")]
    pub attach_rate: Decimal,

    /// Payout per bounty in USD (P, >= 0)
    #[serde(with = "rust_decimal::serde::float")]
    pub payout: Decimal,
}

impl Bounty {
    pub fn new(id: impl Into<String>, attach_rate: Decimal, payout: Decimal) -> Self {
        Self {
            id: id.into(),
            attach_rate,
            payout,
        }
    }
}

/// Per-order adder (e.g. first-purchase bonus)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    /// Unique id within `bonuses`
    pub id: String,

    /// Share of orders that qualify (q, 0-1)
    #[serde(with = "rust_decimal::serde::float")]
    pub qualify_share: Decimal,

    /// Payout per qualifying order in USD (v, >= 0)
    #[serde(with = "rust_decimal::serde::float")]
    pub payout_per_order: Decimal,
}

impl Bonus {
    pub fn new(id: impl Into<String>, qualify_share: Decimal, payout_per_order: Decimal) -> Self {
        Self {
            id: id.into(),
            qualify_share,
            payout_per_order,
        }
    }
}

/// Complete EPC model, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub modules: Vec<Module>,
    pub bounties: Vec<Bounty>,
    pub bonuses: Vec<Bonus>,
}

impl Model {
    pub fn new(modules: Vec<Module>, bounties: Vec<Bounty>, bonuses: Vec<Bonus>) -> Self {
        Self {
            modules,
            bounties,
            bonuses,
        }
    }

    /// Add a module
    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    /// Add a bounty
    pub fn with_bounty(mut self, bounty: Bounty) -> Self {
        self.bounties.push(bounty);
        self
    }

    /// Add a bonus
    pub fn with_bonus(mut self, bonus: Bonus) -> Self {
        self.bonuses.push(bonus);
        self
    }

    /// True when all three categories are empty
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.bounties.is_empty() && self.bonuses.is_empty()
    }

    /// Sum of module weights (Σw)
    pub fn total_weight(&self) -> Decimal {
        self.modules.iter().map(|m| m.weight).sum()
    }
}
