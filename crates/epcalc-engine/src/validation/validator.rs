//! Model validator
//!
//! Checks, in order:
//! - document shape and `schema_version`
//! - per-record required fields, types and ranges
//! - id uniqueness within each category
//! - at least one entity across the three categories
//! - module weight sum (strict band, lenient band)

use std::collections::HashSet;
use std::str::FromStr;

use epcalc_common::{
    Bonus, Bounty, Model, Module, ValidationError, ValidationWarning, SCHEMA_VERSION,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::fields::{self, Bounds::{NonNegative, UnitInterval}, Record};

/// Validated model plus non-fatal findings
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub model: Model,
    pub warnings: Vec<ValidationWarning>,
}

impl Validated {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Structural and numeric validator for raw model documents
#[derive(Debug, Clone)]
pub struct Validator {
    strict: bool,
    strict_tolerance: Decimal,
    lenient_tolerance: Decimal,
}

impl Validator {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            strict_tolerance: epcalc_common::STRICT_WEIGHT_TOLERANCE,
            lenient_tolerance: epcalc_common::LENIENT_WEIGHT_TOLERANCE,
        }
    }

    /// Override the weight-sum bands; the lenient band never shrinks below the strict one
    pub fn with_tolerances(mut self, strict_tolerance: Decimal, lenient_tolerance: Decimal) -> Self {
        self.strict_tolerance = strict_tolerance.abs();
        self.lenient_tolerance = lenient_tolerance.abs().max(self.strict_tolerance);
        self
    }

    /// Validate a raw document into a [`Model`]
    #[instrument(skip(self, raw), fields(strict = self.strict))]
    pub fn validate(&self, raw: &Value) -> Result<Validated, ValidationError> {
        let root = fields::record(raw, "$")?;
        Self::check_schema_version(root)?;

        let modules = parse_all(root, "modules", parse_module)?;
        let bounties = parse_all(root, "bounties", parse_bounty)?;
        let bonuses = parse_all(root, "bonuses", parse_bonus)?;

        unique_ids("modules", modules.iter().map(|m| m.id.as_str()))?;
        unique_ids("bounties", bounties.iter().map(|b| b.id.as_str()))?;
        unique_ids("bonuses", bonuses.iter().map(|k| k.id.as_str()))?;

        let model = Model::new(modules, bounties, bonuses);
        if model.is_empty() {
            return Err(ValidationError::EmptyModel);
        }

        let mut warnings = Vec::new();
        if let Some(warning) = self.check_weight_sum(&model)? {
            warn!(%warning, "Lenient validation accepted drifting weights");
            warnings.push(warning);
        }

        debug!(
            modules = model.modules.len(),
            bounties = model.bounties.len(),
            bonuses = model.bonuses.len(),
            "Model validated"
        );

        Ok(Validated { model, warnings })
    }

    fn check_schema_version(root: &Record) -> Result<(), ValidationError> {
        match root.get("schema_version") {
            None => Ok(()),
            // 1 and 1.0 name the same version
            Some(Value::Number(n))
                if Decimal::from_str(&n.to_string()).ok() == Some(Decimal::from(SCHEMA_VERSION)) =>
            {
                Ok(())
            }
            Some(other) => Err(ValidationError::schema(
                "schema_version",
                format!("unsupported schema version {} (expected {})", other, SCHEMA_VERSION),
            )),
        }
    }

    /// Weights are used as given; drift inside the lenient band only warns
    fn check_weight_sum(&self, model: &Model) -> Result<Option<ValidationWarning>, ValidationError> {
        if model.modules.is_empty() {
            return Ok(None);
        }

        let sum = model.total_weight();
        let drift = (sum - Decimal::ONE).abs();

        if drift <= self.strict_tolerance {
            return Ok(None);
        }
        if self.strict || drift > self.lenient_tolerance {
            let tolerance = if self.strict {
                self.strict_tolerance
            } else {
                self.lenient_tolerance
            };
            return Err(ValidationError::WeightSum { sum, tolerance });
        }

        Ok(Some(ValidationWarning::WeightSumDrift {
            sum,
            tolerance: self.strict_tolerance,
        }))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Validate with default tolerances
pub fn validate(raw: &Value, strict: bool) -> Result<Validated, ValidationError> {
    Validator::new(strict).validate(raw)
}

fn parse_all<T>(
    root: &Record,
    category: &str,
    parse: fn(&Record, &str) -> Result<T, ValidationError>,
) -> Result<Vec<T>, ValidationError> {
    fields::category(root, category)?
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let item = fields::item_path(category, index);
            let record = fields::record(value, &item)?;
            parse(record, &item)
        })
        .collect()
}

fn parse_module(record: &Record, item: &str) -> Result<Module, ValidationError> {
    Ok(Module {
        id: fields::id(record, item)?,
        weight: fields::bounded(record, item, "weight", None, UnitInterval)?,
        conversion: fields::bounded(record, item, "conversion", Some("conv"), NonNegative)?,
        avg_order_value: fields::bounded(record, item, "avg_order_value", Some("aov"), NonNegative)?,
        commission_rate: fields::bounded(record, item, "commission_rate", Some("rate"), UnitInterval)?,
    })
}

fn parse_bounty(record: &Record, item: &str) -> Result<Bounty, ValidationError> {
    Ok(Bounty {
        id: fields::id(record, item)?,
        attach_rate: fields::bounded(record, item, "attach_rate", Some("attach"), UnitInterval)?,
        payout: fields::bounded(record, item, "payout", None, NonNegative)?,
    })
}

fn parse_bonus(record: &Record, item: &str) -> Result<Bonus, ValidationError> {
    Ok(Bonus {
        id: fields::id(record, item)?,
        qualify_share: fields::bounded(
            record,
            item,
            "qualify_share",
            Some("order_share"),
            UnitInterval,
        )?,
        payout_per_order: fields::bounded(
            record,
            item,
            "payout_per_order",
            Some("payout"),
            NonNegative,
        )?,
    })
}

/// First repeated id wins the error, reported at its second occurrence
fn unique_ids<'a>(
    category: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                category: category.to_string(),
                id: id.to_string(),
                path: fields::field_path(&fields::item_path(category, index), "id"),
            });
        }
    }
    Ok(())
}
