//! Typed field extraction from raw JSON records
//!
//! Every accessor reports failures against a field path such as
//! `modules[2].weight`.

use std::str::FromStr;

use epcalc_common::ValidationError;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

pub(crate) type Record = Map<String, Value>;

/// Path of a record inside a category, e.g. `bounties[1]`
pub(crate) fn item_path(category: &str, index: usize) -> String {
    format!("{}[{}]", category, index)
}

/// Path of a field inside a record, e.g. `bounties[1].payout`
pub(crate) fn field_path(item: &str, field: &str) -> String {
    format!("{}.{}", item, field)
}

/// Category array; an absent key reads as empty
pub(crate) fn category<'a>(root: &'a Record, name: &str) -> Result<&'a [Value], ValidationError> {
    match root.get(name) {
        None => Ok(&[] as &[Value]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(ValidationError::schema(
            name,
            format!("expected an array, found {}", type_name(other)),
        )),
    }
}

pub(crate) fn record<'a>(value: &'a Value, path: &str) -> Result<&'a Record, ValidationError> {
    value.as_object().ok_or_else(|| {
        ValidationError::schema(path, format!("expected an object, found {}", type_name(value)))
    })
}

/// Field under its canonical key or a legacy alias, but not both
fn lookup<'a>(
    record: &'a Record,
    item: &str,
    key: &str,
    alias: Option<&str>,
) -> Result<&'a Value, ValidationError> {
    let canonical = record.get(key);
    let aliased = alias.and_then(|a| record.get(a).map(|v| (a, v)));

    match (canonical, aliased) {
        (Some(_), Some((alias, _))) => Err(ValidationError::schema(
            field_path(item, key),
            format!("both '{}' and its alias '{}' are set", key, alias),
        )),
        (Some(value), None) | (None, Some((_, value))) => Ok(value),
        (None, None) => Err(ValidationError::schema(
            field_path(item, key),
            "missing required field",
        )),
    }
}

/// Non-empty string id (`id`, or legacy `name`)
pub(crate) fn id(record: &Record, item: &str) -> Result<String, ValidationError> {
    let path = field_path(item, "id");
    match lookup(record, item, "id", Some("name"))? {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => Err(ValidationError::schema(path, "id must not be empty")),
        other => Err(ValidationError::schema(
            path,
            format!("expected a string, found {}", type_name(other)),
        )),
    }
}

/// Decimal places `Decimal` can hold
const MAX_SCALE: u32 = 28;

/// Accepted range of a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bounds {
    /// [0, 1]
    UnitInterval,
    /// [0, inf)
    NonNegative,
}

impl Bounds {
    fn max(self) -> Option<Decimal> {
        match self {
            Bounds::UnitInterval => Some(Decimal::ONE),
            Bounds::NonNegative => None,
        }
    }

    pub(crate) fn check(self, value: Decimal, path: String) -> Result<Decimal, ValidationError> {
        let above = self.max().map_or(false, |max| value > max);
        if value < Decimal::ZERO || above {
            return Err(self.out_of_range(value, path));
        }
        Ok(value)
    }

    /// Range test for values too large to hold as a decimal
    fn admits(self, value: f64) -> bool {
        match self {
            Bounds::UnitInterval => (0.0..=1.0).contains(&value),
            Bounds::NonNegative => value >= 0.0,
        }
    }

    fn out_of_range(self, value: Decimal, path: String) -> ValidationError {
        ValidationError::Range {
            path,
            value,
            min: Decimal::ZERO,
            max: self.max(),
        }
    }
}

/// Numeric field as an exact decimal within `bounds`
pub(crate) fn bounded(
    record: &Record,
    item: &str,
    key: &str,
    alias: Option<&str>,
    bounds: Bounds,
) -> Result<Decimal, ValidationError> {
    let path = field_path(item, key);
    match lookup(record, item, key, alias)? {
        Value::Number(n) => {
            let value = number_to_decimal(n, &path, bounds)?;
            bounds.check(value, path)
        }
        other => Err(ValidationError::schema(
            path,
            format!("expected a number, found {}", type_name(other)),
        )),
    }
}

/// Convert from the number's textual form so 0.05 stays 0.05
///
/// Magnitudes below 1e-28 are rounded to 28 places. Magnitudes beyond
/// `Decimal::MAX` are a range error when `bounds` excludes them, and a
/// schema error otherwise.
fn number_to_decimal(number: &Number, path: &str, bounds: Bounds) -> Result<Decimal, ValidationError> {
    let text = number.to_string();
    if let Ok(value) = Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        return Ok(value);
    }

    let unrepresentable = || {
        ValidationError::schema(path, format!("{} is not representable as a decimal", text))
    };
    let approx = number.as_f64().ok_or_else(unrepresentable)?;

    if approx.abs() < 1.0 {
        return round_to_max_scale(approx).ok_or_else(unrepresentable);
    }
    if !bounds.admits(approx) {
        let clamped = if approx < 0.0 { Decimal::MIN } else { Decimal::MAX };
        return Err(bounds.out_of_range(clamped, path.to_string()));
    }
    Err(unrepresentable())
}

fn round_to_max_scale(value: f64) -> Option<Decimal> {
    let scaled = (value * 10f64.powi(MAX_SCALE as i32)).round();
    Decimal::try_from_i128_with_scale(scaled as i128, MAX_SCALE)
        .ok()
        .map(|d| d.normalize())
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
