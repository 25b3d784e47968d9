//! Validation module
//!
//! Turns a raw JSON document into a [`epcalc_common::Model`]:
//! - Required fields and numeric types, with field paths
//! - Decimal ranges (rates in [0, 1], amounts >= 0)
//! - Unique ids per category
//! - Module weight sum, strict or lenient

mod fields;
pub mod validator;

pub use validator::{validate, Validated, Validator};
