//! Integration Tests for EPCalc
//!
//! Exercises the full validate → evaluate pipeline on raw JSON documents:
//! - Concrete EPC scenarios
//! - Strict vs lenient weight-sum handling
//! - Error taxonomy with field paths
//! - Output document shape

use epcalc_common::{EpcError, EvaluationError, ValidationError};
use epcalc_engine::{evaluate, validate, EngineConfig, EpcEngine};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn blended_document() -> Value {
    json!({
        "modules": [
            {"id": "A", "weight": 0.60, "conversion": 0.030, "avg_order_value": 45.0, "commission_rate": 0.030},
            {"id": "B", "weight": 0.25, "conversion": 0.030, "avg_order_value": 90.0, "commission_rate": 0.045},
            {"id": "C", "weight": 0.15, "conversion": 0.025, "avg_order_value": 150.0, "commission_rate": 0.040}
        ],
        "bounties": [
            {"id": "B1", "attach_rate": 0.008, "payout": 3.0},
            {"id": "B2", "attach_rate": 0.002, "payout": 10.0}
        ],
        "bonuses": [
            {"id": "Q1", "qualify_share": 0.10, "payout_per_order": 3.0}
        ]
    })
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    /// Test: single module, no bounties or bonuses
    #[test]
    fn test_single_module_scenario() {
        let raw = json!({
            "modules": [{"id": "m1", "weight": 1.0, "conversion": 0.05, "avg_order_value": 100, "commission_rate": 0.08}],
            "bounties": [],
            "bonuses": []
        });

        let model = validate(&raw, true).unwrap().model;
        let result = evaluate(&model, dec!(0.30)).unwrap();

        assert_eq!(result.components.order_rate, dec!(0.05));
        assert_eq!(result.components.product_revenue, dec!(0.4));
        assert_eq!(result.epc, dec!(0.4));
        assert_eq!(result.revenue_per_1000_clicks, dec!(400));
        assert_eq!(result.orders_per_1000_clicks, dec!(50));
        assert_eq!(result.break_even_cpc, Some(dec!(0.4)));
        assert_eq!(result.cpc_cap, Some(dec!(0.28)));
    }

    /// Test: three modules, two bounties, one bonus
    #[test]
    fn test_blended_scenario() {
        let model = validate(&blended_document(), true).unwrap().model;
        let result = evaluate(&model, dec!(0.30)).unwrap();

        assert_eq!(result.epc, dec!(0.12995));
        assert_eq!(result.components.product_revenue, dec!(0.077175));
        assert_eq!(result.components.bounty_revenue, dec!(0.044));
        assert_eq!(result.components.bonus_revenue, dec!(0.008775));
        assert_eq!(result.revenue_per_1000_clicks, dec!(129.95));
        assert_eq!(result.orders_per_1000_clicks, dec!(29.25));
    }

    /// Test: all rates and payouts zero
    #[test]
    fn test_zero_epc_scenario() {
        let raw = json!({
            "modules": [{"id": "m1", "weight": 1, "conversion": 0, "avg_order_value": 0, "commission_rate": 0}],
            "bounties": [{"id": "b1", "attach_rate": 0, "payout": 0}],
            "bonuses": [{"id": "k1", "qualify_share": 0, "payout_per_order": 0}]
        });

        let report = EpcEngine::default().run(&raw).unwrap();
        assert_eq!(report.result.epc, Decimal::ZERO);
        assert_eq!(report.result.break_even_cpc, None);
        assert_eq!(report.result.cpc_cap, None);

        let value = serde_json::to_value(&report).unwrap();
        assert!(value["result"]["break_even_cpc"].is_null());
        assert!(value["result"]["cpc_cap_for_margin"].is_null());
    }

    /// Test: legacy field names evaluate identically
    #[test]
    fn test_legacy_document_matches_canonical() {
        let legacy = json!({
            "modules": [
                {"name": "A", "weight": 0.60, "conv": 0.030, "aov": 45.0, "rate": 0.030},
                {"name": "B", "weight": 0.25, "conv": 0.030, "aov": 90.0, "rate": 0.045},
                {"name": "C", "weight": 0.15, "conv": 0.025, "aov": 150.0, "rate": 0.040}
            ],
            "bounties": [
                {"name": "B1", "attach": 0.008, "payout": 3.0},
                {"name": "B2", "attach": 0.002, "payout": 10.0}
            ],
            "bonuses": [{"name": "Q1", "order_share": 0.10, "payout": 3.0}]
        });

        let engine = EpcEngine::default();
        let from_legacy = engine.run(&legacy).unwrap();
        let from_canonical = engine.run(&blended_document()).unwrap();
        assert_eq!(from_legacy.result, from_canonical.result);
    }
}

#[cfg(test)]
mod strictness_tests {
    use super::*;

    fn drifting_document() -> Value {
        json!({
            "modules": [
                {"id": "A", "weight": 0.500, "conversion": 0.03, "avg_order_value": 50, "commission_rate": 0.05},
                {"id": "B", "weight": 0.495, "conversion": 0.02, "avg_order_value": 80, "commission_rate": 0.04}
            ]
        })
    }

    /// Test: weight sum 0.995 warns in lenient mode, evaluating as given
    #[test]
    fn test_lenient_mode_warns() {
        let report = EpcEngine::default().run(&drifting_document()).unwrap();

        assert_eq!(report.warnings.len(), 1);
        // 0.5·0.03 + 0.495·0.02, no renormalization
        assert_eq!(report.result.components.order_rate, dec!(0.0249));
    }

    /// Test: the same document fails in strict mode
    #[test]
    fn test_strict_mode_fails() {
        let engine = EpcEngine::new(EngineConfig {
            strict: true,
            ..Default::default()
        });

        let err = engine.run(&drifting_document()).unwrap_err();
        assert!(matches!(
            err,
            EpcError::Validation(ValidationError::WeightSum { sum, .. }) if sum == dec!(0.995)
        ));
    }

    /// Test: duplicate ids fail regardless of strictness
    #[test]
    fn test_duplicate_ids_ignore_strictness() {
        let raw = json!({
            "modules": [
                {"id": "m1", "weight": 0.5, "conversion": 0.03, "avg_order_value": 50, "commission_rate": 0.05},
                {"id": "m1", "weight": 0.5, "conversion": 0.03, "avg_order_value": 50, "commission_rate": 0.05}
            ]
        });

        for strict in [false, true] {
            match validate(&raw, strict) {
                Err(ValidationError::DuplicateId { id, category, .. }) => {
                    assert_eq!(id, "m1");
                    assert_eq!(category, "modules");
                }
                other => panic!("expected duplicate id error, got {:?}", other),
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    /// Test: missing field reports its path
    #[test]
    fn test_missing_field() {
        let mut raw = blended_document();
        raw["modules"][1]
            .as_object_mut()
            .unwrap()
            .remove("commission_rate");

        assert_eq!(
            validate(&raw, false).unwrap_err(),
            ValidationError::Schema {
                path: "modules[1].commission_rate".to_string(),
                reason: "missing required field".to_string(),
            }
        );
    }

    /// Test: out-of-range weight
    #[test]
    fn test_weight_out_of_range() {
        let mut raw = blended_document();
        raw["modules"][0]["weight"] = json!(1.2);

        let err = validate(&raw, false).unwrap_err();
        assert_eq!(err.kind(), "range");
        assert!(err.to_string().contains("modules[0].weight"));
    }

    /// Test: empty model
    #[test]
    fn test_all_categories_empty() {
        let raw = json!({"modules": [], "bounties": [], "bonuses": []});
        let err = EpcEngine::default().run(&raw).unwrap_err();
        assert!(matches!(err, EpcError::Validation(ValidationError::EmptyModel)));
    }

    /// Test: margin outside [0, 1) is an error, not clamped
    #[test]
    fn test_margin_out_of_range() {
        let model = validate(&blended_document(), false).unwrap().model;

        for margin in [dec!(1), dec!(1.5), dec!(-0.01)] {
            assert_eq!(
                evaluate(&model, margin).unwrap_err(),
                EvaluationError::MarginRange { margin }
            );
        }
    }
}

#[cfg(test)]
mod output_tests {
    use super::*;

    /// Test: report shape and decimal number encoding
    #[test]
    fn test_report_document_shape() {
        let report = EpcEngine::default().run(&blended_document()).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        let result = &value["result"];
        for key in [
            "order_rate",
            "product_revenue",
            "bounty_revenue",
            "bonus_revenue",
        ] {
            assert!(result["components"][key].is_number(), "components.{} should be a number", key);
        }
        assert_eq!(result["components"]["bonus_revenue"].as_f64(), Some(0.008775));

        for key in [
            "epc",
            "revenue_per_1000_clicks",
            "orders_per_1000_clicks",
            "break_even_cpc",
            "target_margin",
            "cpc_cap_for_margin",
        ] {
            assert!(result[key].is_number(), "{} should be a number", key);
        }

        let products = result["breakdown"]["products"].as_array().unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0]["id"], "A");
        assert_eq!(result["breakdown"]["bonuses"][0]["id"], "Q1");
        assert_eq!(value["inputs"]["bounties"][1]["id"], "B2");
    }
}
