//! Console summary and exit codes

use std::fmt::Write;

use epcalc_common::{EpcError, EvaluationError, ValidationError};
use epcalc_engine::EpcReport;
use rust_decimal::Decimal;

/// Process exit code for a failed run
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<EpcError>() {
        Some(EpcError::Validation(v)) => match v {
            ValidationError::Schema { .. } => 2,
            ValidationError::Range { .. } => 3,
            ValidationError::DuplicateId { .. } => 4,
            ValidationError::WeightSum { .. } => 5,
            ValidationError::EmptyModel => 6,
        },
        Some(EpcError::Evaluation(e)) => match e {
            EvaluationError::MarginRange { .. } => 7,
            EvaluationError::Overflow { .. } => 8,
        },
        _ => 1,
    }
}

/// Exit code for a command-line parse failure; help and version output are not failures
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

fn usd(value: Option<Decimal>, dp: u32) -> String {
    match value {
        Some(v) => format!("${:.*}", dp as usize, v.round_dp(dp)),
        None => "undefined".to_string(),
    }
}

/// Human-readable summary of a report
pub fn summary(report: &EpcReport) -> String {
    let r = &report.result;
    let c = &r.components;
    let margin_pct = (r.target_margin * Decimal::ONE_HUNDRED).normalize();
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "== EPC CALC RESULT ==");
    let _ = writeln!(out, "EPC (USD/click):         {:.6}", r.epc.round_dp(6));
    let _ = writeln!(out, "Revenue per 1000 clicks: {}", usd(Some(r.revenue_per_1000_clicks), 2));
    let _ = writeln!(out, "Orders per 1000 clicks:  {:.2}", r.orders_per_1000_clicks.round_dp(2));
    let _ = writeln!(out, "--- Components ---");
    let _ = writeln!(out, "EPC - Products:          {:.6}", c.product_revenue.round_dp(6));
    let _ = writeln!(out, "EPC - Bounties:          {:.6}", c.bounty_revenue.round_dp(6));
    let _ = writeln!(out, "EPC - Bonuses:           {:.6}", c.bonus_revenue.round_dp(6));
    let _ = writeln!(out, "--- Pricing Guidance ---");
    let _ = writeln!(out, "Break-even CPC:          {}", usd(r.break_even_cpc, 4));
    let _ = writeln!(out, "CPC cap @ margin {}%: {}", margin_pct, usd(r.cpc_cap, 4));

    for warning in &report.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }

    out
}
