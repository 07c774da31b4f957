//! Quality gate for finished treaty reports

use crate::model::{QualityGate, TreatyAnalyzeResponse};
use crate::service::treaty::actions::{DAY_HORIZONS, action_for_horizon, is_authority_named};

/// Check article coverage and the 30/60/90 plan, accumulating every violation
pub fn evaluate_treaty_gate(response: &TreatyAnalyzeResponse, min_rows: usize) -> QualityGate {
    let mut reasons = Vec::new();

    if response.results.len() < min_rows {
        reasons.push(format!(
            "Minimum article coverage failed: fewer than {} treaty articles mapped.",
            min_rows
        ));
    }

    for day in DAY_HORIZONS {
        match action_for_horizon(&response.action_list_30_60_90, day) {
            None => reasons.push(format!("Action plan incomplete: missing {}-day action.", day)),
            Some(action) if !is_authority_named(action) => reasons.push(format!(
                "Action plan authority missing: {}-day action has no named ministry/authority.",
                day
            )),
            Some(_) => {}
        }
    }

    QualityGate::from_reasons(reasons)
}
