//! Coercion of untrusted model JSON into a treaty report

use serde_json::Value;

use crate::model::{TreatyAnalysisResult, TreatyReport};
use crate::service::coerce::{
    DEFAULT_LIST_LIMIT, URGENT_GAP_LIMIT, confidence, enum_field, string_list, text_field,
    text_field_or,
};
use crate::service::json_extract::JsonObject;
use crate::service::treaty::actions::normalize_30_60_90_actions;

const DEFAULT_CONFIDENCE_RATIONALE: &str =
    "Mapping confidence estimated from direct textual overlap and clause specificity.";

/// Build a treaty report from model output, or `None` if it is not trustworthy
///
/// Rejected when fewer than `min_rows` rows survive coercion or when the
/// summary or disclaimer is missing.
pub fn coerce_treaty_report(object: &JsonObject, min_rows: usize) -> Option<TreatyReport> {
    let results = coerce_results(object.get("results"));
    if results.len() < min_rows {
        tracing::debug!(
            rows = results.len(),
            min_rows = min_rows,
            "Model treaty output has too few valid rows"
        );
        return None;
    }

    let executive_summary = text_field(object, "executive_summary");
    let human_review_disclaimer = text_field(object, "human_review_disclaimer");
    if executive_summary.is_empty() || human_review_disclaimer.is_empty() {
        tracing::debug!("Model treaty output is missing summary or disclaimer");
        return None;
    }

    let actions = string_list(object.get("action_list_30_60_90"), DEFAULT_LIST_LIMIT);

    Some(TreatyReport {
        executive_summary,
        top_urgent_gaps: string_list(object.get("top_urgent_gaps"), URGENT_GAP_LIMIT),
        action_list_30_60_90: normalize_30_60_90_actions(&actions),
        human_review_disclaimer,
        results,
    })
}

/// Keep only the rows that carry every mandatory field
pub fn coerce_results(value: Option<&Value>) -> Vec<TreatyAnalysisResult> {
    let Some(Value::Array(rows)) = value else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(Value::as_object)
        .filter_map(coerce_result_row)
        .collect()
}

fn coerce_result_row(row: &JsonObject) -> Option<TreatyAnalysisResult> {
    let treaty_article = text_field(row, "treaty_article");
    let obligation = text_field(row, "obligation");
    let national_mapping = text_field(row, "national_mapping");
    let recommendation = text_field(row, "recommendation");

    if treaty_article.is_empty()
        || obligation.is_empty()
        || national_mapping.is_empty()
        || recommendation.is_empty()
    {
        return None;
    }

    Some(TreatyAnalysisResult {
        treaty_clause_text: text_field_or(row, "treaty_clause_text", &obligation),
        domestic_clause_text: text_field_or(row, "domestic_clause_text", &national_mapping),
        confidence_rationale: text_field_or(
            row,
            "confidence_rationale",
            DEFAULT_CONFIDENCE_RATIONALE,
        ),
        status: enum_field(row, "status"),
        severity: enum_field(row, "severity"),
        confidence: confidence(row.get("confidence")),
        treaty_article,
        obligation,
        national_mapping,
        recommendation,
    })
}
