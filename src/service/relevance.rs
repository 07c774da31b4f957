//! Keyword-overlap relevance heuristic
//!
//! Not a classifier: its only job is to flag submissions that are obviously
//! off-topic so the report can carry a warning.

use crate::model::{CrisisScenario, RelevanceAssessment, RelevanceStatus, TreatySubmission};

pub const TREATY_KEYWORDS: &[&str] = &["article", "party", "agreement", "convention", "treaty", "protocol"];

pub const LAW_KEYWORDS: &[&str] = &["act", "section", "rule", "policy", "order", "law"];

pub const CRISIS_KEYWORDS: &[&str] = &[
    "mission",
    "crisis",
    "evac",
    "consular",
    "security",
    "nationals",
    "hotline",
    "shelter",
    "roadblock",
    "telecom",
];

const HIGH_THRESHOLD: f64 = 0.5;
const MEDIUM_THRESHOLD: f64 = 0.2;

const TREATY_WARNING: &str =
    "Uploaded or pasted text appears weakly related to treaty/law analysis. Results may be unreliable.";
const CRISIS_WARNING: &str =
    "Scenario inputs appear weakly related to consular crisis planning. Output may be unreliable.";

/// Score `text` by the share of `keywords` it contains as substrings
pub fn score_keywords(text: &str, keywords: &[&str]) -> (RelevanceStatus, f64) {
    let base = text.to_lowercase();
    if base.trim().is_empty() {
        return (RelevanceStatus::Low, 0.0);
    }

    let hits = keywords
        .iter()
        .filter(|kw| !kw.is_empty() && base.contains(&kw.to_lowercase()))
        .count();

    let score = (hits as f64 / keywords.len().max(1) as f64).min(1.0);
    let status = if score >= HIGH_THRESHOLD {
        RelevanceStatus::High
    } else if score >= MEDIUM_THRESHOLD {
        RelevanceStatus::Medium
    } else {
        RelevanceStatus::Low
    };

    (status, score)
}

/// Assess both sides of a treaty submission; the weaker side dominates
pub fn assess_treaty(submission: &TreatySubmission) -> RelevanceAssessment {
    let treaty_input = [
        submission.treaty_name.as_str(),
        submission.treaty_text.as_str(),
        submission.treaty_doc_text.as_deref().unwrap_or_default(),
    ]
    .join("\n");
    let law_input = [
        submission.law_name.as_str(),
        submission.national_law_text.as_str(),
        submission.law_doc_text.as_deref().unwrap_or_default(),
    ]
    .join("\n");

    let (treaty_status, treaty_score) = score_keywords(&treaty_input, TREATY_KEYWORDS);
    let (law_status, law_score) = score_keywords(&law_input, LAW_KEYWORDS);

    let status = match (treaty_status, law_status) {
        (RelevanceStatus::Low, _) | (_, RelevanceStatus::Low) => RelevanceStatus::Low,
        (RelevanceStatus::High, RelevanceStatus::High) => RelevanceStatus::High,
        _ => RelevanceStatus::Medium,
    };

    tracing::debug!(
        treaty_score = treaty_score,
        law_score = law_score,
        status = ?status,
        "Treaty relevance assessed"
    );

    build_assessment(status, (treaty_score + law_score) / 2.0, TREATY_WARNING)
}

/// Assess a crisis scenario against the consular planning vocabulary
pub fn assess_crisis(scenario: &CrisisScenario) -> RelevanceAssessment {
    let input = [
        scenario.mission_location.clone(),
        scenario.crisis_type.clone(),
        scenario.local_conditions.clone(),
        scenario.constraints.join(" "),
        scenario.embassy_resources.join(" "),
        scenario.scenario_doc_text.clone().unwrap_or_default(),
    ]
    .join("\n");

    let (status, score) = score_keywords(&input, CRISIS_KEYWORDS);
    build_assessment(status, score, CRISIS_WARNING)
}

fn build_assessment(status: RelevanceStatus, score: f64, warning: &str) -> RelevanceAssessment {
    RelevanceAssessment {
        relevance_status: status,
        relevance_score: round3(score),
        relevance_warning: (status == RelevanceStatus::Low).then(|| warning.to_string()),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
