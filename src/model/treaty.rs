//! Treaty-vs-national-law compliance request and report

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::common::{
    ComplianceStatus, FallbackReason, FieldViolation, ModeUsed, QualityGate,
    RelevanceAssessment, SeverityLevel, check_max_chars, trimmed_optional,
};

pub const EXCERPT_MAX_CHARS: usize = 120_000;
pub const DOC_TEXT_MAX_CHARS: usize = 240_000;
pub const NAME_MAX_CHARS: usize = 255;
/// An excerpt shorter than this needs a document text alongside it
pub const MIN_EXCERPT_CHARS: usize = 50;

/// Inbound body for `POST /api/treaty/analyze`
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TreatyAnalyzeRequest {
    #[serde(default)]
    pub treaty_text: String,
    #[serde(default)]
    pub national_law_text: String,
    #[serde(default)]
    pub treaty_doc_text: Option<String>,
    #[serde(default)]
    pub law_doc_text: Option<String>,
    #[serde(default = "default_treaty_name")]
    pub treaty_name: String,
    #[serde(default = "default_law_name")]
    pub law_name: String,
}

fn default_treaty_name() -> String {
    "Unknown Treaty".to_string()
}

fn default_law_name() -> String {
    "Unknown Law".to_string()
}

/// A validated, trimmed treaty analysis request
#[derive(Debug, Clone, PartialEq)]
pub struct TreatySubmission {
    pub treaty_name: String,
    pub law_name: String,
    pub treaty_text: String,
    pub national_law_text: String,
    pub treaty_doc_text: Option<String>,
    pub law_doc_text: Option<String>,
}

impl TreatyAnalyzeRequest {
    /// Check field bounds and source coverage, collecting every violation
    pub fn validate(self) -> Result<TreatySubmission, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        check_max_chars(&mut violations, "treaty_text", &self.treaty_text, EXCERPT_MAX_CHARS);
        check_max_chars(
            &mut violations,
            "national_law_text",
            &self.national_law_text,
            EXCERPT_MAX_CHARS,
        );
        if let Some(ref doc) = self.treaty_doc_text {
            check_max_chars(&mut violations, "treaty_doc_text", doc, DOC_TEXT_MAX_CHARS);
        }
        if let Some(ref doc) = self.law_doc_text {
            check_max_chars(&mut violations, "law_doc_text", doc, DOC_TEXT_MAX_CHARS);
        }
        check_max_chars(&mut violations, "treaty_name", &self.treaty_name, NAME_MAX_CHARS);
        check_max_chars(&mut violations, "law_name", &self.law_name, NAME_MAX_CHARS);

        let submission = TreatySubmission {
            treaty_name: self.treaty_name.trim().to_string(),
            law_name: self.law_name.trim().to_string(),
            treaty_text: self.treaty_text.trim().to_string(),
            national_law_text: self.national_law_text.trim().to_string(),
            treaty_doc_text: trimmed_optional(self.treaty_doc_text),
            law_doc_text: trimmed_optional(self.law_doc_text),
        };

        if submission.treaty_name.is_empty() {
            violations.push(FieldViolation::new("treaty_name", "treaty_name must not be blank"));
        }
        if submission.law_name.is_empty() {
            violations.push(FieldViolation::new("law_name", "law_name must not be blank"));
        }
        if submission.treaty_text.chars().count() < MIN_EXCERPT_CHARS
            && submission.treaty_doc_text.is_none()
        {
            violations.push(FieldViolation::new(
                "treaty_text",
                "provide treaty_text with at least 50 chars or treaty_doc_text",
            ));
        }
        if submission.national_law_text.chars().count() < MIN_EXCERPT_CHARS
            && submission.law_doc_text.is_none()
        {
            violations.push(FieldViolation::new(
                "national_law_text",
                "provide national_law_text with at least 50 chars or law_doc_text",
            ));
        }

        if violations.is_empty() {
            Ok(submission)
        } else {
            Err(violations)
        }
    }
}

/// One treaty article mapped against the domestic instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TreatyAnalysisResult {
    pub treaty_article: String,
    pub obligation: String,
    pub treaty_clause_text: String,
    pub national_mapping: String,
    pub domestic_clause_text: String,
    pub status: ComplianceStatus,
    pub severity: SeverityLevel,
    pub recommendation: String,
    /// Always within `[0.0, 1.0]`
    pub confidence: f64,
    pub confidence_rationale: String,
}

/// Report body produced by either the model path or the fallback path
#[derive(Debug, Clone, PartialEq)]
pub struct TreatyReport {
    pub executive_summary: String,
    pub top_urgent_gaps: Vec<String>,
    pub action_list_30_60_90: Vec<String>,
    pub human_review_disclaimer: String,
    pub results: Vec<TreatyAnalysisResult>,
}

/// Response for `POST /api/treaty/analyze`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TreatyAnalyzeResponse {
    pub treaty: String,
    pub law: String,
    pub generated_at: String,
    pub reference_no: String,
    pub mode_used: ModeUsed,
    pub fallback_reason: Option<FallbackReason>,
    #[serde(flatten)]
    pub relevance: RelevanceAssessment,
    pub classification: String,
    pub executive_summary: String,
    pub top_urgent_gaps: Vec<String>,
    pub action_list_30_60_90: Vec<String>,
    pub human_review_disclaimer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_gate: Option<QualityGate>,
    pub results: Vec<TreatyAnalysisResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TreatyAnalyzeRequest {
        serde_json::from_value(serde_json::json!({
            "treaty_name": "  Paris Agreement ",
            "law_name": "Environment Conservation Act",
            "treaty_text": "Each Party shall prepare, communicate and maintain successive nationally determined contributions.",
            "national_law_text": "The Government may by notification in the official Gazette declare an ecologically critical area."
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request_is_trimmed() {
        let submission = request().validate().unwrap();
        assert_eq!(submission.treaty_name, "Paris Agreement");
        assert!(submission.treaty_doc_text.is_none());
    }

    #[test]
    fn test_names_default_when_absent() {
        let req: TreatyAnalyzeRequest = serde_json::from_value(serde_json::json!({
            "treaty_doc_text": "Article 1 ...",
            "law_doc_text": "Section 1 ..."
        }))
        .unwrap();
        let submission = req.validate().unwrap();
        assert_eq!(submission.treaty_name, "Unknown Treaty");
        assert_eq!(submission.law_name, "Unknown Law");
    }

    #[test]
    fn test_short_excerpt_without_document_is_rejected() {
        let mut req = request();
        req.treaty_text = "Article 4".to_string();
        req.treaty_doc_text = Some("   ".to_string());

        let violations = req.validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "treaty_text");
    }

    #[test]
    fn test_short_excerpt_with_document_is_accepted() {
        let mut req = request();
        req.national_law_text = String::new();
        req.law_doc_text = Some("Section 5. The Department of Environment shall ...".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_every_violation_is_reported() {
        let mut req = request();
        req.treaty_name = "   ".to_string();
        req.law_name = "x".repeat(NAME_MAX_CHARS + 1);
        req.national_law_text = "short".to_string();

        let fields: Vec<String> = req
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert!(fields.contains(&"treaty_name".to_string()));
        assert!(fields.contains(&"law_name".to_string()));
        assert!(fields.contains(&"national_law_text".to_string()));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<TreatyAnalyzeRequest, _> = serde_json::from_value(serde_json::json!({
            "treaty_name": "Paris Agreement",
            "jurisdiction": "BD"
        }));
        assert!(result.is_err());
    }
}
