//! Treaty compliance analysis service
//!
//! Maps treaty obligations to domestic law using the completion provider when
//! it is configured and answers usefully, and the canned article tables otherwise.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{
    CLASSIFICATION_LABEL, FallbackReason, ModeUsed, QualityConfig, RelevanceAssessment,
    TreatyAnalyzeResponse, TreatyReport, TreatySubmission,
};
use crate::service::llm::CompletionProvider;
use crate::service::relevance::assess_treaty;
use crate::service::report::{ReportKind, generated_at, reference_number};

pub mod actions;
pub mod converters;
pub mod fallback;
pub mod prompts;
pub mod quality;

use converters::coerce_treaty_report;
use fallback::build_fallback_report;
use quality::evaluate_treaty_gate;

/// Service producing treaty compliance reports
pub struct TreatyAnalysisService {
    provider: Arc<dyn CompletionProvider>,
    quality: QualityConfig,
}

impl TreatyAnalysisService {
    pub fn new(provider: Arc<dyn CompletionProvider>, quality: QualityConfig) -> Self {
        tracing::info!(
            min_rows = quality.min_treaty_rows,
            gate_enabled = quality.gate_enabled,
            ai_enabled = provider.is_enabled(),
            "Treaty analysis service initialized"
        );

        Self { provider, quality }
    }

    /// Produce a report for a validated submission
    ///
    /// Never fails: provider problems degrade to the deterministic fallback.
    pub async fn analyze(
        &self,
        submission: &TreatySubmission,
        now: DateTime<Utc>,
    ) -> TreatyAnalyzeResponse {
        let start_time = std::time::Instant::now();
        let relevance = assess_treaty(submission);

        let (report, mode_used, fallback_reason) = match self.ai_report(submission).await {
            Ok(report) => (report, ModeUsed::Ai, None),
            Err(reason) => (build_fallback_report(submission), ModeUsed::Fallback, Some(reason)),
        };

        let mut response = envelope(submission, now, relevance, report, mode_used, fallback_reason);
        if self.quality.gate_enabled {
            response.quality_gate =
                Some(evaluate_treaty_gate(&response, self.quality.min_treaty_rows));
        }

        tracing::info!(
            treaty = %response.treaty,
            reference_no = %response.reference_no,
            mode_used = ?response.mode_used,
            rows = response.results.len(),
            relevance = ?response.relevance.relevance_status,
            gate_passed = ?response.quality_gate.as_ref().map(|g| g.passed),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Treaty analysis completed"
        );

        response
    }

    async fn ai_report(&self, submission: &TreatySubmission) -> Result<TreatyReport, FallbackReason> {
        if !self.provider.is_enabled() {
            return Err(FallbackReason::ProviderNotConfigured);
        }

        let min_rows = self.quality.min_treaty_rows;
        let object = self
            .provider
            .complete_json(
                &prompts::system_prompt(min_rows),
                &prompts::user_prompt(submission, min_rows),
            )
            .await
            .ok_or(FallbackReason::ProviderUnavailableOrInvalid)?;

        coerce_treaty_report(&object, min_rows).ok_or_else(|| {
            tracing::warn!(
                treaty = %submission.treaty_name,
                "Model treaty output rejected, using fallback"
            );
            FallbackReason::ProviderUnavailableOrInvalid
        })
    }
}

fn envelope(
    submission: &TreatySubmission,
    now: DateTime<Utc>,
    relevance: RelevanceAssessment,
    report: TreatyReport,
    mode_used: ModeUsed,
    fallback_reason: Option<FallbackReason>,
) -> TreatyAnalyzeResponse {
    TreatyAnalyzeResponse {
        treaty: submission.treaty_name.clone(),
        law: submission.law_name.clone(),
        generated_at: generated_at(now),
        reference_no: reference_number(ReportKind::TreatyCompliance, now),
        mode_used,
        fallback_reason,
        relevance,
        classification: CLASSIFICATION_LABEL.to_string(),
        executive_summary: report.executive_summary,
        top_urgent_gaps: report.top_urgent_gaps,
        action_list_30_60_90: report.action_list_30_60_90,
        human_review_disclaimer: report.human_review_disclaimer,
        quality_gate: None,
        results: report.results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelevanceStatus;
    use crate::service::llm::fakes::ScriptedCompletion;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn submission() -> TreatySubmission {
        TreatySubmission {
            treaty_name: "Paris Agreement".to_string(),
            law_name: "Environment Conservation Act".to_string(),
            treaty_text: "Article 4: Each Party shall prepare NDCs under this agreement and treaty protocol."
                .to_string(),
            national_law_text: "Section 3 of the Act sets policy and rule making powers under this law."
                .to_string(),
            treaty_doc_text: None,
            law_doc_text: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 8, 30, 15).unwrap()
    }

    fn model_output(rows: usize) -> Value {
        let results: Vec<Value> = (1..=rows)
            .map(|i| {
                json!({
                    "treaty_article": format!("Article {}", i),
                    "obligation": "Obligation text.",
                    "national_mapping": "Mapping text.",
                    "recommendation": "Ministry of Law to act.",
                    "status": "gap",
                    "severity": "high",
                    "confidence": 0.9
                })
            })
            .collect();
        json!({
            "executive_summary": "Model summary.",
            "top_urgent_gaps": ["Article 1: act now"],
            "action_list_30_60_90": [
                "30 days: Ministry of Law validates.",
                "60 days: MoEFCC drafts.",
                "90 days: Cabinet Division approves."
            ],
            "human_review_disclaimer": "Model disclaimer.",
            "results": results
        })
    }

    fn service(provider: ScriptedCompletion, quality: QualityConfig) -> (Arc<ScriptedCompletion>, TreatyAnalysisService) {
        let provider = Arc::new(provider);
        let service = TreatyAnalysisService::new(provider.clone(), quality);
        (provider, service)
    }

    #[tokio::test]
    async fn test_unconfigured_provider_uses_fallback_without_calling() {
        let (provider, service) = service(ScriptedCompletion::disabled(), QualityConfig::default());

        let response = service.analyze(&submission(), now()).await;

        assert_eq!(provider.calls(), 0);
        assert_eq!(response.mode_used, ModeUsed::Fallback);
        assert_eq!(response.fallback_reason, Some(FallbackReason::ProviderNotConfigured));
        assert_eq!(response.results.len(), 8);
        assert_eq!(response.results[0].treaty_article, "Article 4");
        assert_eq!(response.reference_no, "KHM-GOV-20260501-TC-083015");
        assert_eq!(response.generated_at, "2026-05-01T08:30:15.000000+00:00");
        assert_eq!(response.classification, CLASSIFICATION_LABEL);
        let gate = response.quality_gate.unwrap();
        assert!(gate.passed, "{:?}", gate.reasons);
    }

    #[tokio::test]
    async fn test_fallback_is_deterministic() {
        let (_, service) = service(ScriptedCompletion::disabled(), QualityConfig::default());

        let first = service.analyze(&submission(), now()).await;
        let second = service.analyze(&submission(), now()).await;

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_failing_provider_reports_unavailable() {
        let (provider, service) = service(ScriptedCompletion::failing(), QualityConfig::default());

        let response = service.analyze(&submission(), now()).await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(response.mode_used, ModeUsed::Fallback);
        assert_eq!(
            response.fallback_reason,
            Some(FallbackReason::ProviderUnavailableOrInvalid)
        );
    }

    #[tokio::test]
    async fn test_valid_model_output_is_used() {
        let (provider, service) =
            service(ScriptedCompletion::returning(model_output(8)), QualityConfig::default());

        let response = service.analyze(&submission(), now()).await;

        assert_eq!(response.mode_used, ModeUsed::Ai);
        assert_eq!(response.fallback_reason, None);
        assert_eq!(response.executive_summary, "Model summary.");
        assert_eq!(response.results.len(), 8);
        assert_eq!(response.results[0].treaty_clause_text, "Obligation text.");
        assert!(response.quality_gate.unwrap().passed);
        let prompt = provider.last_user_prompt().unwrap();
        assert!(prompt.contains("Treaty Name: Paris Agreement"));
    }

    #[tokio::test]
    async fn test_short_model_output_falls_back() {
        let (_, service) =
            service(ScriptedCompletion::returning(model_output(7)), QualityConfig::default());

        let response = service.analyze(&submission(), now()).await;

        assert_eq!(response.mode_used, ModeUsed::Fallback);
        assert_eq!(
            response.fallback_reason,
            Some(FallbackReason::ProviderUnavailableOrInvalid)
        );
        assert_eq!(response.results[0].treaty_article, "Article 4");
    }

    #[tokio::test]
    async fn test_lower_threshold_accepts_fewer_rows() {
        let quality = QualityConfig {
            min_treaty_rows: 2,
            gate_enabled: true,
        };
        let (_, service) = service(ScriptedCompletion::returning(model_output(2)), quality);

        let response = service.analyze(&submission(), now()).await;

        assert_eq!(response.mode_used, ModeUsed::Ai);
        assert!(response.quality_gate.unwrap().passed);
    }

    #[tokio::test]
    async fn test_disabled_gate_is_omitted() {
        let quality = QualityConfig {
            gate_enabled: false,
            ..QualityConfig::default()
        };
        let (_, service) = service(ScriptedCompletion::disabled(), quality);

        let response = service.analyze(&submission(), now()).await;

        assert!(response.quality_gate.is_none());
        let body = serde_json::to_value(&response).unwrap();
        assert!(body.get("quality_gate").is_none());
    }

    #[tokio::test]
    async fn test_relevance_is_attached() {
        let (_, service) = service(ScriptedCompletion::disabled(), QualityConfig::default());

        let mut unrelated = submission();
        unrelated.treaty_name = "Cookbook".to_string();
        unrelated.treaty_text = "Whisk eggs with sugar until pale and fold in flour gently.".to_string();

        let response = service.analyze(&unrelated, now()).await;

        assert_eq!(response.relevance.relevance_status, RelevanceStatus::Low);
        assert!(response.relevance.relevance_warning.is_some());
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["relevance_status"], "low");
    }
}
