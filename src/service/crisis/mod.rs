//! Crisis response plan service

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{
    CLASSIFICATION_LABEL, CrisisGenerateResponse, CrisisPlan, CrisisScenario, FallbackReason,
    ModeUsed, QualityConfig, RelevanceAssessment,
};
use crate::service::llm::CompletionProvider;
use crate::service::relevance::assess_crisis;
use crate::service::report::{ReportKind, generated_at, reference_number};

pub mod converters;
pub mod fallback;
pub mod prompts;
pub mod quality;

use converters::coerce_crisis_plan;
use fallback::build_fallback_plan;
use quality::evaluate_crisis_gate;

/// Service producing consular crisis operational orders
pub struct CrisisPlanService {
    provider: Arc<dyn CompletionProvider>,
    quality: QualityConfig,
}

impl CrisisPlanService {
    pub fn new(provider: Arc<dyn CompletionProvider>, quality: QualityConfig) -> Self {
        tracing::info!(
            gate_enabled = quality.gate_enabled,
            ai_enabled = provider.is_enabled(),
            "Crisis plan service initialized"
        );

        Self { provider, quality }
    }

    /// Produce an operational order for a validated scenario
    pub async fn generate(
        &self,
        scenario: &CrisisScenario,
        now: DateTime<Utc>,
    ) -> CrisisGenerateResponse {
        let start_time = std::time::Instant::now();
        let relevance = assess_crisis(scenario);

        let (plan, mode_used, fallback_reason) = match self.ai_plan(scenario).await {
            Ok(plan) => (plan, ModeUsed::Ai, None),
            Err(reason) => (build_fallback_plan(scenario), ModeUsed::Fallback, Some(reason)),
        };

        let mut response = envelope(scenario, now, relevance, plan, mode_used, fallback_reason);
        if self.quality.gate_enabled {
            response.quality_gate = Some(evaluate_crisis_gate(&response));
        }

        tracing::info!(
            mission_location = %response.mission_location,
            reference_no = %response.reference_no,
            mode_used = ?response.mode_used,
            relevance = ?response.relevance.relevance_status,
            gate_passed = ?response.quality_gate.as_ref().map(|g| g.passed),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Crisis plan generated"
        );

        response
    }

    async fn ai_plan(&self, scenario: &CrisisScenario) -> Result<CrisisPlan, FallbackReason> {
        if !self.provider.is_enabled() {
            return Err(FallbackReason::ProviderNotConfigured);
        }

        let object = self
            .provider
            .complete_json(prompts::SYSTEM_PROMPT, &prompts::user_prompt(scenario))
            .await
            .ok_or(FallbackReason::ProviderUnavailableOrInvalid)?;

        coerce_crisis_plan(&object).ok_or_else(|| {
            tracing::warn!(
                mission_location = %scenario.mission_location,
                "Model crisis output rejected, using fallback"
            );
            FallbackReason::ProviderUnavailableOrInvalid
        })
    }
}

fn envelope(
    scenario: &CrisisScenario,
    now: DateTime<Utc>,
    relevance: RelevanceAssessment,
    plan: CrisisPlan,
    mode_used: ModeUsed,
    fallback_reason: Option<FallbackReason>,
) -> CrisisGenerateResponse {
    CrisisGenerateResponse {
        reference_no: reference_number(ReportKind::CrisisResponse, now),
        generated_at: generated_at(now),
        mode_used,
        fallback_reason,
        relevance,
        classification: CLASSIFICATION_LABEL.to_string(),
        mission_location: scenario.mission_location.clone(),
        crisis_type: scenario.crisis_type.clone(),
        nationals_affected: scenario.nationals_affected,
        condition_yellow: plan.condition_yellow,
        condition_orange: plan.condition_orange,
        condition_red: plan.condition_red,
        role_assigned_tasks: plan.role_assigned_tasks,
        timeline: plan.timeline,
        communication_templates: plan.communication_templates,
        evacuation_plan: plan.evacuation_plan,
        sitrep_template: plan.sitrep_template,
        assumptions_and_unknowns: plan.assumptions_and_unknowns,
        human_review_disclaimer: plan.human_review_disclaimer,
        quality_gate: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelevanceStatus;
    use crate::service::llm::fakes::ScriptedCompletion;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn scenario() -> CrisisScenario {
        CrisisScenario {
            mission_location: "Beirut mission".to_string(),
            crisis_type: "Security crisis".to_string(),
            nationals_affected: 1500,
            embassy_resources: vec!["Consular hotline".to_string(), "3 vehicles".to_string()],
            constraints: vec!["telecom outage".to_string()],
            local_conditions: "Roadblocks near the airport; shelter capacity is limited for nationals."
                .to_string(),
            scenario_doc_text: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 22, 4, 9).unwrap()
    }

    fn model_output(last_phase_actions: usize) -> Value {
        let actions = |n: usize| -> Vec<String> { (1..=n).map(|i| format!("Step {}", i)).collect() };
        json!({
            "condition_yellow": ["Monitor"],
            "condition_orange": ["Prepare"],
            "condition_red": ["Execute"],
            "role_assigned_tasks": [{"role": "Head of Mission", "task": "Authorize movement."}],
            "timeline": [
                {"phase": "0-2 hours", "actions": actions(3)},
                {"phase": "2-6 hours", "actions": actions(3)},
                {"phase": "6-24 hours", "actions": actions(3)},
                {"phase": "24-72 hours", "actions": actions(last_phase_actions)}
            ],
            "communication_templates": ["Advisory"],
            "evacuation_plan": {
                "assembly_points": ["Annex"],
                "priority_categories": ["Medical"],
                "movement_windows": ["0500-0700"],
                "coordination_requirements": ["Escort"]
            },
            "sitrep_template": "SITREP <ref>",
            "assumptions_and_unknowns": ["Unknown: airport status"],
            "human_review_disclaimer": "Leadership validates."
        })
    }

    fn service(provider: ScriptedCompletion) -> (Arc<ScriptedCompletion>, CrisisPlanService) {
        let provider = Arc::new(provider);
        let service = CrisisPlanService::new(provider.clone(), QualityConfig::default());
        (provider, service)
    }

    #[tokio::test]
    async fn test_unconfigured_provider_uses_fallback() {
        let (provider, service) = service(ScriptedCompletion::disabled());

        let response = service.generate(&scenario(), now()).await;

        assert_eq!(provider.calls(), 0);
        assert_eq!(response.mode_used, ModeUsed::Fallback);
        assert_eq!(response.fallback_reason, Some(FallbackReason::ProviderNotConfigured));
        assert_eq!(response.reference_no, "KHM-GOV-20260501-CR-220409");
        assert_eq!(response.nationals_affected, 1500);
        assert_eq!(response.relevance.relevance_status, RelevanceStatus::High);
        assert!(response.quality_gate.unwrap().passed);
        assert!(response.condition_yellow[3].contains("telecom outage"));
    }

    #[tokio::test]
    async fn test_valid_model_output_is_used() {
        let (provider, service) = service(ScriptedCompletion::returning(model_output(3)));

        let response = service.generate(&scenario(), now()).await;

        assert_eq!(response.mode_used, ModeUsed::Ai);
        assert_eq!(response.condition_yellow, vec!["Monitor"]);
        assert!(response.quality_gate.unwrap().passed);
        assert!(provider.last_user_prompt().unwrap().contains("Mission location: Beirut mission"));
    }

    #[tokio::test]
    async fn test_thin_final_phase_falls_back() {
        let (_, service) = service(ScriptedCompletion::returning(model_output(2)));

        let response = service.generate(&scenario(), now()).await;

        assert_eq!(response.mode_used, ModeUsed::Fallback);
        assert_eq!(
            response.fallback_reason,
            Some(FallbackReason::ProviderUnavailableOrInvalid)
        );
        assert_eq!(response.timeline[3].actions.len(), 4);
    }

    #[test]
    fn test_gate_names_thin_phase() {
        let response = envelope(
            &scenario(),
            now(),
            RelevanceAssessment::default(),
            CrisisPlan {
                timeline: vec![],
                ..build_fallback_plan(&scenario())
            },
            ModeUsed::Ai,
            None,
        );
        let mut thin = response.clone();
        thin.timeline = build_fallback_plan(&scenario()).timeline;
        thin.timeline[3].actions.truncate(2);

        let gate = evaluate_crisis_gate(&thin);
        assert!(!gate.passed);
        assert_eq!(gate.reasons.len(), 1);
        assert!(gate.reasons[0].contains("24-72 hours"));

        let empty_gate = evaluate_crisis_gate(&response);
        assert_eq!(empty_gate.reasons.len(), 4);
    }
}
