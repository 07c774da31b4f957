//! Consular crisis scenario request and operational plan

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::common::{
    FallbackReason, FieldViolation, ModeUsed, QualityGate, RelevanceAssessment, check_max_chars,
    trimmed_entries, trimmed_optional, whole_number,
};

pub const LABEL_MAX_CHARS: usize = 255;
pub const LOCAL_CONDITIONS_MIN_CHARS: usize = 30;
pub const LOCAL_CONDITIONS_MAX_CHARS: usize = 5_000;
pub const SCENARIO_DOC_MAX_CHARS: usize = 240_000;
pub const MAX_NATIONALS_AFFECTED: i64 = 50_000_000;
pub const MAX_RESOURCES: usize = 100;
pub const MAX_CONSTRAINTS: usize = 50;

/// Phases every plan timeline must cover, in order
pub const REQUIRED_TIMELINE_PHASES: [&str; 4] = ["0-2 hours", "2-6 hours", "6-24 hours", "24-72 hours"];

/// Minimum actions per required timeline phase
pub const MIN_ACTIONS_PER_PHASE: usize = 3;

/// Inbound body for `POST /api/crisis/generate`
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CrisisGenerateRequest {
    pub mission_location: String,
    pub crisis_type: String,
    #[serde(deserialize_with = "whole_number")]
    pub nationals_affected: i64,
    #[serde(default)]
    pub embassy_resources: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    pub local_conditions: String,
    #[serde(default)]
    pub scenario_doc_text: Option<String>,
}

/// A validated, normalized crisis scenario
#[derive(Debug, Clone, PartialEq)]
pub struct CrisisScenario {
    pub mission_location: String,
    pub crisis_type: String,
    pub nationals_affected: u32,
    pub embassy_resources: Vec<String>,
    pub constraints: Vec<String>,
    pub local_conditions: String,
    pub scenario_doc_text: Option<String>,
}

impl CrisisGenerateRequest {
    /// Check field bounds and normalize lists, collecting every violation
    pub fn validate(self) -> Result<CrisisScenario, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let mission_location = self.mission_location.trim().to_string();
        let crisis_type = self.crisis_type.trim().to_string();
        let local_conditions = self.local_conditions.trim().to_string();

        for (field, value) in [
            ("mission_location", &mission_location),
            ("crisis_type", &crisis_type),
        ] {
            if value.is_empty() {
                violations.push(FieldViolation::new(field, "must not be blank"));
            }
            check_max_chars(&mut violations, field, value, LABEL_MAX_CHARS);
        }

        let conditions_len = local_conditions.chars().count();
        if conditions_len < LOCAL_CONDITIONS_MIN_CHARS {
            violations.push(FieldViolation::new(
                "local_conditions",
                format!(
                    "must be at least {} characters (got {})",
                    LOCAL_CONDITIONS_MIN_CHARS, conditions_len
                ),
            ));
        }
        check_max_chars(
            &mut violations,
            "local_conditions",
            &local_conditions,
            LOCAL_CONDITIONS_MAX_CHARS,
        );

        if let Some(ref doc) = self.scenario_doc_text {
            check_max_chars(&mut violations, "scenario_doc_text", doc, SCENARIO_DOC_MAX_CHARS);
        }

        if !(0..=MAX_NATIONALS_AFFECTED).contains(&self.nationals_affected) {
            violations.push(FieldViolation::new(
                "nationals_affected",
                format!("must be between 0 and {}", MAX_NATIONALS_AFFECTED),
            ));
        }

        if self.embassy_resources.len() > MAX_RESOURCES {
            violations.push(FieldViolation::new(
                "embassy_resources",
                format!("must contain at most {} items", MAX_RESOURCES),
            ));
        }
        if self.constraints.len() > MAX_CONSTRAINTS {
            violations.push(FieldViolation::new(
                "constraints",
                format!("must contain at most {} items", MAX_CONSTRAINTS),
            ));
        }

        let embassy_resources = trimmed_entries(self.embassy_resources);
        if embassy_resources.is_empty() {
            violations.push(FieldViolation::new(
                "embassy_resources",
                "at least one resource is required",
            ));
        }

        let constraints = trimmed_entries(self.constraints);
        if constraints.is_empty() {
            violations.push(FieldViolation::new(
                "constraints",
                "at least one constraint is required",
            ));
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(CrisisScenario {
            mission_location,
            crisis_type,
            nationals_affected: u32::try_from(self.nationals_affected).unwrap_or(u32::MAX),
            embassy_resources,
            constraints,
            local_conditions,
            scenario_doc_text: trimmed_optional(self.scenario_doc_text),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoleTask {
    pub role: String,
    pub task: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimelinePhase {
    pub phase: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EvacuationPlan {
    pub assembly_points: Vec<String>,
    /// Highest priority first
    pub priority_categories: Vec<String>,
    pub movement_windows: Vec<String>,
    pub coordination_requirements: Vec<String>,
}

/// Plan body produced by either the model path or the fallback path
#[derive(Debug, Clone, PartialEq)]
pub struct CrisisPlan {
    pub condition_yellow: Vec<String>,
    pub condition_orange: Vec<String>,
    pub condition_red: Vec<String>,
    pub role_assigned_tasks: Vec<RoleTask>,
    pub timeline: Vec<TimelinePhase>,
    pub communication_templates: Vec<String>,
    pub evacuation_plan: EvacuationPlan,
    pub sitrep_template: String,
    pub assumptions_and_unknowns: Vec<String>,
    pub human_review_disclaimer: String,
}

/// Response for `POST /api/crisis/generate`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CrisisGenerateResponse {
    pub reference_no: String,
    pub generated_at: String,
    pub mode_used: ModeUsed,
    pub fallback_reason: Option<FallbackReason>,
    #[serde(flatten)]
    pub relevance: RelevanceAssessment,
    pub classification: String,
    pub mission_location: String,
    pub crisis_type: String,
    pub nationals_affected: u32,
    pub condition_yellow: Vec<String>,
    pub condition_orange: Vec<String>,
    pub condition_red: Vec<String>,
    pub role_assigned_tasks: Vec<RoleTask>,
    pub timeline: Vec<TimelinePhase>,
    pub communication_templates: Vec<String>,
    pub evacuation_plan: EvacuationPlan,
    pub sitrep_template: String,
    pub assumptions_and_unknowns: Vec<String>,
    pub human_review_disclaimer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_gate: Option<QualityGate>,
}
