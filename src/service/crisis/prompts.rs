//! Prompt text for crisis operational orders

use crate::model::CrisisScenario;
use crate::service::llm::truncate_for_prompt;

const LOCAL_CONDITIONS_PROMPT_LIMIT: usize = 6_000;
const SCENARIO_DOC_PROMPT_LIMIT: usize = 12_000;

pub const SYSTEM_PROMPT: &str = "You are a senior consular emergency management advisor producing an operational order for diplomatic missions. \
Return only valid JSON. No markdown, no code fences, no text outside JSON. \
All recommendations must be scenario-specific and constraint-aware (telecom outage, airport closure, etc.). \
Condition tiers must be distinct: Yellow=monitor/prepare, Orange=active controlled response, Red=full emergency execution. \
Use exact roles: Head of Mission, Deputy Head of Mission, Consular Officer, Political Officer, Security Officer, Admin and Logistics Officer, Communications Officer. \
Timeline phases must be exactly: 0-2 hours, 2-6 hours, 6-24 hours, 24-72 hours. \
Each timeline phase must contain at least 3 specific, operationally distinct actions; avoid generic phrasing. \
Assumptions and unknowns must include at least three each, specific to this scenario and not generic. \
Communication templates should use realistic placeholders (e.g., +880-2-XXXXXXXX), not unresolved token names. \
Include a mandatory evacuation_plan object with assembly_points, priority_categories (highest to lowest), movement_windows, and coordination_requirements. \
SITREP template must be fillable with <placeholders> and completable in under five minutes. \
You must complete full JSON object; do not truncate or summarize. Incomplete JSON causes system error.";

const RESPONSE_SCHEMA: &str = r#"{
  "condition_yellow": string[],
  "condition_orange": string[],
  "condition_red": string[],
  "role_assigned_tasks": [{"role": string, "task": string}],
  "timeline": [{"phase": string, "actions": string[]}],
  "communication_templates": string[],
  "evacuation_plan": {
    "assembly_points": string[],
    "priority_categories": string[],
    "movement_windows": string[],
    "coordination_requirements": string[]
  },
  "sitrep_template": string,
  "assumptions_and_unknowns": string[],
  "human_review_disclaimer": string
}"#;

pub fn user_prompt(scenario: &CrisisScenario) -> String {
    format!(
        "Build an operational response plan JSON using this schema:\n{}\n\n\
         Mission location: {}\n\
         Crisis type: {}\n\
         Nationals affected: {}\n\
         Embassy resources: {}\n\
         Constraints: {}\n\
         Local conditions: {}\n\
         Scenario document text: {}\n",
        RESPONSE_SCHEMA,
        scenario.mission_location,
        scenario.crisis_type,
        scenario.nationals_affected,
        scenario.embassy_resources.join(", "),
        scenario.constraints.join(", "),
        truncate_for_prompt(Some(scenario.local_conditions.as_str()), LOCAL_CONDITIONS_PROMPT_LIMIT),
        truncate_for_prompt(scenario.scenario_doc_text.as_deref(), SCENARIO_DOC_PROMPT_LIMIT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_lists_inputs() {
        let scenario = CrisisScenario {
            mission_location: "Khartoum".to_string(),
            crisis_type: "Civil unrest".to_string(),
            nationals_affected: 3500,
            embassy_resources: vec!["4 vehicles".to_string(), "satellite phone".to_string()],
            constraints: vec!["airport closed".to_string()],
            local_conditions: "c".repeat(LOCAL_CONDITIONS_PROMPT_LIMIT + 1),
            scenario_doc_text: None,
        };

        let prompt = user_prompt(&scenario);
        assert!(prompt.contains("Mission location: Khartoum"));
        assert!(prompt.contains("Nationals affected: 3500"));
        assert!(prompt.contains("Embassy resources: 4 vehicles, satellite phone"));
        assert!(prompt.contains("Constraints: airport closed"));
        assert!(prompt.contains("...[truncated 1 chars]"));
        assert!(prompt.contains("Scenario document text: (none)"));
    }
}
