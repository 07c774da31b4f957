//! Coercion of untrusted model JSON into a crisis plan

use serde_json::Value;

use crate::model::{CrisisPlan, EvacuationPlan, RoleTask, TimelinePhase};
use crate::service::coerce::{DEFAULT_LIST_LIMIT, string_list, text_field};
use crate::service::crisis::quality::timeline_violations;
use crate::service::json_extract::JsonObject;

/// Build a crisis plan from model output, or `None` if anything mandatory is missing
pub fn coerce_crisis_plan(object: &JsonObject) -> Option<CrisisPlan> {
    let list = |key: &str| string_list(object.get(key), DEFAULT_LIST_LIMIT);

    let plan = CrisisPlan {
        condition_yellow: list("condition_yellow"),
        condition_orange: list("condition_orange"),
        condition_red: list("condition_red"),
        role_assigned_tasks: coerce_role_tasks(object.get("role_assigned_tasks")),
        timeline: coerce_timeline(object.get("timeline")),
        communication_templates: list("communication_templates"),
        evacuation_plan: coerce_evacuation_plan(object.get("evacuation_plan"))?,
        sitrep_template: text_field(object, "sitrep_template"),
        assumptions_and_unknowns: list("assumptions_and_unknowns"),
        human_review_disclaimer: text_field(object, "human_review_disclaimer"),
    };

    let missing = [
        ("condition_yellow", plan.condition_yellow.is_empty()),
        ("condition_orange", plan.condition_orange.is_empty()),
        ("condition_red", plan.condition_red.is_empty()),
        ("role_assigned_tasks", plan.role_assigned_tasks.is_empty()),
        ("timeline", plan.timeline.is_empty()),
        ("communication_templates", plan.communication_templates.is_empty()),
        ("assumptions_and_unknowns", plan.assumptions_and_unknowns.is_empty()),
        ("sitrep_template", plan.sitrep_template.is_empty()),
        ("human_review_disclaimer", plan.human_review_disclaimer.is_empty()),
    ]
    .into_iter()
    .find(|(_, empty)| *empty);

    if let Some((field, _)) = missing {
        tracing::debug!(field = field, "Model crisis output is missing a mandatory field");
        return None;
    }

    if !timeline_violations(&plan.timeline).is_empty() {
        tracing::debug!("Model crisis output has an incomplete timeline");
        return None;
    }

    Some(plan)
}

/// Keep role/task pairs where both sides are present
pub fn coerce_role_tasks(value: Option<&Value>) -> Vec<RoleTask> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|item| {
            let role = text_field(item, "role");
            let task = text_field(item, "task");
            (!role.is_empty() && !task.is_empty()).then_some(RoleTask { role, task })
        })
        .collect()
}

/// Keep phases that have a name and at least one action
pub fn coerce_timeline(value: Option<&Value>) -> Vec<TimelinePhase> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|item| {
            let phase = text_field(item, "phase");
            let actions = string_list(item.get("actions"), DEFAULT_LIST_LIMIT);
            (!phase.is_empty() && !actions.is_empty()).then_some(TimelinePhase { phase, actions })
        })
        .collect()
}

/// The evacuation plan is all-or-nothing: every sub-list must be non-empty
pub fn coerce_evacuation_plan(value: Option<&Value>) -> Option<EvacuationPlan> {
    let object = value?.as_object()?;
    let list = |key: &str| string_list(object.get(key), DEFAULT_LIST_LIMIT);

    let plan = EvacuationPlan {
        assembly_points: list("assembly_points"),
        priority_categories: list("priority_categories"),
        movement_windows: list("movement_windows"),
        coordination_requirements: list("coordination_requirements"),
    };

    let complete = !plan.assembly_points.is_empty()
        && !plan.priority_categories.is_empty()
        && !plan.movement_windows.is_empty()
        && !plan.coordination_requirements.is_empty();

    complete.then_some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model_output() -> Value {
        json!({
            "condition_yellow": ["Monitor"],
            "condition_orange": ["Prepare"],
            "condition_red": ["Execute"],
            "role_assigned_tasks": [
                {"role": "Head of Mission", "task": "Authorize movement."},
                {"role": "Consular Officer"}
            ],
            "timeline": [
                {"phase": "0-2 hours", "actions": ["a", "b", "c"]},
                {"phase": "2-6 hours", "actions": ["a", "b", "c"]},
                {"phase": "6-24 hours", "actions": ["a", "b", "c"]},
                {"phase": "24-72 hours", "actions": ["a", "b", "c", "d"]}
            ],
            "communication_templates": ["Advisory text"],
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

    fn as_object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_complete_output_is_accepted() {
        let plan = coerce_crisis_plan(&as_object(model_output())).unwrap();
        assert_eq!(plan.role_assigned_tasks.len(), 1);
        assert_eq!(plan.timeline.len(), 4);
        assert_eq!(plan.timeline[3].actions.len(), 4);
        assert_eq!(plan.sitrep_template, "SITREP <ref>");
    }

    #[test]
    fn test_thin_phase_rejects_output() {
        let mut output = model_output();
        output["timeline"][3]["actions"] = json!(["a", "b"]);
        assert!(coerce_crisis_plan(&as_object(output)).is_none());
    }

    #[test]
    fn test_incomplete_evacuation_plan_rejects_output() {
        let mut output = model_output();
        output["evacuation_plan"]["movement_windows"] = json!([]);
        assert!(coerce_crisis_plan(&as_object(output)).is_none());

        let mut output = model_output();
        output["evacuation_plan"] = json!("see annex");
        assert!(coerce_crisis_plan(&as_object(output)).is_none());
    }

    #[test]
    fn test_empty_assumptions_reject_output() {
        let mut output = model_output();
        output["assumptions_and_unknowns"] = json!([]);
        assert!(coerce_crisis_plan(&as_object(output)).is_none());
    }

    #[test]
    fn test_blank_sitrep_rejects_output() {
        let mut output = model_output();
        output["sitrep_template"] = json!("  ");
        assert!(coerce_crisis_plan(&as_object(output)).is_none());
    }

    #[test]
    fn test_timeline_drops_nameless_and_empty_phases() {
        let timeline = coerce_timeline(Some(&json!([
            {"phase": "", "actions": ["a"]},
            {"phase": "0-2 hours", "actions": []},
            {"phase": "2-6 hours", "actions": ["a", "  ", "b"]},
            "not a phase"
        ])));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].actions, vec!["a", "b"]);
    }
}
