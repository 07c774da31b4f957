//! Timeline and evacuation plan checks for crisis plans

use crate::model::{
    CrisisGenerateResponse, EvacuationPlan, MIN_ACTIONS_PER_PHASE, QualityGate,
    REQUIRED_TIMELINE_PHASES, TimelinePhase,
};

/// One reason per required phase that is absent or too thin
pub fn timeline_violations(timeline: &[TimelinePhase]) -> Vec<String> {
    REQUIRED_TIMELINE_PHASES
        .iter()
        .filter_map(|required| {
            let phase = timeline
                .iter()
                .find(|item| item.phase.trim().eq_ignore_ascii_case(required));
            match phase {
                None => Some(format!(
                    "Timeline quality failed: required phase '{}' is missing.",
                    required
                )),
                Some(item) if item.actions.len() < MIN_ACTIONS_PER_PHASE => Some(format!(
                    "Timeline quality failed: phase '{}' has {} actions; at least {} specific actions are required.",
                    required,
                    item.actions.len(),
                    MIN_ACTIONS_PER_PHASE
                )),
                Some(_) => None,
            }
        })
        .collect()
}

/// One reason per empty evacuation plan sub-list
pub fn evacuation_violations(plan: &EvacuationPlan) -> Vec<String> {
    [
        ("assembly_points", &plan.assembly_points),
        ("priority_categories", &plan.priority_categories),
        ("movement_windows", &plan.movement_windows),
        ("coordination_requirements", &plan.coordination_requirements),
    ]
    .into_iter()
    .filter(|(_, entries)| entries.is_empty())
    .map(|(name, _)| format!("Evacuation plan incomplete: {} missing.", name))
    .collect()
}

pub fn evaluate_crisis_gate(response: &CrisisGenerateResponse) -> QualityGate {
    let mut reasons = timeline_violations(&response.timeline);
    reasons.extend(evacuation_violations(&response.evacuation_plan));
    QualityGate::from_reasons(reasons)
}
