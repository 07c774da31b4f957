//! Deterministic crisis operational order

use crate::model::{CrisisPlan, CrisisScenario, EvacuationPlan, RoleTask, TimelinePhase};

const NO_CONSTRAINTS: &str = "No specific constraints provided";

const ROLE_TASKS: [(&str, &str); 5] = [
    (
        "Head of Mission",
        "Authorize condition changes, approve movement windows, and sign mission-level directives.",
    ),
    (
        "Deputy Head of Mission",
        "Run command cell continuity, escalation tracking, and inter-agency coordination.",
    ),
    (
        "Consular Officer",
        "Manage registry verification, detention/hospital desk, and hotline outcomes.",
    ),
    (
        "Security Officer",
        "Validate routes, assembly point security, and convoy discipline with host liaison.",
    ),
    (
        "Admin/Logistics Officer",
        "Track vehicles, fuel, shelter, medical kits, and staff duty rotation.",
    ),
];

const TIMELINE: [(&str, [&str; 4]); 4] = [
    (
        "0-2 hours",
        [
            "Stand up crisis cell",
            "Publish first advisory",
            "Verify staff/hotline readiness",
            "Start district accountability board",
        ],
    ),
    (
        "2-6 hours",
        [
            "Confirm assembly points",
            "Prioritize vulnerable cohorts",
            "Issue movement SOP to field teams",
            "Publish first convoy movement window",
        ],
    ),
    (
        "6-24 hours",
        [
            "Run controlled movement operations",
            "Update employers/families",
            "Refresh risk grid each cycle",
            "Escalate blocked routes to host-country security desk",
        ],
    ),
    (
        "24-72 hours",
        [
            "Run named convoy rotations by assembly point",
            "Reconcile headcount and unresolved missing-person cases by district",
            "Issue 12-hour welfare update bulletins to families",
            "Prepare stabilization transition brief with residual-risk map",
        ],
    ),
];

const CONDITION_ORANGE: [&str; 4] = [
    "Pre-position transport, medical support, emergency food/water, and temporary shelter coordination assets.",
    "Confirm safe assembly points and fallback locations with host-country counterparts.",
    "Start 4-6 hourly HQ updates, including risk map and vulnerable group status.",
    "Prepare evacuation manifest template by priority group (medical, women/children, elderly, undocumented).",
];

const CONDITION_RED: [&str; 4] = [
    "Execute phased evacuation/relocation by priority groups and corridor availability windows.",
    "Run hourly SITREP cycle to HQ and neighboring missions with casualty/accountability updates.",
    "Maintain live accountability roster and dedicated family communication cell.",
    "Trigger contingency route protocol if primary corridor fails or telecom collapses.",
];

const COMMUNICATION_TEMPLATES: [&str; 4] = [
    "Public advisory: The Bangladesh Mission requests all nationals in affected zones to report location via hotline/WhatsApp (+880-2-XXXXXXXX) and avoid unauthorized movement until corridor windows are confirmed.",
    "Employer coordination note: Provide worker roster by district, immediate shelter status, and transport availability within 2 hours.",
    "Family message: Your family member's status is currently under mission tracking; next official update window is HH:MM local.",
    "HQ SITREP lead line: As of HHMM local, mission posture is <Y/O/R>; affected nationals <count>; movement status <active/paused>; critical needs <list>.",
];

const ASSEMBLY_POINTS: [&str; 3] = [
    "Mission Annex Parking Compound (primary)",
    "St. George School Grounds (secondary)",
    "Port District Community Hall (fallback)",
];

const PRIORITY_CATEGORIES: [&str; 5] = [
    "Critical medical cases",
    "Children and pregnant women",
    "Elderly and persons with disabilities",
    "Detained/recently released nationals",
    "General adult cohort",
];

const MOVEMENT_WINDOWS: [&str; 3] = [
    "0500-0700 local: low-traffic escorted movement",
    "1300-1430 local: limited corridor opening",
    "2200-2330 local: contingency night transfer if curfew exemption confirmed",
];

const COORDINATION_REQUIREMENTS: [&str; 4] = [
    "Host-country police escorts for convoy lead and tail vehicles",
    "Written curfew-exemption confirmation for movement windows",
    "Route deconfliction with municipal authorities and checkpoint commanders",
    "Hospital and temporary shelter intake pre-clearance with local authorities",
];

const SITREP_TEMPLATE: &str = "SITREP\nRef: <ref>\nTime: <local>\nCondition Level: <Y/O/R>\nAffected Nationals: <count>\n\
Accounted For / Unaccounted: <x>/<y>\nActions Completed: <list>\nImmediate Risks: <list>\n\
Resource Status (vehicles/fuel/staff/shelter): <list>\nPriority Requests to HQ: <list>\nNext Update ETA: <time>";

const ASSUMPTIONS_AND_UNKNOWNS: [&str; 5] = [
    "Assumption: host-country security liaison remains reachable during initial response window.",
    "Assumption: at least one transport corridor remains intermittently open every 6-12 hours.",
    "Unknown: exact number of unregistered nationals in high-risk zones.",
    "Unknown: telecom reliability window and mass-notification delivery success rate.",
    "Unknown: airport/land-border reopening timeline for cross-border evacuation options.",
];

const FALLBACK_DISCLAIMER: &str = "Fallback mode generated this operational order without successful live LLM completion. Mission leadership must validate and issue final orders before execution.";

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Build the canned operational order; scenario constraints are echoed into Yellow
pub fn build_fallback_plan(scenario: &CrisisScenario) -> CrisisPlan {
    let constraints_text = if scenario.constraints.is_empty() {
        NO_CONSTRAINTS.to_string()
    } else {
        scenario.constraints.join(", ")
    };

    CrisisPlan {
        condition_yellow: vec![
            "Activate mission crisis cell, nominate shift lead, and open incident log within 15 minutes.".to_string(),
            "Issue first advisory notice to registered nationals, employers, and diaspora channels with hotline protocol.".to_string(),
            "Verify contact tree coverage by district and mark unreachable groups for escalation.".to_string(),
            format!("Record immediate constraints and operational limits: {}.", constraints_text),
        ],
        condition_orange: owned(&CONDITION_ORANGE),
        condition_red: owned(&CONDITION_RED),
        role_assigned_tasks: ROLE_TASKS
            .iter()
            .map(|(role, task)| RoleTask {
                role: role.to_string(),
                task: task.to_string(),
            })
            .collect(),
        timeline: TIMELINE
            .iter()
            .map(|(phase, actions)| TimelinePhase {
                phase: phase.to_string(),
                actions: owned(actions),
            })
            .collect(),
        communication_templates: owned(&COMMUNICATION_TEMPLATES),
        evacuation_plan: EvacuationPlan {
            assembly_points: owned(&ASSEMBLY_POINTS),
            priority_categories: owned(&PRIORITY_CATEGORIES),
            movement_windows: owned(&MOVEMENT_WINDOWS),
            coordination_requirements: owned(&COORDINATION_REQUIREMENTS),
        },
        sitrep_template: SITREP_TEMPLATE.to_string(),
        assumptions_and_unknowns: owned(&ASSUMPTIONS_AND_UNKNOWNS),
        human_review_disclaimer: FALLBACK_DISCLAIMER.to_string(),
    }
}
