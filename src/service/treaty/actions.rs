//! 30/60/90-day action plan normalization

/// Substrings that identify a named, accountable authority
pub const AUTHORITY_MARKERS: &[&str] = &[
    "ministry",
    "moefcc",
    "mofa",
    "cabinet division",
    "directorate",
    "department",
    "authority",
    "commission",
    "division",
];

/// Day-count tokens the action plan must cover, in order
pub const DAY_HORIZONS: [&str; 3] = ["30", "60", "90"];

/// Whether the text names a ministry or other government authority
pub fn is_authority_named(text: &str) -> bool {
    let lower = text.to_lowercase();
    AUTHORITY_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// First action mentioning the given day-count token
pub fn action_for_horizon<'a>(actions: &'a [String], day: &str) -> Option<&'a str> {
    actions
        .iter()
        .map(|action| action.trim())
        .find(|action| !action.is_empty() && action.contains(day))
}

fn default_action(day: &str) -> &'static str {
    match day {
        "30" => "30 days: MoEFCC and Ministry of Law to complete article-level legal gap validation and ownership assignment.",
        "60" => "60 days: MoEFCC to submit draft legal/administrative instruments for high-severity treaty gaps.",
        _ => "90 days: Cabinet Division and MoEFCC to issue approved compliance roadmap with public monitoring cadence.",
    }
}

/// Produce exactly one action per horizon, each naming an authority
///
/// A horizon keeps the first matching action only when it names an authority;
/// otherwise the documented default for that horizon is used.
pub fn normalize_30_60_90_actions(actions: &[String]) -> Vec<String> {
    DAY_HORIZONS
        .iter()
        .map(|day| match action_for_horizon(actions, day) {
            Some(action) if is_authority_named(action) => action.to_string(),
            _ => default_action(day).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_authority_markers() {
        assert!(is_authority_named("MoFA Consular Wing to issue SOP"));
        assert!(is_authority_named("Department of Environment to publish protocol"));
        assert!(!is_authority_named("Someone should look into it"));
    }

    #[test]
    fn test_missing_horizon_gets_default() {
        let normalized = normalize_30_60_90_actions(&actions(&[
            "30 days: Ministry of Law validates mappings.",
            "90 days: Cabinet Division publishes roadmap.",
        ]));

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0], "30 days: Ministry of Law validates mappings.");
        assert!(normalized[1].contains("60"));
        assert!(is_authority_named(&normalized[1]));
        assert_eq!(normalized[2], "90 days: Cabinet Division publishes roadmap.");
    }

    #[test]
    fn test_action_without_authority_is_replaced() {
        let normalized = normalize_30_60_90_actions(&actions(&[
            "30 days: convene focal points.",
            "60 days: Ministry of Finance drafts circular.",
            "90 days: publish dashboard.",
        ]));

        assert!(normalized[0].starts_with("30 days: MoEFCC and Ministry of Law"));
        assert_eq!(normalized[1], "60 days: Ministry of Finance drafts circular.");
        assert!(normalized[2].starts_with("90 days: Cabinet Division"));
    }

    #[test]
    fn test_first_matching_action_wins() {
        let normalized = normalize_30_60_90_actions(&actions(&[
            "  30 days: Directorate of Climate opens review.  ",
            "30 days: Commission on Law reviews again.",
        ]));
        assert_eq!(normalized[0], "30 days: Directorate of Climate opens review.");
    }

    #[test]
    fn test_empty_input_yields_all_defaults() {
        let normalized = normalize_30_60_90_actions(&[]);
        assert_eq!(normalized.len(), 3);
        for (action, day) in normalized.iter().zip(DAY_HORIZONS) {
            assert!(action.contains(day));
            assert!(is_authority_named(action));
        }
    }
}
