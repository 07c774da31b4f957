//! Types shared by the treaty and crisis report envelopes

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Fixed handling label attached to every generated report
pub const CLASSIFICATION_LABEL: &str = "INTERNAL PILOT USE ONLY";

/// Which generation path produced the report content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ModeUsed {
    Ai,
    Fallback,
}

/// Why the deterministic fallback was used instead of model output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FallbackReason {
    #[serde(rename = "provider_not_configured")]
    ProviderNotConfigured,
    #[serde(rename = "openrouter_unavailable_or_invalid_response")]
    ProviderUnavailableOrInvalid,
}

/// Post-hoc business rule verdict for a finished report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QualityGate {
    pub passed: bool,
    pub reasons: Vec<String>,
}

impl QualityGate {
    /// Build a verdict from accumulated rule violations
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            passed: reasons.is_empty(),
            reasons,
        }
    }
}

/// Coarse keyword-overlap classification of the submitted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceStatus {
    Low,
    #[default]
    Medium,
    High,
}

/// Relevance fields as they appear flattened into a report envelope
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct RelevanceAssessment {
    pub relevance_status: RelevanceStatus,
    pub relevance_score: f64,
    pub relevance_warning: Option<String>,
}

/// Treaty obligation compliance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    #[default]
    Partial,
    Gap,
}

impl FromStr for ComplianceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compliant" => Ok(Self::Compliant),
            "partial" => Ok(Self::Partial),
            "gap" => Ok(Self::Gap),
            _ => Err(()),
        }
    }
}

/// Exposure severity of a treaty gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for SeverityLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(()),
        }
    }
}

/// A single failed request field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Record a violation when `value` exceeds `max` characters
pub(crate) fn check_max_chars(
    violations: &mut Vec<FieldViolation>,
    field: &str,
    value: &str,
    max: usize,
) {
    let len = value.chars().count();
    if len > max {
        violations.push(FieldViolation::new(
            field,
            format!("must be at most {} characters (got {})", max, len),
        ));
    }
}

/// Trim an optional text field, treating blank input as absent
pub(crate) fn trimmed_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim every entry and drop the blank ones
pub(crate) fn trimmed_entries(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Deserialize an integer, also accepting floats with no fractional part (`4200.0`)
pub fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber;

    impl Visitor<'_> for WholeNumber {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
            if value.is_finite() && value.fract() == 0.0 && in_range {
                Ok(value as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}
