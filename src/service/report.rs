//! Report envelope identifiers

use chrono::{DateTime, SecondsFormat, Utc};

/// Which endpoint a reference number belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    TreatyCompliance,
    CrisisResponse,
}

impl ReportKind {
    fn code(self) -> &'static str {
        match self {
            ReportKind::TreatyCompliance => "TC",
            ReportKind::CrisisResponse => "CR",
        }
    }
}

/// Reference number formatted as `KHM-GOV-<YYYYMMDD>-<TC|CR>-<HHMMSS>`
pub fn reference_number(kind: ReportKind, now: DateTime<Utc>) -> String {
    format!(
        "KHM-GOV-{}-{}-{}",
        now.format("%Y%m%d"),
        kind.code(),
        now.format("%H%M%S")
    )
}

/// RFC 3339 timestamp with microseconds and an explicit `+00:00` offset
pub fn generated_at(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, false)
}
