//! Lenient recovery of a single JSON object from free-form model output
//!
//! Candidates are tried in order and the first one that parses to an object wins:
//! 1. The whole trimmed text
//! 2. The body of the first fenced code block
//! 3. The span from the first `{` to the last `}`

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// A parsed top-level JSON object
pub type JsonObject = Map<String, Value>;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```(?:json)?\s*(\{.*\})\s*```").expect("fenced block pattern is valid")
});

type CandidateStrategy = fn(&str) -> Option<&str>;

const CANDIDATE_STRATEGIES: [CandidateStrategy; 3] = [whole_text, fenced_block, outer_braces];

/// Extract the first candidate that parses as a JSON object
///
/// Never fails loudly: malformed candidates are skipped and `None` means
/// nothing usable was found.
pub fn extract_json_object(raw: &str) -> Option<JsonObject> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    CANDIDATE_STRATEGIES
        .iter()
        .filter_map(|strategy| strategy(raw))
        .find_map(parse_object)
}

fn whole_text(raw: &str) -> Option<&str> {
    Some(raw)
}

fn fenced_block(raw: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str().trim())
}

fn outer_braces(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn parse_object(candidate: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) => None,
        Err(e) => {
            tracing::trace!(error = %e, "JSON candidate rejected");
            None
        }
    }
}
