//! Prompt text for treaty compliance mapping

use crate::model::TreatySubmission;
use crate::service::llm::truncate_for_prompt;

/// Per-field prompt budget for submitted treaty and law text
pub const PROMPT_TEXT_LIMIT: usize = 12_000;

const RESPONSE_SCHEMA: &str = r#"{
  "executive_summary": string,
  "top_urgent_gaps": string[],
  "action_list_30_60_90": string[],
  "human_review_disclaimer": string,
  "results": [
    {
      "treaty_article": string,
      "obligation": string,
      "treaty_clause_text": string,
      "national_mapping": string,
      "domestic_clause_text": string,
      "status": "compliant" | "partial" | "gap",
      "severity": "low" | "medium" | "high",
      "recommendation": string,
      "confidence": number,
      "confidence_rationale": string
    }
  ]
}"#;

pub fn system_prompt(min_rows: usize) -> String {
    format!(
        "You are a senior legal compliance analyst embedded in the Ministry of Foreign Affairs. \
         You specialize in mapping international treaty obligations to domestic legislative and regulatory frameworks. \
         Return only valid JSON. No markdown, no code fences, no text outside JSON. \
         Every result row must include exact treaty article and exact domestic clause mapping. \
         If no domestic clause is found, set status='gap' and state that clearly. \
         Confidence rules: >0.85 explicit direct textual correspondence; 0.65-0.85 reasonable mapping needing interpretation; \
         <0.65 inferred mapping requiring strong human legal review. \
         Always provide confidence_rationale per row. \
         Severity rules: high=direct treaty exposure/violation risk, medium=implementation weakness, low=procedural/admin gap. \
         Action list must be specific and assignable to responsible authority. \
         You must analyze a minimum of {min_rows} treaty articles; never stop early. \
         action_list_30_60_90 must contain at least one action each at 30 days, 60 days, and 90 days, \
         each naming a specific ministry or government authority. \
         Order top_urgent_gaps by highest severity then lowest confidence. \
         You must complete full JSON object; do not truncate or summarize. Incomplete JSON causes system error."
    )
}

pub fn user_prompt(submission: &TreatySubmission, min_rows: usize) -> String {
    format!(
        "Build a treaty compliance analysis JSON using this schema:\n{schema}\n\n\
         Hard constraints: analyze minimum {min_rows} treaty articles; include exact side-by-side citations; \
         do not finalize unless 30/60/90 action slots are all present with named authorities.\n\n\
         Treaty Name: {treaty_name}\n\
         Law Name: {law_name}\n\n\
         Treaty excerpt:\n{treaty_text}\n\n\
         Treaty document text:\n{treaty_doc}\n\n\
         National law excerpt:\n{law_text}\n\n\
         Law document text:\n{law_doc}\n",
        schema = RESPONSE_SCHEMA,
        treaty_name = submission.treaty_name,
        law_name = submission.law_name,
        treaty_text = truncate_for_prompt(Some(submission.treaty_text.as_str()), PROMPT_TEXT_LIMIT),
        treaty_doc = truncate_for_prompt(submission.treaty_doc_text.as_deref(), PROMPT_TEXT_LIMIT),
        law_text = truncate_for_prompt(Some(submission.national_law_text.as_str()), PROMPT_TEXT_LIMIT),
        law_doc = truncate_for_prompt(submission.law_doc_text.as_deref(), PROMPT_TEXT_LIMIT),
    )
}
