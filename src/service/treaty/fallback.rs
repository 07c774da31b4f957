//! Deterministic treaty report used when no usable model output exists

use crate::model::{ComplianceStatus, SeverityLevel, TreatyAnalysisResult, TreatyReport, TreatySubmission};
use crate::service::treaty::actions::normalize_30_60_90_actions;

use ComplianceStatus::{Gap, Partial};
use SeverityLevel::{High, Low, Medium};

const TOP_GAP_COUNT: usize = 5;

const FALLBACK_ACTIONS: [&str; 3] = [
    "30 days: MoEFCC and Ministry of Law convene legal focal points and validate each article-to-clause mapping with annexed source text.",
    "60 days: MoEFCC issues draft ministerial circular package for high-severity gaps with named implementing authorities.",
    "90 days: Cabinet Division publishes compliance roadmap, review dashboard, and international review briefing schedule.",
];

const FALLBACK_DISCLAIMER: &str = "Fallback mode generated this report without successful live LLM completion. Treat as structured draft and validate by legal officers before policy action.";

/// One canned article row; `{law}` in mapping text is replaced by the law name
struct ArticleTemplate {
    article: &'static str,
    obligation: &'static str,
    treaty_clause: &'static str,
    mapping: &'static str,
    domestic_clause: &'static str,
    status: ComplianceStatus,
    severity: SeverityLevel,
    recommendation: &'static str,
    confidence: f64,
    rationale: &'static str,
}

impl ArticleTemplate {
    fn render(&self, law_name: &str) -> TreatyAnalysisResult {
        TreatyAnalysisResult {
            treaty_article: self.article.to_string(),
            obligation: self.obligation.to_string(),
            treaty_clause_text: self.treaty_clause.to_string(),
            national_mapping: self.mapping.replace("{law}", law_name),
            domestic_clause_text: self.domestic_clause.replace("{law}", law_name),
            status: self.status,
            severity: self.severity,
            recommendation: self.recommendation.to_string(),
            confidence: self.confidence,
            confidence_rationale: self.rationale.to_string(),
        }
    }
}

static CLIMATE_ARTICLES: [ArticleTemplate; 8] = [
    ArticleTemplate {
        article: "Article 4",
        obligation: "Prepare, communicate, and maintain NDCs.",
        treaty_clause: "Each Party shall prepare, communicate and maintain successive nationally determined contributions.",
        mapping: "{law}: climate planning instruments mention mitigation commitments.",
        domestic_clause: "{law}: mitigation duties exist but NDC preparation cadence is not explicitly codified.",
        status: Partial,
        severity: High,
        recommendation: "MoEFCC to issue NDC preparation and update rules by gazette notification.",
        confidence: 0.79,
        rationale: "Domestic language captures mitigation intent but lacks explicit statutory NDC drafting trigger.",
    },
    ArticleTemplate {
        article: "Article 5",
        obligation: "Conserve and enhance sinks and reservoirs.",
        treaty_clause: "Parties should take action to conserve and enhance sinks and reservoirs of greenhouse gases.",
        mapping: "{law}: forestry and conservation references exist across policy instruments.",
        domestic_clause: "{law}: enforceable sink accounting and MRV obligations are not explicit.",
        status: Partial,
        severity: Medium,
        recommendation: "Forest Department and DoE to publish sink accounting protocol with annual disclosure.",
        confidence: 0.73,
        rationale: "Programmatic alignment exists; direct legal MRV mandate is incomplete.",
    },
    ArticleTemplate {
        article: "Article 6",
        obligation: "Support cooperative approaches and robust accounting.",
        treaty_clause: "Parties engaging on a voluntary basis in cooperative approaches shall promote sustainable development and ensure environmental integrity.",
        mapping: "Carbon market governance references are fragmented.",
        domestic_clause: "No consolidated legal framework for Article 6 accounting integrity was identified.",
        status: Gap,
        severity: High,
        recommendation: "MoEFCC and Ministry of Finance to draft Article 6 market participation regulation.",
        confidence: 0.68,
        rationale: "Explicit domestic transposition language appears absent in provided text.",
    },
    ArticleTemplate {
        article: "Article 7",
        obligation: "Strengthen adaptation action and planning.",
        treaty_clause: "Parties should strengthen their cooperation on enhancing action on adaptation.",
        mapping: "Adaptation intent is documented in strategy plans.",
        domestic_clause: "Mandatory district adaptation reporting duties are not explicit.",
        status: Partial,
        severity: High,
        recommendation: "MoDMR and MoEFCC to mandate district adaptation implementation and reporting templates.",
        confidence: 0.74,
        rationale: "Policy intent is strong, but enforceable local accountability is limited.",
    },
    ArticleTemplate {
        article: "Article 9",
        obligation: "Provide and mobilize climate finance.",
        treaty_clause: "Developed country Parties shall provide financial resources to assist developing country Parties.",
        mapping: "National budgeting references climate financing channels.",
        domestic_clause: "Tracking and attribution methodology for climate-finance flows is not consistently codified.",
        status: Partial,
        severity: Medium,
        recommendation: "ERD and Ministry of Finance to standardize climate-finance tagging and reporting rules.",
        confidence: 0.7,
        rationale: "Financial mechanisms exist; legal standardization is partial.",
    },
    ArticleTemplate {
        article: "Article 10",
        obligation: "Promote technology development and transfer.",
        treaty_clause: "Parties share a long-term vision on the importance of fully realizing technology development and transfer.",
        mapping: "Technology cooperation appears in planning documents.",
        domestic_clause: "No binding domestic implementation timetable for technology transfer was found.",
        status: Partial,
        severity: Medium,
        recommendation: "BIDA and MoEFCC to issue technology-transfer implementation roadmap with milestones.",
        confidence: 0.69,
        rationale: "Intentional alignment exists without binding timeline obligations.",
    },
    ArticleTemplate {
        article: "Article 13",
        obligation: "Provide transparency reports to track progress.",
        treaty_clause: "Each Party shall provide information necessary to track progress made in implementing and achieving its NDC.",
        mapping: "Administrative reporting exists.",
        domestic_clause: "Statutory annual transparency reporting requirement is not explicit.",
        status: Gap,
        severity: High,
        recommendation: "MoEFCC to codify annual ETF reporting duty and designate accountable directorate.",
        confidence: 0.72,
        rationale: "Practice-level reporting exists but enforceable legal wording is limited.",
    },
    ArticleTemplate {
        article: "Article 14",
        obligation: "Participate in global stocktake and align domestic cycle.",
        treaty_clause: "The Conference of the Parties serving as the meeting of the Parties to this Agreement shall periodically take stock.",
        mapping: "Domestic review mechanisms are present but not synchronized to stocktake cycle.",
        domestic_clause: "No explicit legal trigger aligning domestic review cycle to global stocktake timeline was found.",
        status: Partial,
        severity: Medium,
        recommendation: "Cabinet Division and MoEFCC to set statutory review cycle aligned with global stocktake.",
        confidence: 0.71,
        rationale: "Review architecture exists but legal synchronization clause is missing.",
    },
];

static CONSULAR_ARTICLES: [ArticleTemplate; 8] = [
    ArticleTemplate {
        article: "Article 5",
        obligation: "Perform core consular functions.",
        treaty_clause: "Consular functions consist in protecting interests and assisting nationals.",
        mapping: "{law}: broad consular authority framework exists.",
        domestic_clause: "{law}: function-level authority exists, but mission SOP depth is uneven.",
        status: Partial,
        severity: Medium,
        recommendation: "MoFA Consular Wing to issue mandatory mission SOP baseline.",
        confidence: 0.76,
        rationale: "Authority is explicit, standardization duty is incomplete.",
    },
    ArticleTemplate {
        article: "Article 8",
        obligation: "Perform consular functions in third state when authorized.",
        treaty_clause: "Upon appropriate notification, a consular post may perform functions in a third State.",
        mapping: "Third-state contingency practice exists.",
        domestic_clause: "No unified legal protocol for third-state activation timelines was found.",
        status: Partial,
        severity: Medium,
        recommendation: "MoFA Legal Affairs to formalize third-state consular activation SOP.",
        confidence: 0.69,
        rationale: "Operational practice is plausible; explicit legal standard is limited.",
    },
    ArticleTemplate {
        article: "Article 23",
        obligation: "Consular officers may be declared persona non grata; response readiness required.",
        treaty_clause: "The receiving State may notify that a consular officer is persona non grata.",
        mapping: "Diplomatic response pathways exist.",
        domestic_clause: "Mission continuity protocol after persona non grata action is not fully codified.",
        status: Partial,
        severity: Medium,
        recommendation: "MoFA to codify mission continuity checklist for persona non grata scenarios.",
        confidence: 0.67,
        rationale: "Framework exists but procedural legal detail is incomplete.",
    },
    ArticleTemplate {
        article: "Article 31",
        obligation: "Protect consular premises.",
        treaty_clause: "Consular premises shall be inviolable to the extent provided in this article.",
        mapping: "Premises security responsibilities are distributed across actors.",
        domestic_clause: "Explicit host-coordination protocol and evidence logging duty are not consistently mandated.",
        status: Partial,
        severity: High,
        recommendation: "MoFA and host-state liaison desks to adopt premises security escalation SOP.",
        confidence: 0.72,
        rationale: "Security principle is recognized; enforceable process detail is partial.",
    },
    ArticleTemplate {
        article: "Article 35",
        obligation: "Ensure freedom of communication for official purposes.",
        treaty_clause: "The receiving State shall permit and protect freedom of communication for all official purposes.",
        mapping: "Mission telecom contingencies are ad hoc.",
        domestic_clause: "No binding communications redundancy standard was identified.",
        status: Gap,
        severity: High,
        recommendation: "MoFA ICT and mission admin units to mandate satellite/backup comms readiness standard.",
        confidence: 0.7,
        rationale: "Communications obligation is clear; domestic codification appears absent.",
    },
    ArticleTemplate {
        article: "Article 36",
        obligation: "Enable consular communication/access for detained nationals.",
        treaty_clause: "Consular officers shall be free to communicate with nationals and have access to them.",
        mapping: "Detention support is recognized in practice.",
        domestic_clause: "Uniform 24-hour notification and escalation SLA is not codified.",
        status: Partial,
        severity: High,
        recommendation: "MoFA Consular Wing to impose 24-hour detention notification SLA with auditable logs.",
        confidence: 0.73,
        rationale: "Legal principle maps strongly; SLA-level domestic language is missing.",
    },
    ArticleTemplate {
        article: "Article 37",
        obligation: "Receive notification in guardianship/death/wreck cases.",
        treaty_clause: "If relevant information is available, authorities shall inform the consular post.",
        mapping: "Incident notification channels exist.",
        domestic_clause: "Case-type specific notification forms and timelines are not standardized.",
        status: Partial,
        severity: Medium,
        recommendation: "MoFA to standardize incident notification templates for Article 37 triggers.",
        confidence: 0.68,
        rationale: "Duty is reflected broadly, but procedural precision is limited.",
    },
    ArticleTemplate {
        article: "Article 55",
        obligation: "Respect laws/regulations of receiving state while exercising functions.",
        treaty_clause: "Without prejudice to privileges and immunities, all persons enjoying such privileges and immunities have a duty to respect the laws.",
        mapping: "Conduct compliance guidance exists.",
        domestic_clause: "Mission-level annual legal compliance refresher requirement is not mandatory.",
        status: Partial,
        severity: Low,
        recommendation: "MoFA to require annual legal compliance certification for mission staff.",
        confidence: 0.71,
        rationale: "Behavioral compliance exists; annual formalization requirement is not explicit.",
    },
];

const GENERIC_ARTICLE_COUNT: usize = 8;

fn generic_row(index: usize, law_name: &str) -> TreatyAnalysisResult {
    TreatyAnalysisResult {
        treaty_article: format!("Article {}", index),
        obligation: "Implement treaty commitments in good faith with article-level domestic transposition.".to_string(),
        treaty_clause_text: "State Parties shall adopt measures necessary to give effect to treaty obligations.".to_string(),
        national_mapping: format!("{}: broad alignment language exists in available material.", law_name),
        domestic_clause_text: format!(
            "{}: explicit section-level transposition for this article is not clearly evidenced.",
            law_name
        ),
        status: Partial,
        severity: if index % 2 == 0 { Medium } else { High },
        recommendation: "Relevant line ministry and Law Ministry to issue article-specific implementing instruction.".to_string(),
        confidence: 0.66,
        confidence_rationale: "Assessment is generalized due to limited article-specific legal text in the provided excerpts.".to_string(),
    }
}

/// Canned article rows chosen by treaty family
pub fn fallback_rows(treaty_name: &str, law_name: &str) -> Vec<TreatyAnalysisResult> {
    let name = treaty_name.to_lowercase();

    let templates: Option<&[ArticleTemplate]> =
        if ["paris", "unfccc", "kyoto"].iter().any(|marker| name.contains(marker)) {
            Some(&CLIMATE_ARTICLES)
        } else if name.contains("vienna convention on consular") {
            Some(&CONSULAR_ARTICLES)
        } else {
            None
        };

    match templates {
        Some(templates) => templates.iter().map(|t| t.render(law_name)).collect(),
        None => (1..=GENERIC_ARTICLE_COUNT)
            .map(|index| generic_row(index, law_name))
            .collect(),
    }
}

/// Build the full fallback report for a validated submission
pub fn build_fallback_report(submission: &TreatySubmission) -> TreatyReport {
    let results = fallback_rows(&submission.treaty_name, &submission.law_name);

    let top_urgent_gaps = results
        .iter()
        .filter(|row| row.status != ComplianceStatus::Compliant)
        .take(TOP_GAP_COUNT)
        .map(|row| format!("{}: {}", row.treaty_article, row.recommendation))
        .collect();

    let char_len = |text: Option<&String>| text.map_or(0, |t| t.chars().count());
    let executive_summary = format!(
        "Detailed fallback analysis indicates partial treaty alignment with concrete policy exposure areas. \
         Input coverage: treaty excerpt {} chars; treaty doc {} chars; \
         national instrument excerpt {} chars; law doc {} chars.",
        submission.treaty_text.chars().count(),
        char_len(submission.treaty_doc_text.as_ref()),
        submission.national_law_text.chars().count(),
        char_len(submission.law_doc_text.as_ref()),
    );

    let actions: Vec<String> = FALLBACK_ACTIONS.iter().map(|a| a.to_string()).collect();

    TreatyReport {
        executive_summary,
        top_urgent_gaps,
        action_list_30_60_90: normalize_30_60_90_actions(&actions),
        human_review_disclaimer: FALLBACK_DISCLAIMER.to_string(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(treaty_name: &str) -> TreatySubmission {
        TreatySubmission {
            treaty_name: treaty_name.to_string(),
            law_name: "Environment Conservation Act".to_string(),
            treaty_text: "a".repeat(60),
            national_law_text: "b".repeat(70),
            treaty_doc_text: None,
            law_doc_text: Some("c".repeat(5)),
        }
    }

    #[test]
    fn test_paris_rows() {
        let rows = fallback_rows("Paris Agreement", "Environment Conservation Act");
        let articles: Vec<&str> = rows.iter().map(|r| r.treaty_article.as_str()).collect();
        assert_eq!(
            articles,
            [
                "Article 4", "Article 5", "Article 6", "Article 7", "Article 9", "Article 10",
                "Article 13", "Article 14"
            ]
        );
        assert_eq!(
            rows[0].national_mapping,
            "Environment Conservation Act: climate planning instruments mention mitigation commitments."
        );
        assert_eq!(rows[2].status, ComplianceStatus::Gap);
    }

    #[test]
    fn test_unfccc_and_kyoto_share_climate_rows() {
        let unfccc = fallback_rows("UNFCCC", "Law");
        let kyoto = fallback_rows("Kyoto Protocol", "Law");
        assert_eq!(unfccc, kyoto);
        assert_eq!(unfccc[0].treaty_article, "Article 4");
    }

    #[test]
    fn test_consular_rows() {
        let rows = fallback_rows("Vienna Convention on Consular Relations", "Consular Act");
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].treaty_article, "Article 5");
        assert_eq!(rows[7].treaty_article, "Article 55");
        assert_eq!(rows[7].severity, SeverityLevel::Low);
        assert!(rows[0].national_mapping.starts_with("Consular Act:"));
    }

    #[test]
    fn test_generic_rows_alternate_severity() {
        let rows = fallback_rows("Some Other Treaty", "Some Act");
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].treaty_article, "Article 1");
        assert_eq!(rows[0].severity, SeverityLevel::High);
        assert_eq!(rows[1].severity, SeverityLevel::Medium);
        assert!(rows.iter().all(|r| r.confidence == 0.66));
    }

    #[test]
    fn test_report_is_deterministic() {
        let first = build_fallback_report(&submission("Paris Agreement"));
        let second = build_fallback_report(&submission("Paris Agreement"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_report_contents() {
        let report = build_fallback_report(&submission("Paris Agreement"));

        assert_eq!(report.results.len(), 8);
        assert_eq!(report.top_urgent_gaps.len(), 5);
        assert_eq!(
            report.top_urgent_gaps[0],
            "Article 4: MoEFCC to issue NDC preparation and update rules by gazette notification."
        );
        assert!(report.executive_summary.contains("treaty excerpt 60 chars"));
        assert!(report.executive_summary.contains("treaty doc 0 chars"));
        assert!(report.executive_summary.contains("national instrument excerpt 70 chars"));
        assert!(report.executive_summary.contains("law doc 5 chars"));
        assert_eq!(report.action_list_30_60_90.len(), 3);
        assert_eq!(report.action_list_30_60_90[0], FALLBACK_ACTIONS[0]);
        assert_eq!(report.human_review_disclaimer, FALLBACK_DISCLAIMER);
    }
}
