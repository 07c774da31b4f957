pub mod coerce;
pub mod crisis;
pub mod json_extract;
pub mod llm;
pub mod relevance;
pub mod report;
pub mod text_extraction;
pub mod treaty;

pub use crisis::CrisisPlanService;
pub use llm::{CompletionProvider, OpenRouterClient};
pub use treaty::TreatyAnalysisService;
