use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for `POST /api/utils/extract-text`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractTextResponse {
    pub filename: String,
    pub content_type: String,
    pub extracted_text: String,
    /// Length of `extracted_text` in characters
    pub extracted_chars: usize,
}
