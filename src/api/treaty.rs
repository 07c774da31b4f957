//! REST API endpoint for treaty compliance analysis

use actix_web::{HttpResponse, post, web};
use chrono::Utc;

use crate::api::ApiError;
use crate::model::TreatyAnalyzeRequest;
use crate::service::TreatyAnalysisService;

/// Map treaty obligations to a national instrument
///
/// Always answers with a report when the request is valid; `mode_used`
/// tells whether the completion provider or the deterministic fallback produced it.
#[utoipa::path(
    post,
    path = "/api/treaty/analyze",
    request_body = TreatyAnalyzeRequest,
    responses(
        (status = 200, description = "Treaty compliance report", body = crate::model::TreatyAnalyzeResponse),
        (status = 400, description = "Malformed JSON or unknown field", body = crate::api::error::ErrorResponse),
        (status = 422, description = "Field validation failed", body = crate::api::error::ErrorResponse)
    ),
    tag = "treaty"
)]
#[post("/api/treaty/analyze")]
pub async fn analyze_treaty(
    service: web::Data<TreatyAnalysisService>,
    payload: web::Json<TreatyAnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let submission = payload.into_inner().validate().map_err(ApiError::Validation)?;

    tracing::debug!(
        treaty = %submission.treaty_name,
        law = %submission.law_name,
        "Treaty analysis requested"
    );

    let report = service.analyze(&submission, Utc::now()).await;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure treaty routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze_treaty);
}
