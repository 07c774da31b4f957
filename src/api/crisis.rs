//! REST API endpoint for crisis response plans

use actix_web::{HttpResponse, post, web};
use chrono::Utc;

use crate::api::ApiError;
use crate::model::CrisisGenerateRequest;
use crate::service::CrisisPlanService;

/// Generate a consular crisis operational order
#[utoipa::path(
    post,
    path = "/api/crisis/generate",
    request_body = CrisisGenerateRequest,
    responses(
        (status = 200, description = "Crisis operational order", body = crate::model::CrisisGenerateResponse),
        (status = 400, description = "Malformed JSON, unknown field or wrong type", body = crate::api::error::ErrorResponse),
        (status = 422, description = "Field validation failed", body = crate::api::error::ErrorResponse)
    ),
    tag = "crisis"
)]
#[post("/api/crisis/generate")]
pub async fn generate_crisis_plan(
    service: web::Data<CrisisPlanService>,
    payload: web::Json<CrisisGenerateRequest>,
) -> Result<HttpResponse, ApiError> {
    let scenario = payload.into_inner().validate().map_err(ApiError::Validation)?;
    let plan = service.generate(&scenario, Utc::now()).await;
    Ok(HttpResponse::Ok().json(plan))
}

/// Configure crisis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_crisis_plan);
}
