//! OpenAPI specification endpoints

use actix_web::{HttpResponse, get};
use utoipa::OpenApi;

use crate::api::ApiError;
use crate::api::error::ErrorResponse;
use crate::api::health::HealthStatus;
use crate::model::{
    ComplianceStatus, CrisisGenerateRequest, CrisisGenerateResponse, EvacuationPlan,
    ExtractTextResponse, FallbackReason, FieldViolation, ModeUsed, QualityGate,
    RelevanceAssessment, RelevanceStatus, RoleTask, SeverityLevel, TimelinePhase,
    TreatyAnalysisResult, TreatyAnalyzeRequest, TreatyAnalyzeResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kham Pilot API",
        description = "Treaty compliance mapping and consular crisis planning with deterministic fallback"
    ),
    paths(
        crate::api::health::health,
        crate::api::treaty::analyze_treaty,
        crate::api::crisis::generate_crisis_plan,
        crate::api::extract::extract_uploaded_text,
    ),
    components(schemas(
        HealthStatus,
        ErrorResponse,
        FieldViolation,
        TreatyAnalyzeRequest,
        TreatyAnalyzeResponse,
        TreatyAnalysisResult,
        CrisisGenerateRequest,
        CrisisGenerateResponse,
        RoleTask,
        TimelinePhase,
        EvacuationPlan,
        ExtractTextResponse,
        QualityGate,
        RelevanceAssessment,
        RelevanceStatus,
        ModeUsed,
        FallbackReason,
        ComplianceStatus,
        SeverityLevel,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "treaty", description = "Treaty-to-domestic-law compliance mapping"),
        (name = "crisis", description = "Consular crisis operational orders"),
        (name = "utils", description = "Document text extraction")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(format!("OpenAPI YAML rendering failed: {}", e)))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
