//! Liveness endpoint

use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthStatus {
    pub ok: bool,
    pub version: String,
}

/// Liveness probe endpoint
///
/// Always returns 200 OK if the service is running. The service has no
/// backing stores, so there is no separate readiness check.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is alive", body = HealthStatus)
    ),
    tag = "health"
)]
#[get("/api/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        ok: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
