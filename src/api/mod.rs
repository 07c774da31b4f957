pub mod crisis;
pub mod error;
pub mod extract;
pub mod health;
pub mod openapi;
pub mod treaty;

use actix_cors::Cors;
use actix_web::web;

use crate::model::config::ANY_ORIGIN;

pub use error::ApiError;

/// JSON extractor settings shared by every endpoint
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(error::json_error_handler)
}

/// CORS policy allowing the configured browser origins
///
/// Origins must already be validated; a `*` entry admits every origin.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600);

    if allowed_origins.iter().any(|origin| origin == ANY_ORIGIN) {
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
