//! REST API endpoint for document text extraction

use actix_multipart::Multipart;
use actix_web::{HttpResponse, post, web};
use futures::TryStreamExt;

use crate::api::ApiError;
use crate::model::{ExtractTextResponse, LimitsConfig};
use crate::service::text_extraction::{DEFAULT_CONTENT_TYPE, DEFAULT_FILENAME, extract_text};

const FILE_FIELD: &str = "file";

struct Upload {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

/// Read the `file` part of a multipart body, enforcing the upload limit
async fn read_upload(mut payload: Multipart, max_bytes: usize) -> Result<Upload, ApiError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != FILE_FIELD {
            while field
                .try_next()
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()))?
                .is_some()
            {}
            continue;
        }

        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?
        {
            if data.len() + chunk.len() > max_bytes {
                return Err(ApiError::PayloadTooLarge(format!(
                    "upload exceeds {} bytes",
                    max_bytes
                )));
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(Upload {
            filename,
            content_type,
            data,
        });
    }

    Err(ApiError::BadRequest(format!(
        "multipart field '{}' is required",
        FILE_FIELD
    )))
}

/// Extract plain text from an uploaded `.txt` or `.pdf` file
#[utoipa::path(
    post,
    path = "/api/utils/extract-text",
    request_body(content = String, content_type = "multipart/form-data", description = "Multipart body with a single `file` part"),
    responses(
        (status = 200, description = "Extracted text", body = ExtractTextResponse),
        (status = 400, description = "Empty, unsupported or unreadable file", body = crate::api::error::ErrorResponse),
        (status = 413, description = "Upload too large", body = crate::api::error::ErrorResponse)
    ),
    tag = "utils"
)]
#[post("/api/utils/extract-text")]
pub async fn extract_uploaded_text(
    limits: web::Data<LimitsConfig>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let Upload {
        filename,
        content_type,
        data,
    } = read_upload(payload, limits.max_upload_bytes).await?;
    let bytes = data.len();

    // PDF parsing is CPU-bound
    let extracted_text = web::block({
        let filename = filename.clone();
        let content_type = content_type.clone();
        move || extract_text(&data, &filename, &content_type)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Text extraction task failed: {}", e)))??;

    tracing::info!(
        filename = %filename,
        content_type = %content_type,
        bytes,
        "Text extracted from upload"
    );

    Ok(HttpResponse::Ok().json(ExtractTextResponse {
        extracted_chars: extracted_text.chars().count(),
        filename,
        content_type,
        extracted_text,
    }))
}

/// Configure extraction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(extract_uploaded_text);
}
