//! Plain-text extraction from uploaded `.txt` and `.pdf` documents

use std::panic::{AssertUnwindSafe, catch_unwind};

pub const DEFAULT_FILENAME: &str = "uploaded-file";
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("Only .txt and .pdf files are supported")]
    UnsupportedType,

    #[error("Failed to parse PDF: {0}")]
    Pdf(String),

    #[error("No extractable text found in file")]
    NoText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Text,
    Pdf,
}

fn detect_kind(filename: &str, content_type: &str) -> Option<DocumentKind> {
    let name = filename.to_lowercase();
    let content_type = content_type.to_lowercase();

    if name.ends_with(".txt") || content_type.starts_with("text/") {
        Some(DocumentKind::Text)
    } else if name.ends_with(".pdf") || content_type == "application/pdf" {
        Some(DocumentKind::Pdf)
    } else {
        None
    }
}

/// Decode UTF-8, silently dropping invalid byte sequences
fn decode_text(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(data).replace(char::REPLACEMENT_CHARACTER, ""),
    }
}

fn pdf_to_text(data: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(data))) {
        Ok(Ok(text)) => Ok(text.trim().to_string()),
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => Err(ExtractionError::Pdf("malformed document".to_string())),
    }
}

/// Extract the text of an uploaded document
///
/// The type is decided by file extension first, then by declared content type.
pub fn extract_text(
    data: &[u8],
    filename: &str,
    content_type: &str,
) -> Result<String, ExtractionError> {
    if data.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let text = match detect_kind(filename, content_type) {
        Some(DocumentKind::Text) => decode_text(data),
        Some(DocumentKind::Pdf) => pdf_to_text(data)?,
        None => return Err(ExtractionError::UnsupportedType),
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }

    tracing::debug!(
        filename = %filename,
        bytes = data.len(),
        chars = text.chars().count(),
        "Extracted uploaded document text"
    );

    Ok(text)
}

/// Build a one-page PDF showing `text` in Helvetica
#[cfg(test)]
pub(crate) fn single_page_pdf(text: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>".to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
        format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, object).as_bytes());
    }

    let xref_start = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.extend_from_slice(xref.as_bytes());
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );
    pdf
}
