//! PDF text extraction for uploaded resumes.
//!
//! `pdf-extract` first; `lopdf` page-by-page text as the fallback when the
//! primary errors, panics, or returns only whitespace.
//! CPU-bound: async callers go through `read_pdf`, which uses `spawn_blocking`.

use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF could not be read: {0}")]
    Unreadable(String),

    #[error("PDF contains no extractable text")]
    NoText,
}

pub async fn read_pdf(bytes: Bytes) -> Result<String, DocumentError> {
    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| DocumentError::Unreadable(format!("extraction task failed: {e}")))?
}

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut failures = Vec::new();

    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) if !text.trim().is_empty() => return Ok(text.trim().to_string()),
        Ok(Ok(_)) => debug!("pdf-extract found no text, trying lopdf"),
        Ok(Err(e)) => {
            warn!("pdf-extract failed, trying lopdf: {e}");
            failures.push(format!("pdf-extract: {e}"));
        }
        Err(_) => {
            warn!("pdf-extract panicked, trying lopdf");
            failures.push("pdf-extract: panicked".to_string());
        }
    }

    match lopdf_text(bytes) {
        Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Ok(_) => Err(DocumentError::NoText),
        Err(e) => {
            failures.push(format!("lopdf: {e}"));
            if failures.len() == 2 {
                Err(DocumentError::Unreadable(failures.join("; ")))
            } else {
                Err(DocumentError::NoText)
            }
        }
    }
}

fn lopdf_text(bytes: &[u8]) -> Result<String, lopdf::Error> {
    let document = lopdf::Document::load_mem(bytes)?;
    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    document.extract_text(&pages)
}
