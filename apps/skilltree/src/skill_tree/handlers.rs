//! Axum route handlers for the Skill Tree API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Html,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::document::read_pdf;
use crate::errors::AppError;
use crate::render::render_html;
use crate::skill_tree::service::{generate_skill_tree, SkillTreeResponse};
use crate::state::AppState;

const PDF_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
}

/// POST /api/v1/skill-tree
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<SkillTreeResponse>, AppError> {
    let response = generate_skill_tree(&state.coordinator, &request.text).await?;
    Ok(Json(response))
}

/// POST /api/v1/skill-tree/pdf
///
/// Multipart upload with the resume in the `file` field.
pub async fn handle_generate_from_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SkillTreeResponse>, AppError> {
    let mut pdf: Option<Bytes> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(PDF_FIELD) {
            pdf = Some(field.bytes().await.map_err(multipart_error)?);
            break;
        }
    }
    let pdf = pdf.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{PDF_FIELD}' is required"))
    })?;

    let text = read_pdf(pdf).await?;
    tracing::info!("Extracted {} characters from uploaded PDF", text.len());

    let response = generate_skill_tree(&state.coordinator, &text).await?;
    Ok(Json(response))
}

/// POST /api/v1/skill-tree/html
///
/// Same pipeline as `/api/v1/skill-tree`, rendered as an interactive page.
pub async fn handle_generate_html(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Html<String>, AppError> {
    let response = generate_skill_tree(&state.coordinator, &request.text).await?;
    let page = render_html(&response.tree).map_err(|e| AppError::Internal(e.into()))?;
    Ok(Html(page))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}
