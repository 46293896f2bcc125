use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::engine::{valid_student_id, RenderError, RenderedDocument, MIME_TYPE};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct VerifyParams {
    name: Option<String>,
    student_id: Option<String>,
}

pub async fn verify_student(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyParams>,
) -> impl IntoResponse {
    let name = params.name.as_deref().map(str::trim).unwrap_or("");
    let student_id = params.student_id.as_deref().map(str::trim).unwrap_or("");

    if name.is_empty() || student_id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Both name and student_id are required." })),
        )
            .into_response();
    }

    if !valid_student_id(student_id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid Student ID format. Expected: 2025-XXXXX-MN-0" })),
        )
            .into_response();
    }

    match state.roster.find(name, student_id) {
        Some(student) => Json(json!({ "student": student })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Student not found. Please check your name and ID, or contact your block representative."
            })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    name: String,
    student_id: String,
}

/// Issue the certificate PDF as a download.
///
/// The request carries only the claimed identity; the award and average are
/// re-derived from the roster record, never taken from the client.
pub async fn generate_certificate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> axum::response::Response {
    let record = match state.roster.verify(req.name.trim(), req.student_id.trim()) {
        Some(record) => record,
        None => {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Student verification failed." })),
            )
                .into_response();
        }
    };

    match state.engine.render(&record).await {
        Ok(doc) => attachment_response(doc),
        Err(err @ RenderError::VerificationRequired) => {
            tracing::warn!("render refused for {}: {}", record.student_id, err);
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Student verification failed." })),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!("certificate generation failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to generate certificate." })),
            )
                .into_response()
        }
    }
}

fn attachment_response(doc: RenderedDocument) -> axum::response::Response {
    axum::response::Response::builder()
        .header("Content-Type", MIME_TYPE)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", doc.filename),
        )
        .body(axum::body::Body::from(doc.bytes))
        .unwrap()
        .into_response()
}
