use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::models::FormKind;
use crate::state::SharedState;
use crate::submission::pipeline::PipelineResult;
use crate::submission::{fields, parser, pipeline};

pub const INQUIRY_ACCEPTED: &str = "お問合せを受け付けました。";
pub const APPLICATION_ACCEPTED: &str = "お申し込みを受け付けました。";

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let raw = match parser::parse_body(content_type, &body) {
        Ok(raw) => raw,
        Err(e) => return AppError::Parse(e).into_response(),
    };

    let kind = fields::detect(&raw);

    match pipeline::run(&state, kind, &raw).await {
        Ok(result) => accepted(result),
        Err(e) => e.into_form_response(kind),
    }
}

fn accepted(result: PipelineResult) -> Response {
    let body = match result.kind {
        FormKind::Inquiry => json!({ "message": INQUIRY_ACCEPTED }),
        FormKind::Application => json!({
            "success": true,
            "message": APPLICATION_ACCEPTED,
            "data": { "id": result.submission.id },
        }),
    };

    (StatusCode::OK, Json(body)).into_response()
}
