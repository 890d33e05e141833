use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::email::NotifyError;
use crate::models::FormKind;
use crate::store::StoreError;
use crate::submission::fields::ValidationError;

pub const SERVER_ERROR_MESSAGE: &str = "サーバーエラーが発生しました。";
pub const PARSE_ERROR_MESSAGE: &str = "リクエストの形式が正しくありません。";

#[derive(Debug)]
pub enum AppError {
    Parse(String),
    Validation(ValidationError),
    NotFound(String),
    Persistence(StoreError),
    Notification(NotifyError),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Parse(msg) => write!(f, "Parse Error: {msg}"),
            AppError::Validation(err) => write!(f, "Validation Error: {err}"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Persistence(err) => write!(f, "Persistence Error: {err}"),
            AppError::Notification(err) => write!(f, "Notification Error: {err}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Parse(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) | AppError::Notification(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text shown to the visitor. Server-side causes never leak into it.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Parse(_) => PARSE_ERROR_MESSAGE,
            AppError::Validation(err) => err.message(),
            AppError::NotFound(msg) => msg,
            AppError::Persistence(_) | AppError::Notification(_) | AppError::Internal(_) => {
                SERVER_ERROR_MESSAGE
            }
        }
    }

    fn body(&self) -> Value {
        let mut body = json!({ "error": self.public_message() });
        if let AppError::Validation(err) = self {
            body["fields"] = json!(err.violations());
        }
        body
    }

    fn log(&self) {
        match self {
            AppError::Parse(msg) => tracing::debug!("Rejected request body: {msg}"),
            AppError::Validation(err) => tracing::warn!("Rejected submission: {err}"),
            AppError::NotFound(_) => {}
            AppError::Persistence(err) => tracing::error!("Persistence error: {err}"),
            AppError::Notification(err) => tracing::error!("Notification error: {err}"),
            AppError::Internal(msg) => tracing::error!("Internal error: {msg}"),
        }
    }

    /// Render in the shape the submitting form expects.
    ///
    /// The application form reads `success` and `message`; the inquiry form reads `error`.
    pub fn into_form_response(self, kind: FormKind) -> Response {
        self.log();
        let mut body = self.body();
        if kind == FormKind::Application {
            body["success"] = json!(false);
            body["message"] = json!(self.public_message());
        }
        (self.status(), axum::Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), axum::Json(self.body())).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Persistence(err)
    }
}

impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        AppError::Notification(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}
