//! HTTP-facing error type. Load and startup paths use `anyhow` directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::logging::{log, obj, v_str, Domain, Level};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{:#}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log(
            if status.is_server_error() { Level::Error } else { Level::Warn },
            Domain::Http,
            "request_failed",
            obj(&[
                ("status", serde_json::json!(status.as_u16())),
                ("msg", v_str(self.message())),
            ]),
        );
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
