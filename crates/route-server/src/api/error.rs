//! Error responses.

use crate::state::SessionUnavailable;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use route_core::{PickerError, SessionError};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    Session(SessionError),
    Unavailable,
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Session(err) => match err {
                SessionError::NoSuchSegment(_) => StatusCode::BAD_REQUEST,
                SessionError::Picker(PickerError::NoOptions) => StatusCode::NOT_FOUND,
                SessionError::Picker(PickerError::UnknownOption(_)) => StatusCode::BAD_REQUEST,
                _ => StatusCode::CONFLICT,
            },
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err)
    }
}

impl From<SessionUnavailable> for ApiError {
    fn from(_: SessionUnavailable) -> Self {
        ApiError::Unavailable
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Session(err) => err.to_string(),
            ApiError::Unavailable => SessionUnavailable.to_string(),
            ApiError::BadRequest(message) => message.clone(),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
