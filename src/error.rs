//! Error type surfaced by the HTTP layer

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StoreError;
use crate::video::VideoId;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("video id not found: {0}")]
    NotFound(VideoId),

    #[error("cannot read video: {0}")]
    Unreadable(String),

    #[error("missing multipart field: {0}")]
    MissingField(&'static str),

    #[error("upload exceeds limit of {0} bytes")]
    TooLarge(u64),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for VideoError {
    fn status_code(&self) -> StatusCode {
        match self {
            VideoError::NotFound(_) => StatusCode::NOT_FOUND,
            VideoError::Unreadable(_) => StatusCode::NO_CONTENT,
            VideoError::MissingField(_) => StatusCode::BAD_REQUEST,
            VideoError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        // 204 must not carry a body
        if code == StatusCode::NO_CONTENT {
            return HttpResponse::NoContent().finish();
        }
        HttpResponse::build(code).json(ErrorResponse {
            error: self.to_string(),
            code: code.as_u16(),
        })
    }
}

impl From<StoreError> for VideoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => VideoError::NotFound(id),
            StoreError::Io(e) => VideoError::Unreadable(e.to_string()),
        }
    }
}
