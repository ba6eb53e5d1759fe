use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use validator::ValidationErrors;

use crate::repo::RepoError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("bad request: {0}")] BadRequest(String),
    #[error("validation failed")] Validation(#[from] ValidationErrors),
    #[error("unauthorized")] Unauthorized,
    #[error("not found")] NotFound,
    #[error("conflict")] Conflict,
    #[error("too many requests")] TooManyRequests,
    #[error("internal error")] Internal,
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => ApiError::Conflict,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::BadRequest(detail) => ApiErrorBody {
                error: "bad request".into(),
                details: Some(serde_json::Value::String(detail.clone())),
            },
            ApiError::Validation(errs) => ApiErrorBody {
                error: self.to_string(),
                details: serde_json::to_value(errs).ok(),
            },
            _ => ApiErrorBody { error: self.to_string(), details: None },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
