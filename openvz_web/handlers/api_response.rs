use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

use openvz_types::errors::{AppError, ApplicationError, DbError};

const SUCCESS_CODE: i32 = 0;
const ERROR_CODE: i32 = 100;

/// Envelope of every successful response: `{"code": 0, "message": "success", ...data}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: i32,
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

/// Payload for responses that carry nothing but the envelope.
#[derive(Debug, Serialize)]
pub struct Empty {}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "success".to_string(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: i32,
    message: String,
}

/// An error rendered as `{"code": 100, "message": ...}` with a matching status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::App(AppError::MissingParameter(_)) => {
                Self::bad_request(err.to_string())
            }
            ApplicationError::App(AppError::DuplicateContainerName(_)) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "A container with given name already exists",
            ),
            ApplicationError::Db(DbError::JobNotFound(_)) => {
                Self::new(StatusCode::NOT_FOUND, "no such job")
            }
            ApplicationError::Db(DbError::ContainerNotFound(_)) => {
                Self::new(StatusCode::NOT_FOUND, "no such container")
            }
            err => {
                tracing::error!(error = %err, "Request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: ERROR_CODE,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Parses an id path segment, rejecting anything that is not a UUID with a 400.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    if raw.is_empty() {
        return Err(ApiError::bad_request("id is missing or empty"));
    }
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("invalid id: {raw}")))
}
