use crate::error::SapcastError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error returned by the JSON endpoint, always rendered as `{"error": ...}`
#[derive(Debug)]
pub enum ApiError {
    InvalidCoordinates(String),
    Upstream(SapcastError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCoordinates(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(SapcastError::MissingCredentials(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Upstream(SapcastError::DataSourceUnavailable(_))
            | ApiError::Upstream(SapcastError::Http(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::InvalidCoordinates(msg) => msg.clone(),
            ApiError::Upstream(SapcastError::MissingCredentials(_)) => {
                "Weather API key is not configured".into()
            }
            ApiError::Upstream(SapcastError::DataSourceUnavailable(_))
            | ApiError::Upstream(SapcastError::Http(_)) => "Failed to fetch weather data".into(),
            ApiError::Upstream(_) => "Internal server error".into(),
        }
    }
}

impl From<SapcastError> for ApiError {
    fn from(err: SapcastError) -> Self {
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            if let ApiError::Upstream(ref e) = self {
                tracing::error!(status = status.as_u16(), "Forecast request failed: {}", e);
            }
        }

        (status, Json(ErrorBody { error: self.message() })).into_response()
    }
}
