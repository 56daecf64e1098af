use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Failures at the input boundary. The projection engine itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A parameter that cannot be clamped into its range (NaN, infinite).
    #[error("{0}")]
    InvalidInput(String),

    /// Command-line flags that clap could not parse, including help requests.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("Not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::Usage(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_displays_message_verbatim() {
        let err = ApiError::InvalidInput("expectedReturn must be a finite number".into());
        assert_eq!(err.to_string(), "expectedReturn must be a finite number");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
