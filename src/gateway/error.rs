use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::scoring::ScoringError;
use crate::search::SearchError;

use super::LARDER_STATUS_HEADER;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    ScoringUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<SearchError> for GatewayError {
    fn from(err: SearchError) -> Self {
        GatewayError::InvalidRequest(err.to_string())
    }
}

impl From<ScoringError> for GatewayError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::EmptyIngredientSet => GatewayError::InvalidRequest(err.to_string()),
            ScoringError::Store(_) => GatewayError::ScoringUnavailable(err.to_string()),
            ScoringError::InvalidPolicy { .. } => GatewayError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, larder_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::ScoringUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "scoring_unavailable")
            }
            GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let mut headers = HeaderMap::new();
        headers.insert(LARDER_STATUS_HEADER, HeaderValue::from_static(larder_status));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
