//! Request-level failures and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Region not found: {0}")]
    RegionNotFound(String),
    #[error("Missing query parameter: {0}")]
    MissingCoordinate(&'static str),
    #[error("Invalid coordinates: {0}")]
    BadCoordinate(String),
    #[error("Reverse geocoding is not configured")]
    GeocodeDisabled,
    #[error("{service} unreachable: {source}")]
    Unavailable {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} responded with {status}")]
    UpstreamStatus {
        service: &'static str,
        status: StatusCode,
    },
    #[error("{service} sent an undecodable payload: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::RegionNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::MissingCoordinate(_) | GatewayError::BadCoordinate(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::GeocodeDisabled | GatewayError::Unavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            GatewayError::UpstreamStatus { .. } | GatewayError::Decode { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!("request failed: {}", self);
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}
