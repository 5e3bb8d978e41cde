//! Response bodies and error mapping.
//!
//! # Design Decisions
//! - Errors are returned as `{"error": "<message>"}` with a status per error kind
//! - Provider failures surface as 502, persistence failures as 503

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::SafeRouteError;
use crate::hazard::{Beacon, HazardSummary};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl SafeRouteError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SafeRouteError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SafeRouteError::AddressNotFound(_) | SafeRouteError::NotFound(_) => StatusCode::NOT_FOUND,
            SafeRouteError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            SafeRouteError::PersistenceFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for SafeRouteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = %status, error = %self, "Request failed");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub hazards: HazardSummary,
}

#[derive(Debug, Serialize)]
pub struct SosCreated {
    pub beacon: Beacon,
    pub persisted: bool,
}

#[derive(Debug, Serialize)]
pub struct SosList {
    pub sos: Vec<Beacon>,
}
