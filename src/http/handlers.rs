//! Route handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::SafeRouteError;
use crate::geometry::Coordinate;
use crate::http::request::{AddressQuery, ComputeRouteQuery, SafeZoneQuery, SosRequest};
use crate::http::response::{SosCreated, SosList, StatusResponse};
use crate::http::server::AppState;
use crate::planner::{PlannedRoute, SafeZonePlan, Scenario};

pub async fn health() -> &'static str {
    "ok"
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        hazards: state.service.current_hazard_summary(),
    })
}

pub async fn compute_route(
    State(state): State<AppState>,
    Query(query): Query<ComputeRouteQuery>,
) -> Result<Json<PlannedRoute>, SafeRouteError> {
    let route = state
        .service
        .plan_route(query.origin(), query.destination())
        .await?;
    Ok(Json(route))
}

pub async fn route_by_address(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<PlannedRoute>, SafeRouteError> {
    Ok(Json(state.service.plan_route_by_address(&query.address).await?))
}

pub async fn find_safe_zone(
    State(state): State<AppState>,
    Query(query): Query<SafeZoneQuery>,
) -> Result<Json<SafeZonePlan>, SafeRouteError> {
    Ok(Json(
        state.service.find_safe_zone(&query.address, query.radius).await?,
    ))
}

pub async fn scenario(State(state): State<AppState>) -> Json<Scenario> {
    Json(state.service.scenario().await)
}

pub async fn submit_sos(
    State(state): State<AppState>,
    Json(request): Json<SosRequest>,
) -> Result<impl IntoResponse, SafeRouteError> {
    let submitted = state
        .service
        .submit_beacon(Coordinate::new(request.lat, request.lon), request.message, request.survivors)
        .await?;

    let body = SosCreated {
        persisted: submitted.persisted.is_ok(),
        beacon: submitted.beacon,
    };
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn list_sos(State(state): State<AppState>) -> Result<Json<SosList>, SafeRouteError> {
    Ok(Json(SosList {
        sos: state.service.list_beacons().await?,
    }))
}
