//! REST API handlers
//!
//! These handlers read the shared snapshot held in `AppState`.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use super::AppState;
use crate::error::{GatewayError, Result};
use crate::models::{RegionalRecord, SummaryRecord};

pub const HEALTH_MESSAGE: &str = "If you are able to see this line , setup successfully";

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CoordsQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl CoordsQuery {
    /// Both coordinates, neither, or a 400 naming the missing or bad one
    fn pair(&self) -> Result<Option<(f64, f64)>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                for (name, value) in [("lat", lat), ("lon", lon)] {
                    if !value.is_finite() {
                        return Err(GatewayError::BadCoordinate(format!(
                            "{} must be a finite number",
                            name
                        )));
                    }
                }
                Ok(Some((lat, lon)))
            }
            (None, None) => Ok(None),
            (Some(_), None) => Err(GatewayError::MissingCoordinate("lon")),
            (None, Some(_)) => Err(GatewayError::MissingCoordinate("lat")),
        }
    }
}

/// Unparseable numbers get the same JSON error body as every other failure
fn coords(query: std::result::Result<Query<CoordsQuery>, QueryRejection>) -> Result<CoordsQuery> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| GatewayError::BadCoordinate(rejection.body_text()))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// GET /summary
pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryRecord> {
    Json(state.snapshot.summary().clone())
}

/// GET /regional, or GET /regional?lat=..&lon=..
pub async fn get_regional(
    State(state): State<AppState>,
    query: std::result::Result<Query<CoordsQuery>, QueryRejection>,
) -> Result<Response> {
    match coords(query)?.pair()? {
        Some((lat, lon)) => Ok(region_at(&state, lat, lon).await?.into_response()),
        None => Ok(Json(state.snapshot.regional().to_vec()).into_response()),
    }
}

/// GET /regional/?lat=..&lon=..
pub async fn get_region_by_coords(
    State(state): State<AppState>,
    query: std::result::Result<Query<CoordsQuery>, QueryRejection>,
) -> Result<Json<RegionalRecord>> {
    let (lat, lon) = coords(query)?
        .pair()?
        .ok_or(GatewayError::MissingCoordinate("lat"))?;
    region_at(&state, lat, lon).await
}

/// GET /regional/:loc
pub async fn get_region(
    State(state): State<AppState>,
    Path(loc): Path<String>,
) -> Result<Json<RegionalRecord>> {
    match state.snapshot.find_region(&loc) {
        Some(record) => Ok(Json(record.clone())),
        None => Err(GatewayError::RegionNotFound(loc)),
    }
}

/// GET /collectionname
pub async fn get_collection_name(State(state): State<AppState>) -> String {
    state.collection.to_string()
}

async fn region_at(state: &AppState, lat: f64, lon: f64) -> Result<Json<RegionalRecord>> {
    let resolved = state.geocoder.resolve_state(lat, lon).await?;
    debug!("Coordinates {}, {} map to {:?}", lat, lon, resolved);

    let Some(name) = resolved else {
        return Err(GatewayError::RegionNotFound(format!("{}, {}", lat, lon)));
    };
    match state.snapshot.find_region(&name) {
        Some(record) => Ok(Json(record.clone())),
        None => Err(GatewayError::RegionNotFound(name)),
    }
}
