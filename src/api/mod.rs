//! REST surface of the gateway
//!
//! Every route reads the shared snapshot; nothing here mutates state.

pub mod handlers;

use crate::geocode::GeocodeClient;
use crate::snapshot::Snapshot;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<Snapshot>,
    pub geocoder: Arc<GeocodeClient>,
    pub collection: Arc<str>,
}

impl AppState {
    pub fn new(snapshot: Snapshot, geocoder: GeocodeClient, collection: &str) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            geocoder: Arc::new(geocoder),
            collection: Arc::from(collection),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health))
        .route("/summary", get(handlers::get_summary))
        .route("/regional", get(handlers::get_regional))
        .route("/regional/", get(handlers::get_region_by_coords))
        .route("/regional/:loc", get(handlers::get_region))
        .route("/collectionname", get(handlers::get_collection_name))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
