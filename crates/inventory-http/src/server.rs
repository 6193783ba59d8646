//! HTTP server exposing an inventory service.

use crate::{
    COPIES_PATH, EDITOR_PICKS_PATH, HEALTH_PATH, PURCHASE_PATH, RESET_PATH, STOCK_ENTRIES_PATH,
    STORE_ENTRIES_PATH,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use catalog_core::{CatalogEntry, CopyRequest, EntryId};
use inventory_service::{InventoryService, ServiceError};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

/// Port the server listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8081;

type SharedService = Arc<dyn InventoryService>;

/// Service error rendered as an HTTP response.
struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::Domain(domain) => {
                debug!("Rejected request: {}", domain);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(domain)).into_response()
            }
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct EditorPicksQuery {
    count: usize,
}

/// Build the router serving `service`.
pub fn router(service: SharedService) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(RESET_PATH, post(reset_catalog))
        .route(STOCK_ENTRIES_PATH, post(add_entries).get(fetch_all))
        .route(COPIES_PATH, post(add_copies))
        .route(PURCHASE_PATH, post(purchase))
        .route(STORE_ENTRIES_PATH, post(fetch_by_ids))
        .route(EDITOR_PICKS_PATH, get(fetch_editor_picks))
        .with_state(service)
}

/// Serve `service` on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, service: SharedService) -> std::io::Result<()> {
    info!("Inventory server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(service)).await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn reset_catalog(State(service): State<SharedService>) -> Result<StatusCode, ApiError> {
    service.reset_catalog().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_entries(
    State(service): State<SharedService>,
    Json(entries): Json<Vec<CatalogEntry>>,
) -> Result<StatusCode, ApiError> {
    service.add_entries(entries).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_copies(
    State(service): State<SharedService>,
    Json(requests): Json<Vec<CopyRequest>>,
) -> Result<StatusCode, ApiError> {
    service.add_copies(requests).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn purchase(
    State(service): State<SharedService>,
    Json(requests): Json<Vec<CopyRequest>>,
) -> Result<StatusCode, ApiError> {
    service.purchase(requests).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_all(
    State(service): State<SharedService>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    Ok(Json(service.fetch_all().await?))
}

async fn fetch_by_ids(
    State(service): State<SharedService>,
    Json(ids): Json<BTreeSet<EntryId>>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    Ok(Json(service.fetch_by_ids(&ids).await?))
}

async fn fetch_editor_picks(
    State(service): State<SharedService>,
    Query(query): Query<EditorPicksQuery>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    Ok(Json(service.fetch_editor_picks(query.count).await?))
}
