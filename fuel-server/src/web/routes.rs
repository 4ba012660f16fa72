//! HTTP route handlers.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domain::{FuelType, LatestPrice, PriceReport, Station, StationId};
use crate::pricing::validate;
use crate::proximity::NearbyStation;
use crate::service::{ServiceError, StationService};
use crate::store::Store;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S: Store + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/gas-stations",
            get(search_stations::<S>).post(create_station::<S>),
        )
        .route(
            "/api/gas-stations/:id",
            get(get_station::<S>)
                .put(update_station::<S>)
                .delete(delete_station::<S>),
        )
        .route("/api/gas-stations/:id/prices", get(list_prices::<S>))
        .route(
            "/api/gas-stations/:id/latest-prices",
            get(latest_prices::<S>),
        )
        .route("/api/prices", post(report_price::<S>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Stations near a point, nearest first.
async fn search_stations<S: Store + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<NearbyStation>>, AppError> {
    let query = SearchStationsQuery::from_params(&params)
        .map_err(|errors| AppError::Validation { errors })?;
    let stations = run(&state, move |service| {
        service.search_stations(query.lat, query.lng, query.radius)
    })
    .await?;
    Ok(Json(stations))
}

async fn create_station<S: Store + 'static>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Station>), AppError> {
    let req: StationRequest = parse_json(&body)?;
    let station = run(&state, move |service| {
        service.create_station(req.name(), req.address(), req.latitude(), req.longitude())
    })
    .await?;
    Ok((StatusCode::CREATED, Json(station)))
}

async fn get_station<S: Store + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Station>, AppError> {
    let id = parse_station_id(&id)?;
    let station = run(&state, move |service| service.get_station(id)).await?;
    Ok(Json(station))
}

async fn update_station<S: Store + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Station>, AppError> {
    let id = parse_station_id(&id)?;
    let req: StationRequest = parse_json(&body)?;
    let station = run(&state, move |service| {
        service.update_station(
            id,
            req.name(),
            req.address(),
            req.latitude(),
            req.longitude(),
        )
    })
    .await?;
    Ok(Json(station))
}

/// Delete a station and its price history.
async fn delete_station<S: Store + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Station>, AppError> {
    let id = parse_station_id(&id)?;
    let station = run(&state, move |service| service.delete_station(id)).await?;
    Ok(Json(station))
}

/// Every report for a station, newest first.
async fn list_prices<S: Store + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PriceReport>>, AppError> {
    let id = parse_station_id(&id)?;
    let reports = run(&state, move |service| service.list_prices(id)).await?;
    Ok(Json(reports))
}

async fn latest_prices<S: Store + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<BTreeMap<FuelType, LatestPrice>>, AppError> {
    let id = parse_station_id(&id)?;
    let latest = run(&state, move |service| service.latest_prices(id)).await?;
    Ok(Json(latest))
}

/// Report a price seen at a station.
async fn report_price<S: Store + 'static>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<PriceReport>), AppError> {
    let req: PriceRequest = parse_json(&body)?;
    let price = req.price_value();

    let Some(station_id) = req.station_id() else {
        let mut errors = vec!["gas_station_id is required".to_string()];
        errors.extend(validate(req.fuel_type(), price));
        return Err(AppError::Validation { errors });
    };

    let report = run(&state, move |service| {
        service.report_price(station_id, req.fuel_type(), price)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Run a service call off the async executor.
///
/// Store operations may block on the table lock or on snapshot I/O.
async fn run<S, T, F>(state: &AppState<S>, f: F) -> Result<T, AppError>
where
    S: Store + 'static,
    T: Send + 'static,
    F: FnOnce(&StationService<S>) -> Result<T, ServiceError> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("request task failed: {e}"),
        })?
        .map_err(AppError::from)
}

/// Parse a JSON body, reporting malformed input as a bad request.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(body = %String::from_utf8_lossy(body), "unparseable JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

fn parse_station_id(raw: &str) -> Result<StationId, AppError> {
    raw.parse().map(StationId).map_err(|_| AppError::BadRequest {
        message: format!("Invalid station id: {raw}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Validation { errors: Vec<String> },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => AppError::Validation {
                errors: errors.into_messages(),
            },
            ServiceError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            ServiceError::Storage(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation { errors } => {
                tracing::debug!(?errors, "request failed validation");
                (StatusCode::BAD_REQUEST, Json(ValidationResponse { errors })).into_response()
            }
            AppError::BadRequest { message } => {
                tracing::debug!(%message, "bad request");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
            }
            AppError::NotFound { message } => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message })).into_response()
            }
            AppError::Internal { message } => {
                tracing::error!(%message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { error: message }),
                )
                    .into_response()
            }
        }
    }
}
