use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use pricerank_core::{
    parse_date, NormalizedRange, PriceError, PriceRecord, PriceService, PriceTime, Symbol,
};
use serde::{Deserialize, Serialize};

use crate::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub service: PriceService,
}

impl AppState {
    pub fn new(service: PriceService) -> Self {
        Self { service }
    }

    /// Runs a core query on the blocking pool; series loading reads files.
    async fn run<T, F>(&self, query: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&PriceService) -> Result<T, PriceError> + Send + 'static,
    {
        let service = self.service.clone();
        tokio::task::spawn_blocking(move || query(&service))
            .await
            .map_err(|join| ApiError::Internal(join.to_string()))?
            .map_err(ApiError::from)
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn all_prices(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<PriceRecord>>, ApiError> {
    let Path(symbol) = path?;
    let symbol = Symbol::parse(&symbol)?;
    let records = state.run(move |service| service.get_all_prices(&symbol)).await?;
    Ok(Json(records))
}

pub async fn min_price(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PriceRecord>, ApiError> {
    let Path(symbol) = path?;
    let symbol = Symbol::parse(&symbol)?;
    let record = state.run(move |service| service.get_min_price(&symbol)).await?;
    Ok(Json(record))
}

pub async fn max_price(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PriceRecord>, ApiError> {
    let Path(symbol) = path?;
    let symbol = Symbol::parse(&symbol)?;
    let record = state.run(move |service| service.get_max_price(&symbol)).await?;
    Ok(Json(record))
}

pub async fn oldest_price(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PriceRecord>, ApiError> {
    let Path(symbol) = path?;
    let symbol = Symbol::parse(&symbol)?;
    let record = state.run(move |service| service.get_oldest_price(&symbol)).await?;
    Ok(Json(record))
}

pub async fn newest_price(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PriceRecord>, ApiError> {
    let Path(symbol) = path?;
    let symbol = Symbol::parse(&symbol)?;
    let record = state.run(move |service| service.get_newest_price(&symbol)).await?;
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    from: Option<String>,
    to: Option<String>,
}

pub async fn prices_in_period(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<Json<Vec<PriceRecord>>, ApiError> {
    let Path(symbol) = path?;
    let symbol = Symbol::parse(&symbol)?;
    let Query(params) = query?;
    let offset = state.service.offset();
    let from = PriceTime::parse(required(params.from.as_deref(), "from")?, offset)?;
    let to = PriceTime::parse(required(params.to.as_deref(), "to")?, offset)?;

    let records = state
        .run(move |service| service.get_all_prices_in_period(&symbol, from, to))
        .await?;
    Ok(Json(records))
}

pub async fn all_ranked(
    State(state): State<AppState>,
) -> Result<Json<Vec<NormalizedRange>>, ApiError> {
    let ranked = state.run(PriceService::get_all_ranked).await?;
    Ok(Json(ranked))
}

#[derive(Debug, Deserialize)]
pub struct BestQuery {
    date: Option<String>,
}

pub async fn best_for_date(
    State(state): State<AppState>,
    query: Result<Query<BestQuery>, QueryRejection>,
) -> Result<Json<NormalizedRange>, ApiError> {
    let Query(params) = query?;
    let date = parse_date(required(params.date.as_deref(), "date")?)?;
    let best = state
        .run(move |service| service.get_best_for_date(date))
        .await?;
    Ok(Json(best))
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ApiError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::BadRequest(format!(
            "missing required query parameter '{name}'"
        ))),
    }
}
