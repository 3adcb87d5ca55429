use crate::{
    error::AppError,
    models::{AggregateResponse, ChartQuery, ChartResponse, SeriesResponse, TickersResponse},
    AppState,
};
use analytics::TickerOverview;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Html,
    Json,
};
use core_types::{PriceObservation, Ticker};
use std::sync::Arc;

const LANDING_PAGE: &str = include_str!("../templates/landing.html");
const DASHBOARD_PAGE: &str = include_str!("../templates/dashboard.html");

/// Loads `ticker` and runs `work` on a blocking thread. File reads and the
/// analytics pipeline are synchronous, so they stay off the async workers.
async fn with_ticker<T, F>(state: Arc<AppState>, ticker: String, work: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&AppState, Ticker) -> Result<T, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let data = state.repository.load_ticker(&ticker)?;
        work(state.as_ref(), data)
    })
    .await
    .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))?
}

/// # GET /
pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// # GET /dashboard
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

/// # GET /api/tickers
pub async fn list_tickers(State(state): State<Arc<AppState>>) -> Result<Json<TickersResponse>, AppError> {
    let tickers = tokio::task::spawn_blocking(move || state.repository.list_tickers())
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))??;
    Ok(Json(TickersResponse { tickers }))
}

/// # GET /api/tickers/:ticker
/// Date coverage of a ticker, used to bound the dashboard's pickers.
pub async fn get_ticker(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TickerOverview>, AppError> {
    let overview = with_ticker(state, ticker, |state, data| Ok(state.engine.overview(&data))).await?;
    Ok(Json(overview))
}

/// # GET /api/tickers/:ticker/prices
/// The raw observations whose trading day passes the filter.
pub async fn get_prices(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<Vec<PriceObservation>>, AppError> {
    let Query(query) = query?;
    let filter = query.date_filter()?;
    let rows = with_ticker(state, ticker, move |state, data| {
        let rows: Vec<PriceObservation> = state.engine.filter_rows(&data, &filter)?.copied().collect();
        Ok(rows)
    })
    .await?;
    Ok(Json(rows))
}

/// # GET /api/tickers/:ticker/series
pub async fn get_series(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<Vec<SeriesResponse>>, AppError> {
    let Query(query) = query?;
    let filter = query.date_filter()?;
    let series: Vec<SeriesResponse> = with_ticker(state, ticker, move |state, data| {
        let days = state.engine.daily_series(&data, &filter)?;
        Ok(days.iter().map(SeriesResponse::from).collect())
    })
    .await?;
    Ok(Json(series))
}

/// # GET /api/tickers/:ticker/aggregate
/// Responds with `null` when the mode yields no aggregate.
pub async fn get_aggregate(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<Option<AggregateResponse>>, AppError> {
    let Query(query) = query?;
    let filter = query.date_filter()?;
    let mode = query.mode()?;
    let aggregate = with_ticker(state, ticker, move |state, data| {
        let aggregate = state.engine.aggregate(&data, &filter, mode)?;
        Ok(aggregate.as_ref().map(AggregateResponse::from))
    })
    .await?;
    Ok(Json(aggregate))
}

/// # GET /api/tickers/:ticker/chart
/// Everything the dashboard draws in one round trip.
pub async fn get_chart(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<ChartResponse>, AppError> {
    let Query(query) = query?;
    let filter = query.date_filter()?;
    let mode = query.mode()?;
    let chart = with_ticker(state, ticker, move |state, data| {
        let report = state.engine.chart(&data, &filter, mode)?;
        tracing::debug!(
            ticker = %data.symbol,
            %mode,
            days = report.days.len(),
            "Chart computed."
        );
        Ok(ChartResponse {
            days: report.days.iter().map(SeriesResponse::from).collect(),
            aggregate: report.aggregate.as_ref().map(AggregateResponse::from),
            summary: report.summary,
            ticker: data.symbol,
        })
    })
    .await?;
    Ok(Json(chart))
}
