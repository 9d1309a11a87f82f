use axum::{ extract::State, http::StatusCode, Json };
use serde::Serialize;

use crate::error::Result;
use crate::services::HourlyPrice;

use super::AppState;

#[derive(Serialize)]
pub struct PriceResponse {
    pub chain: String,
    pub price: f64,
    pub created_at: String,
}

pub async fn get_latest_prices(State(state): State<AppState>) -> Result<Json<Vec<PriceResponse>>> {
    let samples = state.report_service.latest_prices().await?;

    let response = samples
        .into_iter()
        .map(|s| PriceResponse {
            chain: s.chain,
            price: s.price,
            created_at: s.created_at.to_rfc3339(),
        })
        .collect();

    Ok(Json(response))
}

pub async fn get_hourly_prices(State(state): State<AppState>) -> Result<Json<Vec<HourlyPrice>>> {
    let rows = state.report_service.hourly_prices().await?;

    Ok(Json(rows))
}

/// Manual trigger mirroring the scheduled fetch: persist fresh samples, then
/// run the threshold-alert cycle against them.
pub async fn fetch_prices(State(state): State<AppState>) -> Result<StatusCode> {
    state.ingest_service.fetch_and_save().await?;
    state.alert_service.check_alerts().await?;

    Ok(StatusCode::OK)
}
