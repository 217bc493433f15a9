use axum::{Json, extract::State};
use qaforecast_core::{DEFAULT_HORIZON, ForecastPoint, SeriesPoint};
use qaforecast_shared::AppError;
use serde::{Deserialize, Serialize};
use tokio::task;
use utoipa::ToSchema;

use crate::utils::AppState;

const fn default_horizon() -> i64 {
  DEFAULT_HORIZON
}

#[derive(Deserialize, ToSchema)]
pub struct ForecastRequest {
  pub series: Vec<SeriesPoint>,
  /// Days to forecast (default: 14)
  #[serde(default = "default_horizon")]
  pub horizon: i64,
}

#[derive(Serialize, ToSchema)]
pub struct ForecastResponse {
  pub forecast: Vec<ForecastPoint>,
}

/// Forecast a daily series
#[utoipa::path(
  post,
  path = "/forecast",
  request_body = ForecastRequest,
  responses(
    (status = 200, description = "One point per forecast day", body = ForecastResponse),
    (status = 500, description = "Invalid series or internal error, `detail` holds the message")
  )
)]
#[axum::debug_handler]
pub async fn forecast(
  State(state): State<AppState>,
  Json(payload): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, AppError> {
  let engine = state.forecast.clone();

  // model fitting is CPU bound
  let forecast =
    task::spawn_blocking(move || engine.predict(&payload.series, payload.horizon)).await??;

  Ok(Json(ForecastResponse { forecast }))
}
