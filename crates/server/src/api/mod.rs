use axum::{
  Json, Router,
  routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::utils::AppState;

mod chat;
mod forecast;

pub use chat::{ChatRequest, ChatResponse};
pub use forecast::{ForecastRequest, ForecastResponse};

#[derive(OpenApi)]
#[openapi(
  info(
    title = "QA + Forecast API",
    version = "0.0.1",
    description = "Conversational QA with a time-series forecasting tool"
  ),
  paths(chat::chat, forecast::forecast),
  components(schemas(
    ChatRequest,
    ChatResponse,
    ForecastRequest,
    ForecastResponse,
    qaforecast_core::SeriesPoint,
    qaforecast_core::ForecastPoint,
    qaforecast_shared::ConversationTurn,
    qaforecast_shared::Reply,
  ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
  Json(ApiDoc::openapi())
}

pub fn app() -> Router<AppState> {
  Router::new()
    .route("/chat", post(chat::chat))
    .route("/forecast", post(forecast::forecast))
    .route("/openapi.json", get(openapi_json))
    .merge(Scalar::with_url("/openapi/", ApiDoc::openapi()))
}
