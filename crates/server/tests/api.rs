use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use qaforecast_core::{APOLOGY, FORECAST_PROMPT, ForecastEngine, QaEngine};
use qaforecast_server::{router, utils::AppState};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
  router(AppState::new(QaEngine::new(None, None), ForecastEngine::new()))
}

async fn post(uri: &str, body: &Value) -> (StatusCode, Value) {
  let response = app()
    .oneshot(
      Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap(),
    )
    .await
    .unwrap();

  let status = response.status();
  let bytes = response.into_body().collect().await.unwrap().to_bytes();
  let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, json)
}

fn daily_series(n: usize, value: f64) -> Value {
  let series: Vec<Value> = (0..n)
    .map(|i| json!({ "ds": format!("2024-01-{:02}", i + 1), "y": value }))
    .collect();
  Value::Array(series)
}

#[tokio::test]
async fn chat_forecast_keyword_asks_for_data() {
  let (status, body) = post(
    "/chat",
    &json!({
      "conversation": [{ "role": "user", "text": "hi" }],
      "message": "I need a forecast"
    }),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["reply"]["text"], FORECAST_PROMPT);
  assert_eq!(body["reply"]["ask_followup"], true);
}

#[tokio::test]
async fn chat_without_resources_apologises() {
  let (status, body) = post("/chat", &json!({ "conversation": [], "message": "hello" })).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "reply": { "text": APOLOGY, "ask_followup": false } }));
}

#[tokio::test]
async fn chat_rejects_missing_message() {
  let (status, _) = post("/chat", &json!({ "conversation": [] })).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn forecast_small_series_uses_persistence() {
  let (status, body) = post(
    "/forecast",
    &json!({
      "series": [
        { "ds": "2024-01-01", "y": 1 },
        { "ds": "2024-01-02", "y": 2 },
        { "ds": "2024-01-03", "y": 3 },
        { "ds": "2024-01-04", "y": 4 },
        { "ds": "2024-01-05", "y": 5 }
      ],
      "horizon": 5
    }),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  let forecast = body["forecast"].as_array().unwrap();
  assert_eq!(forecast.len(), 5);
  assert_eq!(forecast[0], json!({ "ds": "2024-01-06", "y": 5.0 }));
  assert_eq!(forecast[4], json!({ "ds": "2024-01-10", "y": 5.0 }));
}

#[tokio::test]
async fn forecast_defaults_to_fourteen_days() {
  let (status, body) = post("/forecast", &json!({ "series": daily_series(30, 100.0) })).await;

  assert_eq!(status, StatusCode::OK);
  let forecast = body["forecast"].as_array().unwrap();
  assert_eq!(forecast.len(), 14);
  assert_eq!(forecast[0]["ds"], "2024-01-31");
  assert_eq!(forecast[13]["ds"], "2024-02-13");
  for point in forecast {
    let y = point["y"].as_f64().unwrap();
    assert!((y - 100.0).abs() < 1e-6);
  }
}

#[tokio::test]
async fn forecast_missing_values_is_a_server_error() {
  let (status, body) = post(
    "/forecast",
    &json!({ "series": [{ "ds": "2024-01-01" }, { "ds": "2024-01-02" }] }),
  )
  .await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body["detail"], "Series must contain 'ds' and 'y' columns");
}

#[tokio::test]
async fn openapi_lists_both_endpoints() {
  let response = app()
    .oneshot(Request::builder().uri("/openapi.json").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let bytes = response.into_body().collect().await.unwrap().to_bytes();
  let doc: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(doc["paths"]["/chat"]["post"].is_object());
  assert!(doc["paths"]["/forecast"]["post"].is_object());
}

#[tokio::test]
async fn forecast_negative_horizon_is_a_server_error() {
  let (status, body) = post(
    "/forecast",
    &json!({ "series": daily_series(3, 1.0), "horizon": -3 }),
  )
  .await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body["detail"], "horizon must not be negative, got -3");
}
