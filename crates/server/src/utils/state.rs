use std::sync::Arc;

use qaforecast_core::{ForecastEngine, QaEngine};

/// Engines built once at startup, shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
  pub qa: Arc<QaEngine>,
  pub forecast: Arc<ForecastEngine>,
}

impl AppState {
  #[must_use]
  pub fn new(qa: QaEngine, forecast: ForecastEngine) -> Self {
    Self {
      qa: Arc::new(qa),
      forecast: Arc::new(forecast),
    }
  }
}
