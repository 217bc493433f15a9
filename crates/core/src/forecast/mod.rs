use anyhow::anyhow;
use chrono::Days;
use qaforecast_shared::AppError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

mod lag;
use lag::LagDataset;

mod prepare;
pub use prepare::{AlignedSeries, prepare};

mod regressor;
use regressor::LagForest;

pub const DEFAULT_HORIZON: i64 = 14;

/// Width of the lag window fed to the regressor.
pub const N_LAGS: usize = 14;

/// Below this many aligned points the forecast is naive persistence.
const MIN_MODEL_POINTS: usize = 10;

const HOLDOUT_FRACTION: f64 = 0.2;
const SEED: u64 = 42;

/// One observation as sent by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SeriesPoint {
  /// Calendar date, `YYYY-MM-DD`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ds: Option<String>,
  /// Observed value; `null` marks a gap.
  #[serde(
    default,
    deserialize_with = "present",
    skip_serializing_if = "Option::is_none"
  )]
  #[schema(value_type = Option<f64>)]
  pub y: Option<Value>,
}

impl SeriesPoint {
  pub fn new(ds: impl Into<String>, y: f64) -> Self {
    Self {
      ds: Some(ds.into()),
      y: Some(Value::from(y)),
    }
  }
}

// Keeps an explicit `null` distinguishable from an absent key.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
  Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastPoint {
  /// `YYYY-MM-DD`
  pub ds: String,
  pub y: f64,
}

/// Stateless forecaster; every call fits from scratch.
#[derive(Debug, Default)]
pub struct ForecastEngine;

impl ForecastEngine {
  #[must_use]
  pub const fn new() -> Self {
    Self
  }

  /// Forecast `horizon` days past the last observation. A zero horizon
  /// yields an empty forecast; a negative one is an error.
  pub fn predict(
    &self,
    series: &[SeriesPoint],
    horizon: i64,
  ) -> Result<Vec<ForecastPoint>, AppError> {
    let aligned = prepare(series)?;
    if horizon < 0 {
      return Err(anyhow!("horizon must not be negative, got {horizon}").into());
    }

    let days = u64::try_from(horizon)?;
    if aligned.last_date().checked_add_days(Days::new(days)).is_none() {
      return Err(anyhow!("horizon of {horizon} days runs past the last representable date").into());
    }
    let horizon = usize::try_from(days)?;

    let values = if aligned.len() < MIN_MODEL_POINTS {
      tracing::debug!(points = aligned.len(), horizon, "naive persistence forecast");
      vec![aligned.last_value(); horizon]
    } else {
      tracing::debug!(points = aligned.len(), horizon, "lag forest forecast");
      if aligned.values()[0].is_nan() {
        return Err(
          anyhow!(
            "series has no value on its first date {}; the lag model needs a complete history",
            aligned.start()
          )
          .into(),
        );
      }
      Self::forecast_with_forest(aligned.values(), horizon)?
    };

    Ok(label(&aligned, values))
  }

  fn forecast_with_forest(values: &[f64], horizon: usize) -> Result<Vec<f64>, AppError> {
    let (train, holdout) = LagDataset::from_values(values, N_LAGS).split(HOLDOUT_FRACTION, SEED);
    if train.is_empty() {
      return Err(
        anyhow!(
          "series of {} points is too short for a {N_LAGS}-day lag window",
          values.len()
        )
        .into(),
      );
    }

    let forest = LagForest::fit(&train, SEED)?;

    // informational only, never used to accept or reject the model
    if !holdout.is_empty() {
      let preds = forest.predict(&holdout.features)?;
      #[allow(clippy::cast_precision_loss)]
      let mae = preds
        .iter()
        .zip(&holdout.targets)
        .map(|(p, y)| (p - y).abs())
        .sum::<f64>()
        / holdout.len() as f64;
      tracing::debug!(train = train.len(), holdout = holdout.len(), mae, "holdout score");
    }

    let mut window = values[values.len() - N_LAGS..].to_vec();
    let mut out = Vec::with_capacity(horizon);
    for _ in 0..horizon {
      let next = forest.predict_one(&window)?;
      out.push(next);
      window.remove(0);
      window.push(next);
    }

    Ok(out)
  }
}

// `predict` checks that every forecast date is representable
fn label(aligned: &AlignedSeries, values: Vec<f64>) -> Vec<ForecastPoint> {
  aligned
    .last_date()
    .iter_days()
    .skip(1)
    .zip(values)
    .map(|(date, y)| ForecastPoint {
      ds: date.format("%Y-%m-%d").to_string(),
      y,
    })
    .collect()
}
