use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use qaforecast_shared::AppError;
use serde_json::Value;

use super::SeriesPoint;

/// A series on a contiguous daily calendar. Days before the first
/// observation hold `NaN`; every later day has a value.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
  start: NaiveDate,
  values: Vec<f64>,
}

impl AlignedSeries {
  #[must_use]
  pub const fn start(&self) -> NaiveDate {
    self.start
  }

  #[must_use]
  pub fn values(&self) -> &[f64] {
    &self.values
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.values.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Never empty once built by [`prepare`].
  #[must_use]
  pub fn last_value(&self) -> f64 {
    self.values.last().copied().unwrap_or(f64::NAN)
  }

  #[must_use]
  pub fn last_date(&self) -> NaiveDate {
    self
      .start
      .iter_days()
      .nth(self.values.len().saturating_sub(1))
      .unwrap_or(self.start)
  }

  /// Back to request points, one per day.
  #[must_use]
  pub fn to_points(&self) -> Vec<SeriesPoint> {
    self
      .start
      .iter_days()
      .zip(&self.values)
      .map(|(date, &y)| SeriesPoint::new(date.format("%Y-%m-%d").to_string(), y))
      .collect()
  }
}

/// Parse, sort and reindex onto a daily grid, then linearly interpolate.
///
/// Trailing gaps repeat the last observation. Leading gaps stay `NaN`.
pub fn prepare(series: &[SeriesPoint]) -> Result<AlignedSeries, AppError> {
  let has_ds = series.iter().any(|p| p.ds.is_some());
  let has_y = series.iter().any(|p| p.y.is_some());
  if !has_ds || !has_y {
    return Err(anyhow!("Series must contain 'ds' and 'y' columns").into());
  }

  let mut observed = series
    .iter()
    .map(|p| -> Result<_, AppError> {
      let ds = p
        .ds
        .as_deref()
        .ok_or_else(|| anyhow!("series point is missing 'ds'"))?;
      Ok((parse_date(ds)?, coerce_value(p.y.as_ref())?))
    })
    .collect::<Result<Vec<_>, AppError>>()?;
  observed.sort_by_key(|(date, _)| *date);

  if let Some(pair) = observed.windows(2).find(|w| w[0].0 == w[1].0) {
    return Err(anyhow!("duplicate date in series: {}", pair[0].0).into());
  }

  // `observed` is non-empty: has_ds implies at least one point
  let start = observed[0].0;
  let end = observed[observed.len() - 1].0;
  let days = usize::try_from((end - start).num_days())? + 1;

  let mut grid = vec![None; days];
  for (date, value) in observed {
    let offset = usize::try_from((date - start).num_days())?;
    grid[offset] = value;
  }

  Ok(AlignedSeries {
    start,
    values: interpolate(&grid)?,
  })
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
  let raw = raw.trim();
  if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    return Ok(date);
  }
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(dt.date_naive());
  }
  NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
    .map(|dt| dt.date())
    .map_err(|_| anyhow!("could not parse date: '{raw}'").into())
}

/// `None` marks a gap to be interpolated.
fn coerce_value(value: Option<&Value>) -> Result<Option<f64>, AppError> {
  let v = match value {
    None | Some(Value::Null) => return Ok(None),
    Some(Value::Number(n)) => n
      .as_f64()
      .ok_or_else(|| anyhow!("could not convert {n} to float"))?,
    Some(Value::Bool(b)) => f64::from(u8::from(*b)),
    Some(Value::String(s)) => s
      .trim()
      .parse::<f64>()
      .map_err(|_| anyhow!("could not convert string to float: '{s}'"))?,
    Some(other) => return Err(anyhow!("could not convert {other} to float").into()),
  };

  Ok((!v.is_nan()).then_some(v))
}

fn interpolate(grid: &[Option<f64>]) -> Result<Vec<f64>, AppError> {
  let Some((first_idx, first)) = grid
    .iter()
    .enumerate()
    .find_map(|(i, cell)| cell.map(|v| (i, v)))
  else {
    return Err(anyhow!("series has no observed values").into());
  };

  let mut values = Vec::with_capacity(grid.len());
  values.resize(first_idx, f64::NAN);
  values.push(first);
  let (mut last_idx, mut last_val) = (first_idx, first);

  for (i, cell) in grid.iter().enumerate().skip(first_idx + 1) {
    let Some(v) = *cell else { continue };

    #[allow(clippy::cast_precision_loss)]
    let span = (i - last_idx) as f64;
    for k in (last_idx + 1)..i {
      #[allow(clippy::cast_precision_loss)]
      let step = (k - last_idx) as f64;
      values.push(last_val + (v - last_val) * step / span);
    }
    values.push(v);
    (last_idx, last_val) = (i, v);
  }

  values.resize(grid.len(), last_val);
  Ok(values)
}
