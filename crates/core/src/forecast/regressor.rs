use anyhow::anyhow;
use qaforecast_shared::AppError;
use smartcore::{
  ensemble::random_forest_regressor::{RandomForestRegressor, RandomForestRegressorParameters},
  linalg::basic::matrix::DenseMatrix,
};

use super::lag::LagDataset;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Random forest over lag windows: 200 trees, every feature considered at
/// each split.
pub struct LagForest {
  model: Forest,
}

impl LagForest {
  pub fn fit(data: &LagDataset, seed: u64) -> Result<Self, AppError> {
    let n_features = data.features.first().map_or(0, Vec::len);
    let x = matrix(&data.features)?;

    let params = RandomForestRegressorParameters::default()
      .with_n_trees(200)
      .with_m(n_features)
      .with_seed(seed);

    let model = Forest::fit(&x, &data.targets, params)
      .map_err(|e| anyhow!("random forest fit failed: {e}"))?;

    Ok(Self { model })
  }

  pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, AppError> {
    let x = matrix(rows)?;
    self
      .model
      .predict(&x)
      .map_err(|e| anyhow!("random forest predict failed: {e}").into())
  }

  pub fn predict_one(&self, window: &[f64]) -> Result<f64, AppError> {
    self
      .predict(&[window.to_vec()])?
      .first()
      .copied()
      .ok_or_else(|| anyhow!("random forest returned no prediction").into())
  }
}

fn matrix(rows: &[Vec<f64>]) -> Result<DenseMatrix<f64>, AppError> {
  DenseMatrix::from_2d_vec(&rows.to_vec()).map_err(|e| anyhow!("invalid feature matrix: {e}").into())
}
