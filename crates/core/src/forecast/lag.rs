use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Supervised examples: each row holds the `n_lags` values preceding its target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LagDataset {
  pub features: Vec<Vec<f64>>,
  pub targets: Vec<f64>,
}

impl LagDataset {
  #[must_use]
  pub fn from_values(values: &[f64], n_lags: usize) -> Self {
    let (features, targets) = values
      .windows(n_lags + 1)
      .map(|w| (w[..n_lags].to_vec(), w[n_lags]))
      .unzip();

    Self { features, targets }
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.targets.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.targets.is_empty()
  }

  /// Shuffled train/holdout split. The holdout takes `ceil(len * test_fraction)`
  /// examples.
  #[must_use]
  pub fn split(self, test_fraction: f64, seed: u64) -> (Self, Self) {
    #[allow(
      clippy::cast_possible_truncation,
      clippy::cast_precision_loss,
      clippy::cast_sign_loss
    )]
    let n_test = ((self.len() as f64) * test_fraction).ceil() as usize;

    let mut order: Vec<usize> = (0..self.len()).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));

    let pick = |idx: &[usize]| Self {
      features: idx.iter().map(|&i| self.features[i].clone()).collect(),
      targets: idx.iter().map(|&i| self.targets[i]).collect(),
    };

    let (test_idx, train_idx) = order.split_at(n_test.min(order.len()));
    (pick(train_idx), pick(test_idx))
  }
}
