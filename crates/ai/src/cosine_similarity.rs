/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in [-1.0, 1.0] where 1.0 means identical direction.
/// Mismatched or degenerate inputs score 0.0.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
  if a.is_empty() || a.len() != b.len() {
    return 0.0;
  }

  let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
    (0.0_f64, 0.0_f64, 0.0_f64),
    |(dot, na, nb), (&x, &y)| {
      let (x, y) = (f64::from(x), f64::from(y));
      (x.mul_add(y, dot), x.mul_add(x, na), y.mul_add(y, nb))
    },
  );

  let denom = norm_a.sqrt() * norm_b.sqrt();
  if denom < 1e-12 {
    return 0.0;
  }

  #[allow(clippy::cast_possible_truncation)]
  let sim = (dot / denom) as f32;
  sim
}

#[cfg(test)]
mod tests {
  use super::cosine_similarity;

  #[test]
  fn identical_vectors() {
    let v = [0.3, -1.2, 4.0];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
  }

  #[test]
  fn orthogonal_and_opposite() {
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
  }

  #[test]
  fn degenerate_inputs_score_zero() {
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
    assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
  }
}
