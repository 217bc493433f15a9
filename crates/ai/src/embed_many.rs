use anyhow::anyhow;
use async_openai::types::embeddings::CreateEmbeddingRequestArgs;
use qaforecast_shared::AppError;

use crate::AiClient;

/// Embed multiple texts in a single API call.
///
/// Returns one vector per input, in the same order.
pub async fn embed_many(
  client: &AiClient,
  model: &str,
  inputs: &[String],
) -> Result<Vec<Vec<f32>>, AppError> {
  if inputs.is_empty() {
    return Ok(vec![]);
  }

  let request = CreateEmbeddingRequestArgs::default()
    .model(model)
    .input(inputs.to_vec())
    .build()?;

  let response = client.embeddings().create(request).await?;

  // Sort by index to ensure ordering matches input
  let mut data = response.data;
  data.sort_by_key(|e| e.index);

  if data.len() != inputs.len() {
    return Err(
      anyhow!(
        "embedding count mismatch: expected {}, got {}",
        inputs.len(),
        data.len()
      )
      .into(),
    );
  }

  Ok(data.into_iter().map(|e| e.embedding).collect())
}
