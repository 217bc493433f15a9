use anyhow::anyhow;
use qaforecast_shared::AppError;

use crate::{AiClient, embed_many};

pub async fn embed(client: &AiClient, model: &str, input: &str) -> Result<Vec<f32>, AppError> {
  embed_many(client, model, &[input.to_owned()])
    .await?
    .pop()
    .ok_or_else(|| anyhow!("empty embedding").into())
}
