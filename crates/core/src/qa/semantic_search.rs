use std::fmt;

use anyhow::anyhow;
use qaforecast_ai::{AiClient, cosine_similarity, embed, embed_many};
use qaforecast_shared::{AppError, Reply};

use super::FOLLOWUP_QUESTION;

pub const KNOWLEDGE_BASE: [&str; 4] = [
  "This agent can forecast time series and answer questions.",
  "Upload a CSV of date,value to use forecasting.",
  "For forecasting we recommend using scikit-learn or statsmodels.",
  "You can set horizon (days) when asking for predictions.",
];

const TOP_K: usize = 2;

const FOLLOWUP_KEYWORDS: [&str; 3] = ["data", "forecast", "predict"];

/// Sentences paired with their precomputed embeddings.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
  sentences: Vec<String>,
  vectors: Vec<Vec<f32>>,
}

impl KnowledgeBase {
  pub fn new(sentences: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<Self, AppError> {
    if sentences.len() != vectors.len() {
      return Err(
        anyhow!(
          "knowledge base has {} sentences but {} vectors",
          sentences.len(),
          vectors.len()
        )
        .into(),
      );
    }
    Ok(Self { sentences, vectors })
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.sentences.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.sentences.is_empty()
  }

  /// The `k` sentences most similar to `query`, best first. Ties keep
  /// knowledge-base order.
  #[must_use]
  pub fn top_k(&self, query: &[f32], k: usize) -> Vec<&str> {
    let mut scored: Vec<(usize, f32)> = self
      .vectors
      .iter()
      .map(|v| cosine_similarity(query, v))
      .enumerate()
      .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
      .into_iter()
      .take(k)
      .map(|(i, _)| self.sentences[i].as_str())
      .collect()
  }
}

/// Nearest-neighbour lookup over the fixed knowledge base.
pub struct SemanticSearch {
  client: AiClient,
  model: String,
  kb: KnowledgeBase,
}

impl SemanticSearch {
  /// Embed the knowledge base once. Fails if the embedding backend does.
  pub async fn init(client: AiClient, model: &str) -> Result<Self, AppError> {
    let sentences: Vec<String> = KNOWLEDGE_BASE.iter().map(|s| (*s).to_owned()).collect();
    let vectors = embed_many(&client, model, &sentences).await?;
    let kb = KnowledgeBase::new(sentences, vectors)?;
    tracing::info!(model, entries = kb.len(), "knowledge base embedded");

    Ok(Self {
      client,
      model: model.to_owned(),
      kb,
    })
  }

  pub async fn answer(&self, message: &str) -> Result<Reply, AppError> {
    let query = embed(&self.client, &self.model, message).await?;
    Ok(compose_reply(&self.kb.top_k(&query, TOP_K), message))
  }
}

impl fmt::Debug for SemanticSearch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SemanticSearch")
      .field("model", &self.model)
      .field("entries", &self.kb.len())
      .finish_non_exhaustive()
  }
}

fn compose_reply(snippets: &[&str], message: &str) -> Reply {
  let answer = snippets.join("\n");
  let text = message.to_lowercase();

  if FOLLOWUP_KEYWORDS.iter().any(|w| text.contains(w)) {
    Reply::question(format!("{answer}\n{FOLLOWUP_QUESTION}"))
  } else {
    Reply::answer(answer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kb() -> KnowledgeBase {
    KnowledgeBase::new(
      KNOWLEDGE_BASE.iter().map(|s| (*s).to_owned()).collect(),
      vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![0.7, 0.7, 0.0],
      ],
    )
    .unwrap()
  }

  #[test]
  fn top_k_ranks_by_similarity() {
    let kb = kb();
    let hits = kb.top_k(&[0.0, 1.0, 0.1], 2);
    assert_eq!(hits, vec![KNOWLEDGE_BASE[1], KNOWLEDGE_BASE[3]]);
  }

  #[test]
  fn top_k_is_bounded_by_kb_size() {
    let kb = kb();
    assert_eq!(kb.top_k(&[1.0, 1.0, 1.0], 10).len(), 4);
  }

  #[test]
  fn mismatched_lengths_are_rejected() {
    assert!(KnowledgeBase::new(vec!["a".to_owned()], vec![]).is_err());
  }

  #[test]
  fn reply_joins_snippets() {
    let reply = compose_reply(&["first", "second"], "what are you?");
    assert_eq!(reply, Reply::answer("first\nsecond"));
  }

  #[test]
  fn data_question_appends_followup() {
    let reply = compose_reply(&["first", "second"], "I have some DATA");
    assert!(reply.ask_followup);
    assert_eq!(
      reply.text,
      "first\nsecond\nWould you like me to run a forecast on your data?"
    );
  }
}
