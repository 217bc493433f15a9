mod qa;
pub use qa::{APOLOGY, FOLLOWUP_QUESTION, FORECAST_PROMPT, KNOWLEDGE_BASE};
pub use qa::{HostedLlm, KnowledgeBase, QaEngine, SemanticSearch, Strategy};

mod forecast;
pub use forecast::{AlignedSeries, ForecastEngine, ForecastPoint, SeriesPoint, prepare};
pub use forecast::{DEFAULT_HORIZON, N_LAGS};
