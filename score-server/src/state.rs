use crate::config::Config;
use blind_score::protocol::Aggregator;
use std::sync::Arc;

/// Shared application state. Everything in here is read-only after start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub aggregator: Aggregator,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        if config.questions.is_empty() {
            anyhow::bail!("at least one interview question must be configured");
        }
        let aggregator = Aggregator::try_with(config.max_weight)
            .map_err(|e| anyhow::anyhow!("invalid max_weight: {e}"))?;

        tracing::info!(
            "{} questions loaded, weights accepted in 1..={}",
            config.questions.len(),
            aggregator.max_weight()
        );

        Ok(Self {
            config: Arc::new(config.clone()),
            aggregator,
        })
    }
}
