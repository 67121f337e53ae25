use std::sync::Arc;
use std::time::Instant;

use crate::abstractive::{AbstractiveModel, GenerationParams, InferenceModel};
use crate::cache::SummaryCache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extractive::LexRank;
use crate::model::{Method, SummarizationRequest, SummarizationResult};
use crate::rouge;
use crate::text::normalize_whitespace;

/// Routes validated requests to the right engine, with caching and evaluation.
pub struct Summarizer {
    config: Arc<Config>,
    lexrank: LexRank,
    model: Arc<dyn AbstractiveModel>,
    cache: SummaryCache,
}

impl Summarizer {
    pub fn new(config: Arc<Config>, model: Arc<dyn AbstractiveModel>) -> Self {
        let cache = SummaryCache::new(config.enable_cache, config.cache_expiry, config.cache_max_entries);
        Self {
            config,
            lexrank: LexRank::default(),
            model,
            cache,
        }
    }

    /// Build with the configured inference endpoint as the abstractive model.
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let model = InferenceModel::from_config(&config)?;
        tracing::info!(
            model = %config.model_name,
            endpoint = %model.endpoint(),
            device = %config.device,
            "abstractive model configured"
        );
        Ok(Self::new(config, Arc::new(model)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    /// Summarize a validated request and, if a non-blank reference is
    /// given, score the summary against it.
    pub async fn summarize(
        &self,
        request: &SummarizationRequest,
        reference: Option<&str>,
    ) -> Result<SummarizationResult> {
        let start = Instant::now();

        let (summary, cached) = match self.cache.get(request) {
            Some(summary) => (summary, true),
            None => {
                let summary = self.run_engine(request).await?;
                self.cache.insert(request, &summary);
                (summary, false)
            }
        };

        let scores = reference
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| rouge::score(r, &summary));

        tracing::info!(
            method = %request.method,
            limit = request.limit,
            input_chars = request.text.chars().count(),
            summary_chars = summary.chars().count(),
            cached,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "summarization complete"
        );

        Ok(SummarizationResult {
            summary,
            method: request.method,
            cached,
            scores,
        })
    }

    async fn run_engine(&self, request: &SummarizationRequest) -> Result<String> {
        let raw = match request.method {
            Method::Extractive => {
                // CPU-bound; off the async workers so the request timeout can fire
                let lexrank = self.lexrank.clone();
                let text = request.text.clone();
                let limit = request.limit;
                tokio::task::spawn_blocking(move || lexrank.summarize(&text, limit))
                    .await
                    .map_err(|e| AppError::Model(format!("extractive engine failed: {}", e)))?
            }
            Method::Abstractive => {
                let params = GenerationParams::new(request.limit, self.config.abstractive_min_length);
                self.model.generate(&request.text, params).await.map_err(|e| {
                    tracing::error!(model = %self.model.name(), error = %e, "abstractive generation failed");
                    e
                })?
            }
        };

        let summary = normalize_whitespace(&raw);
        if summary.is_empty() {
            return Err(AppError::Model(format!("{} summarization produced no output", request.method)));
        }
        Ok(summary)
    }
}
