use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use dashmap::DashMap;
use docdrift::{CompareMetrics, CompareStats, DocdriftConfig, MatchError, Pipeline};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::{Duration, Instant};

const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Rate limit tracking: API key -> (count, window_start)
    pub rate_limiter: Arc<DashMap<String, (u32, Instant)>>,

    /// Comparison pipeline (shared across requests)
    pub pipeline: Arc<Pipeline>,

    /// Renders `/metrics`; `None` when no recorder is installed.
    pub metrics_handle: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state with the given pipeline configuration.
    pub fn new(config: ServerConfig, pipeline_config: DocdriftConfig) -> ServerResult<Self> {
        let pipeline = Pipeline::new(pipeline_config)
            .map_err(|e| ServerError::Config(e.to_string()))?
            .with_metrics(Arc::new(PrometheusCompareMetrics));

        Ok(Self {
            config: Arc::new(config),
            rate_limiter: Arc::new(DashMap::new()),
            pipeline: Arc::new(pipeline),
            metrics_handle: None,
        })
    }

    /// Loads the pipeline configuration named by `config.pipeline_config`,
    /// falling back to defaults.
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let pipeline_config = match &config.pipeline_config {
            Some(path) => DocdriftConfig::from_file(path)?,
            None => DocdriftConfig::default(),
        };
        Self::new(config, pipeline_config)
    }

    pub fn with_metrics_handle(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Check if API key is valid
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        self.config.api_keys.contains(key)
    }

    /// Fixed-window rate limit per API key.
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let now = Instant::now();
        let limit = self.config.rate_limit_per_minute;

        let mut entry = self.rate_limiter.entry(key.to_string()).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        if now.duration_since(*window_start) > RATE_LIMIT_WINDOW {
            *count = 0;
            *window_start = now;
        }

        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }
}

/// Forwards comparison outcomes to the `metrics` facade.
pub struct PrometheusCompareMetrics;

impl CompareMetrics for PrometheusCompareMetrics {
    fn record_comparison(&self, stats: &CompareStats) {
        counter!("docdrift_comparisons_total").increment(1);
        counter!("docdrift_sentences_total", "status" => "match").increment(stats.matches as u64);
        counter!("docdrift_sentences_total", "status" => "paraphrase")
            .increment(stats.paraphrases as u64);
        counter!("docdrift_sentences_total", "status" => "unique").increment(stats.unique as u64);
        counter!("docdrift_potential_hallucinations_total")
            .increment(stats.potential_hallucinations as u64);
        histogram!("docdrift_compare_seconds", "stage" => "embed")
            .record(stats.embed_latency.as_secs_f64());
        histogram!("docdrift_compare_seconds", "stage" => "align")
            .record(stats.align_latency.as_secs_f64());
        histogram!("docdrift_compare_seconds", "stage" => "total")
            .record(stats.total_latency.as_secs_f64());
    }

    fn record_failure(&self, err: &MatchError) {
        counter!("docdrift_comparison_failures_total", "kind" => failure_kind(err)).increment(1);
    }
}

fn failure_kind(err: &MatchError) -> &'static str {
    match err {
        MatchError::InvalidConfig(_) => "invalid_config",
        MatchError::InvalidRequest(_) => "invalid_request",
        MatchError::ExtractionEmpty { .. } => "extraction_empty",
        MatchError::Embedding(_) => "embedding",
    }
}
