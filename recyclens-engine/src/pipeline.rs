use crate::cache::{fingerprint, ResultCache};
use crate::limiter::{DailyQuota, RateLimiter};
use crate::matcher::{unidentified_objects, unknown_item, MatchEngine};
use crate::response;
use recyclens_core::{Catalog, EngineConfig, Error, IdentifyResponse, Result};
use recyclens_interpret::InterpretChain;
use recyclens_vision::{ImagePayload, VisionChain, VisionError};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub status: &'static str,
    pub vision_providers: Vec<&'static str>,
    pub configured_vision_providers: Vec<&'static str>,
    pub interpreters: Vec<&'static str>,
    pub configured_interpreters: Vec<&'static str>,
    pub cache_size: usize,
    pub cache_capacity: usize,
    pub rate_limited_clients: usize,
    pub daily_tracked_clients: usize,
}

/// The identification pipeline: validation, limits, cache, vision fallback,
/// catalog matching, interpretation, response assembly. Constructed once at
/// startup and shared across requests.
pub struct IdentifyService {
    config: EngineConfig,
    catalog: Catalog,
    engine: MatchEngine,
    vision: VisionChain,
    interpret: InterpretChain,
    cache: ResultCache,
    rate_limiter: RateLimiter,
    daily_quota: DailyQuota,
}

impl IdentifyService {
    pub fn new(
        config: EngineConfig,
        catalog: Catalog,
        vision: VisionChain,
        interpret: InterpretChain,
    ) -> Self {
        let cache = ResultCache::new(config.cache_capacity, config.cache_ttl_secs);
        let rate_limiter = RateLimiter::new(config.rate_limit);
        let daily_quota = DailyQuota::new(config.daily_quota);
        Self {
            config,
            catalog,
            engine: MatchEngine::new(),
            vision,
            interpret,
            cache,
            rate_limiter,
            daily_quota,
        }
    }

    /// Run one identification request end to end. Limit violations and
    /// invalid images surface as errors; an exhausted vision chain surfaces
    /// as a structured could-not-identify response.
    pub async fn identify(&self, client_id: &str, image: &str) -> Result<IdentifyResponse> {
        let start = Instant::now();

        let payload = ImagePayload::new(image);
        payload
            .validate(self.config.max_image_bytes)
            .map_err(|e| match e {
                VisionError::InvalidImage(msg) => Error::InvalidImage(msg),
                other => Error::InvalidImage(other.to_string()),
            })?;

        let rate = self.rate_limiter.check(client_id);
        if !rate.allowed {
            return Err(Error::RateLimitExceeded {
                remaining: rate.remaining,
                reset_at: rate.reset_time,
            });
        }

        let daily = self.daily_quota.check(client_id);
        if !daily.allowed {
            return Err(Error::DailyQuotaExceeded {
                used: daily.used,
                limit: self.daily_quota.limit(),
                reset_at: daily.reset_time,
            });
        }
        let usage = response::usage_info(&daily, self.daily_quota.limit());

        let key = fingerprint(payload.base64());
        if let Some(cached) = self.cache.get(&key) {
            info!(client_id, "serving cached identification");
            return Ok(cached);
        }

        let bundle = match self.vision.analyze(&payload).await {
            Ok(bundle) => bundle,
            Err(VisionError::AllProvidersExhausted(names)) => {
                warn!(client_id, providers = %names, "vision chain exhausted");
                return Ok(response::could_not_identify(
                    names,
                    usage,
                    start.elapsed().as_millis() as u64,
                ));
            }
            Err(other) => {
                warn!(client_id, error = %other, "vision step failed");
                return Ok(response::could_not_identify(
                    "none".to_string(),
                    usage,
                    start.elapsed().as_millis() as u64,
                ));
            }
        };

        let mut matches = self.engine.find_matches(&bundle, &self.catalog);
        if matches.is_empty() {
            matches.push(unknown_item());
        }
        let unidentified = unidentified_objects(&bundle, &matches);

        let prompt_labels: Vec<_> = bundle
            .labels
            .iter()
            .take(self.config.prompt_label_count)
            .cloned()
            .collect();
        let (interpretation, interpreter_name) = self.interpret.interpret(&prompt_labels).await;

        let result = response::assemble(
            &bundle,
            matches,
            unidentified,
            interpretation,
            interpreter_name,
            usage,
            start.elapsed().as_millis() as u64,
        );

        self.cache.set(&key, result.clone());
        Ok(result)
    }

    pub fn health(&self) -> HealthSnapshot {
        let cache = self.cache.stats();
        HealthSnapshot {
            status: "healthy",
            vision_providers: self.vision.provider_names(),
            configured_vision_providers: self.vision.configured_provider_names(),
            interpreters: self.interpret.interpreter_names(),
            configured_interpreters: self.interpret.configured_interpreter_names(),
            cache_size: cache.size,
            cache_capacity: cache.capacity,
            rate_limited_clients: self.rate_limiter.active_clients(),
            daily_tracked_clients: self.daily_quota.active_clients(),
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Periodic purge of expired rate-limit windows and stale daily
    /// counters, keeping memory bounded under client churn.
    pub fn spawn_sweeper(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let period = Duration::from_secs(self.config.sweep_interval_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.rate_limiter.sweep();
                self.daily_quota.sweep();
            }
        })
    }
}
