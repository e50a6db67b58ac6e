use serde::{Deserialize, Serialize};

/// Rate-limit window settings, per client identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_ms: 60_000,
        }
    }
}

/// Bounded retry for a single provider attempt. Only transient and quota
/// failures are retried.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Decoded image size ceiling; larger payloads are rejected before the
    /// pipeline runs.
    pub max_image_bytes: usize,
    pub cache_capacity: usize,
    pub cache_ttl_secs: u64,
    pub rate_limit: RateLimitConfig,
    pub daily_quota: u32,
    pub retry: RetryConfig,
    pub sweep_interval_secs: u64,
    /// How many top labels are embedded into interpreter prompts.
    pub prompt_label_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 4 * 1024 * 1024,
            cache_capacity: 100,
            cache_ttl_secs: 3_600,
            rate_limit: RateLimitConfig::default(),
            daily_quota: 1_000,
            retry: RetryConfig::default(),
            sweep_interval_secs: 60,
            prompt_label_count: 10,
        }
    }
}
