pub mod cache;
pub mod limiter;
pub mod matcher;
pub mod pipeline;
pub mod response;

#[cfg(test)]
mod matcher_tests;

pub use cache::{fingerprint, CacheStats, ResultCache};
pub use limiter::{DailyQuota, DailyQuotaDecision, RateLimitDecision, RateLimiter};
pub use matcher::{alternative_disposal, unidentified_objects, unknown_item, MatchEngine};
pub use pipeline::{HealthSnapshot, IdentifyService};
pub use response::detect_material;
