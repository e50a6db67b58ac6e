use crate::error::{Result, VisionError};
use crate::image::ImagePayload;
use crate::providers::adapter::VisionProvider;
use crate::retry::retry_with_backoff;
use recyclens_core::{DetectionBundle, RetryConfig};

/// Priority-ordered fallback chain over vision providers. The first provider
/// to produce a non-empty bundle wins and lower-priority providers are never
/// called for that request.
pub struct VisionChain {
    providers: Vec<Box<dyn VisionProvider>>,
    retry: RetryConfig,
}

impl VisionChain {
    pub fn new(retry: RetryConfig) -> Self {
        Self {
            providers: Vec::new(),
            retry,
        }
    }

    pub fn with_provider(mut self, provider: Box<dyn VisionProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn push(&mut self, provider: Box<dyn VisionProvider>) {
        self.providers.push(provider);
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn configured_provider_names(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .filter(|p| p.is_configured())
            .map(|p| p.name())
            .collect()
    }

    pub fn is_configured(&self) -> bool {
        self.providers.iter().any(|p| p.is_configured())
    }

    /// Try each provider in order. Unconfigured providers are skipped,
    /// failures and empty bundles fall through to the next provider, and
    /// exhaustion reports every provider that was attempted.
    pub async fn analyze(&self, image: &ImagePayload) -> Result<DetectionBundle> {
        let mut attempted: Vec<String> = Vec::new();

        for provider in &self.providers {
            if !provider.is_configured() {
                tracing::debug!("skipping unconfigured vision provider {}", provider.name());
                attempted.push(format!("{} (unconfigured)", provider.name()));
                continue;
            }

            attempted.push(provider.name().to_string());
            match retry_with_backoff(&self.retry, || provider.analyze(image)).await {
                Ok(bundle) if !bundle.is_empty() => {
                    tracing::info!(provider = provider.name(), "vision provider served request");
                    return Ok(bundle);
                }
                Ok(_) => {
                    tracing::warn!(
                        provider = provider.name(),
                        "provider returned empty bundle, falling back"
                    );
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "provider failed, falling back");
                }
            }
        }

        let names = if attempted.is_empty() {
            "no providers registered".to_string()
        } else {
            attempted.join(", ")
        };
        Err(VisionError::AllProvidersExhausted(names))
    }
}
