use crate::error::Result;
use crate::image::ImagePayload;
use async_trait::async_trait;
use recyclens_core::DetectionBundle;

#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider identity, stamped on every bundle it serves.
    fn name(&self) -> &'static str;

    /// Whether credentials are present. Unconfigured providers are skipped
    /// by the fallback chain.
    fn is_configured(&self) -> bool;

    /// Set API credentials.
    fn set_api_key(&mut self, key: String);

    /// Analyze one image into a normalized bundle. Raw provider confidences
    /// pass through unchanged; any rescaling belongs to the normalizer.
    async fn analyze(&self, image: &ImagePayload) -> Result<DetectionBundle>;
}
