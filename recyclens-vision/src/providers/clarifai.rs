use crate::error::{Result, VisionError};
use crate::image::ImagePayload;
use crate::normalize::{normalize, RawLabel};
use crate::providers::adapter::VisionProvider;
use async_trait::async_trait;
use parking_lot::RwLock;
use recyclens_core::DetectionBundle;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

const GENERAL_MODEL_ID: &str = "general-image-recognition";
const GENERAL_MODEL_VERSION: &str = "aa7f35c01e0642fda5cf400f543e7c40";

/// Clarifai adapter: the general recognition model returns flat
/// `{name, value}` concepts, no objects or OCR.
pub struct ClarifaiProvider {
    api_key: Arc<RwLock<Option<String>>>,
    client: Client,
    base_url: String,
}

impl ClarifaiProvider {
    pub fn new() -> Self {
        Self {
            api_key: Arc::new(RwLock::new(None)),
            client: Client::new(),
            base_url: "https://api.clarifai.com/v2".to_string(),
        }
    }

    pub fn with_api_key(api_key: String) -> Self {
        let mut provider = Self::new();
        provider.set_api_key(api_key);
        provider
    }

    fn get_api_key(&self) -> Result<String> {
        self.api_key
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| VisionError::Unconfigured("clarifai".to_string()))
    }
}

impl Default for ClarifaiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionProvider for ClarifaiProvider {
    fn name(&self) -> &'static str {
        "clarifai"
    }

    fn is_configured(&self) -> bool {
        self.api_key.read().is_some()
    }

    fn set_api_key(&mut self, key: String) {
        *self.api_key.write() = Some(key);
    }

    async fn analyze(&self, image: &ImagePayload) -> Result<DetectionBundle> {
        let api_key = self.get_api_key()?;

        let body = json!({
            "inputs": [{
                "data": {
                    "image": { "base64": image.base64() }
                }
            }]
        });

        let url = format!(
            "{}/models/{}/versions/{}/outputs",
            self.base_url, GENERAL_MODEL_ID, GENERAL_MODEL_VERSION
        );
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Key {}", api_key))
            .header("Content-Type", "application/json")
            .timeout(std::time::Duration::from_secs(30))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(VisionError::QuotaExceeded);
        }
        if status == 401 || status == 403 {
            return Err(VisionError::Unauthorized);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VisionError::Transient(format!("HTTP {}: {}", status, text)));
        }

        let payload: serde_json::Value = response.json().await?;
        let concepts = payload
            .pointer("/outputs/0/data/concepts")
            .and_then(|v| v.as_array())
            .map(|concepts| {
                concepts
                    .iter()
                    .map(|c| {
                        RawLabel::concept(
                            c.get("name").and_then(|n| n.as_str()).map(|n| n.to_string()),
                            c.get("value").and_then(|val| val.as_f64()).map(|val| val as f32),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        let bundle = DetectionBundle {
            labels: normalize(concepts),
            provider_used: self.name().to_string(),
            ..Default::default()
        };

        if bundle.is_empty() {
            return Err(VisionError::EmptyResult(self.name().to_string()));
        }
        Ok(bundle)
    }
}
