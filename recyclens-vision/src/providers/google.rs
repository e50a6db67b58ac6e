use crate::error::{Result, VisionError};
use crate::image::ImagePayload;
use crate::normalize::{normalize, normalize_objects, RawLabel};
use crate::providers::adapter::VisionProvider;
use async_trait::async_trait;
use parking_lot::RwLock;
use recyclens_core::DetectionBundle;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

const MIN_ANNOTATION_SCORE: f64 = 0.5;

/// Google Cloud Vision adapter: label detection, object localization, OCR
/// and web detection in one annotate call.
pub struct GoogleVisionProvider {
    api_key: Arc<RwLock<Option<String>>>,
    client: Client,
    base_url: String,
}

impl GoogleVisionProvider {
    pub fn new() -> Self {
        Self {
            api_key: Arc::new(RwLock::new(None)),
            client: Client::new(),
            base_url: "https://vision.googleapis.com/v1".to_string(),
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
            .ok_or_else(|| VisionError::Unconfigured("google".to_string()))
    }
}

impl Default for GoogleVisionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionProvider for GoogleVisionProvider {
    fn name(&self) -> &'static str {
        "google"
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
            "requests": [{
                "image": { "content": image.base64() },
                "features": [
                    { "type": "LABEL_DETECTION", "maxResults": 20 },
                    { "type": "OBJECT_LOCALIZATION", "maxResults": 10 },
                    { "type": "TEXT_DETECTION", "maxResults": 50 },
                    { "type": "WEB_DETECTION", "maxResults": 10 }
                ]
            }]
        });

        let url = format!("{}/images:annotate?key={}", self.base_url, api_key);
        let response = self
            .client
            .post(&url)
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
        let result = payload
            .get("responses")
            .and_then(|r| r.get(0))
            .cloned()
            .unwrap_or_default();

        let labels = normalize(extract_annotations(&result, "labelAnnotations", "description"));
        let objects =
            normalize_objects(extract_annotations(&result, "localizedObjectAnnotations", "name"));
        let web_entities = result
            .pointer("/webDetection/webEntities")
            .and_then(|v| v.as_array())
            .map(|entities| {
                normalize(
                    entities
                        .iter()
                        .filter(|e| {
                            e.get("score").and_then(|s| s.as_f64()).unwrap_or(0.0)
                                > MIN_ANNOTATION_SCORE
                        })
                        .map(value_to_annotation)
                        .collect(),
                )
            })
            .unwrap_or_default();

        // First text annotation is the full OCR block; split into words.
        let ocr_texts = result
            .pointer("/textAnnotations/0/description")
            .and_then(|v| v.as_str())
            .map(|full| {
                full.split_whitespace()
                    .filter(|w| w.len() > 2)
                    .take(50)
                    .map(|w| w.to_string())
                    .collect()
            })
            .unwrap_or_default();

        let bundle = DetectionBundle {
            labels,
            objects,
            ocr_texts,
            web_entities,
            provider_used: self.name().to_string(),
            error: None,
        };

        if bundle.is_empty() {
            return Err(VisionError::EmptyResult(self.name().to_string()));
        }
        Ok(bundle)
    }
}

fn value_to_annotation(v: &serde_json::Value) -> RawLabel {
    RawLabel::annotation(
        v.get("description")
            .or_else(|| v.get("name"))
            .and_then(|d| d.as_str())
            .map(|d| d.to_string()),
        v.get("score").and_then(|s| s.as_f64()).map(|s| s as f32),
    )
}

fn extract_annotations(result: &serde_json::Value, field: &str, text_key: &str) -> Vec<RawLabel> {
    result
        .get(field)
        .and_then(|v| v.as_array())
        .map(|annotations| {
            annotations
                .iter()
                .filter(|a| {
                    a.get("score").and_then(|s| s.as_f64()).unwrap_or(0.0) > MIN_ANNOTATION_SCORE
                })
                .map(|a| {
                    RawLabel::annotation(
                        a.get(text_key).and_then(|d| d.as_str()).map(|d| d.to_string()),
                        a.get("score").and_then(|s| s.as_f64()).map(|s| s as f32),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
