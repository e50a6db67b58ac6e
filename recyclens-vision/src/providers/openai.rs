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

const ANALYSIS_PROMPT: &str = "Analyze this image and identify what objects are present. \
For recycling purposes, identify:\n\
1. The main object(s) in the image\n\
2. Material type (plastic, glass, metal, paper, organic, electronics, etc.)\n\
3. Any text visible on the object\n\
4. Brand or product information if visible\n\n\
Respond with JSON in this exact format:\n\
{\"main_objects\":[{\"name\":\"object name\",\"confidence\":0.0}],\
\"materials\":[{\"type\":\"material type\",\"confidence\":0.0}],\
\"text_found\":[\"text1\"],\"brands\":[\"brand1\"],\"recycling_relevant\":true}";

/// OpenAI vision adapter: prompts a multimodal chat model for a structured
/// object/material report and reshapes it into a detection bundle.
pub struct OpenAiVisionProvider {
    api_key: Arc<RwLock<Option<String>>>,
    client: Client,
    base_url: String,
}

impl OpenAiVisionProvider {
    pub fn new() -> Self {
        Self {
            api_key: Arc::new(RwLock::new(None)),
            client: Client::new(),
            base_url: "https://api.openai.com/v1".to_string(),
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
            .ok_or_else(|| VisionError::Unconfigured("openai".to_string()))
    }
}

impl Default for OpenAiVisionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionProvider for OpenAiVisionProvider {
    fn name(&self) -> &'static str {
        "openai"
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
            "model": "gpt-4o-mini",
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": ANALYSIS_PROMPT },
                    {
                        "type": "image_url",
                        "image_url": {
                            "url": format!("data:image/jpeg;base64,{}", image.base64()),
                            "detail": "high"
                        }
                    }
                ]
            }],
            "max_tokens": 1000,
            "temperature": 0.3
        });

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .timeout(std::time::Duration::from_secs(60))
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
        let content = payload
            .pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| VisionError::Transient("no content in response".to_string()))?;

        let analysis = extract_json_object(content)
            .ok_or_else(|| VisionError::Transient("no JSON in model reply".to_string()))?;

        let mut label_raw: Vec<RawLabel> = Vec::new();
        let mut object_raw: Vec<RawLabel> = Vec::new();
        let mut web_raw: Vec<RawLabel> = Vec::new();

        if let Some(objects) = analysis.get("main_objects").and_then(|v| v.as_array()) {
            for obj in objects {
                let name = obj.get("name").and_then(|n| n.as_str()).map(|n| n.to_string());
                let score = obj
                    .get("confidence")
                    .and_then(|c| c.as_f64())
                    .map(|c| c as f32)
                    .or(Some(0.8));
                label_raw.push(RawLabel::concept(name.clone(), score));
                object_raw.push(RawLabel::concept(name, score));
            }
        }

        if let Some(materials) = analysis.get("materials").and_then(|v| v.as_array()) {
            for material in materials {
                label_raw.push(RawLabel::concept(
                    material.get("type").and_then(|t| t.as_str()).map(|t| t.to_string()),
                    material
                        .get("confidence")
                        .and_then(|c| c.as_f64())
                        .map(|c| c as f32)
                        .or(Some(0.7)),
                ));
            }
        }

        if let Some(brands) = analysis.get("brands").and_then(|v| v.as_array()) {
            for brand in brands {
                web_raw.push(RawLabel::concept(brand.as_str().map(|b| b.to_string()), Some(0.8)));
            }
        }

        if analysis
            .get("recycling_relevant")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
        {
            label_raw.push(RawLabel::concept(
                Some("recyclable material".to_string()),
                Some(0.9),
            ));
        }

        let ocr_texts = analysis
            .get("text_found")
            .and_then(|v| v.as_array())
            .map(|texts| {
                texts
                    .iter()
                    .filter_map(|t| t.as_str())
                    .map(|t| t.to_string())
                    .collect()
            })
            .unwrap_or_default();

        let bundle = DetectionBundle {
            labels: normalize(label_raw),
            objects: normalize_objects(object_raw),
            ocr_texts,
            web_entities: normalize(web_raw),
            provider_used: self.name().to_string(),
            error: None,
        };

        if bundle.is_empty() {
            return Err(VisionError::EmptyResult(self.name().to_string()));
        }
        Ok(bundle)
    }
}

/// Model replies sometimes wrap the JSON in markdown fences; take the
/// outermost object.
fn extract_json_object(content: &str) -> Option<serde_json::Value> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&content[start..=end]).ok()
}
