use crate::error::{InterpretError, Result};
use crate::interpreter::{format_labels, Interpreter, JURISDICTION_RULES};
use async_trait::async_trait;
use parking_lot::RwLock;
use recyclens_core::{Interpretation, VisionLabel};
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

/// OpenAI chat interpreter. Asks for a strict-JSON disposal recommendation;
/// any HTTP or parse failure propagates so the chain can fall through.
pub struct OpenAiInterpreter {
    api_key: Arc<RwLock<Option<String>>>,
    client: Client,
    base_url: String,
}

impl OpenAiInterpreter {
    pub fn new() -> Self {
        Self {
            api_key: Arc::new(RwLock::new(None)),
            client: Client::new(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    pub fn with_api_key(api_key: String) -> Self {
        let provider = Self::new();
        *provider.api_key.write() = Some(api_key);
        provider
    }

    fn get_api_key(&self) -> Result<String> {
        self.api_key
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| InterpretError::MissingApiKey("openai".to_string()))
    }

    fn build_prompt(labels: &[VisionLabel]) -> String {
        format!(
            "You are a recycling expert for Terre Haute, Indiana. Based on these image \
             recognition labels, provide recycling instructions.\n\n\
             Image contains: {}\n\n\
             Respond with a JSON object containing:\n\
             - item_name: specific name of the item\n\
             - is_recyclable: true/false\n\
             - bin_color: \"Blue\" for recycling, \"Green\" for compost, \"Black\" for trash, \
             \"Special\" for hazardous\n\
             - disposal_method: brief instruction\n\
             - preparation: how to prepare item (empty string if none)\n\
             - special_instructions: only if needed (optional)\n\
             - confidence: 0.0-1.0 how confident you are\n\n\
             {}\n\n\
             Example response:\n\
             {{\"item_name\":\"Plastic Water Bottle\",\"is_recyclable\":true,\
             \"bin_color\":\"Blue\",\"disposal_method\":\"Place in recycling bin\",\
             \"preparation\":\"Rinse clean and remove cap\",\"confidence\":0.95}}",
            format_labels(labels),
            JURISDICTION_RULES
        )
    }
}

impl Default for OpenAiInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Interpreter for OpenAiInterpreter {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        self.api_key.read().is_some()
    }

    async fn interpret(&self, labels: &[VisionLabel]) -> Result<Interpretation> {
        let api_key = self.get_api_key()?;

        let body = json!({
            "model": "gpt-4o-mini",
            "messages": [
                {
                    "role": "system",
                    "content": "You are a recycling expert. Always respond with valid JSON only, no additional text."
                },
                {
                    "role": "user",
                    "content": Self::build_prompt(labels)
                }
            ],
            "temperature": 0.3,
            "max_tokens": 200,
            "response_format": { "type": "json_object" }
        });

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .timeout(std::time::Duration::from_secs(30))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(InterpretError::Http(format!("HTTP {}: {}", status, text)));
        }

        let payload: serde_json::Value = response.json().await?;
        let content = payload
            .pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| InterpretError::Parse("no content in response".to_string()))?;

        serde_json::from_str(content)
            .map_err(|e| InterpretError::Parse(format!("invalid interpretation JSON: {}", e)))
    }
}
