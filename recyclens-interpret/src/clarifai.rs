use crate::error::{InterpretError, Result};
use crate::interpreter::{format_labels, Interpreter, JURISDICTION_RULES};
use async_trait::async_trait;
use parking_lot::RwLock;
use recyclens_core::{Interpretation, VisionLabel};
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

/// Clarifai-hosted LLM interpreter, second in the fallback order.
pub struct ClarifaiInterpreter {
    pat: Arc<RwLock<Option<String>>>,
    client: Client,
    base_url: String,
}

impl ClarifaiInterpreter {
    pub fn new() -> Self {
        Self {
            pat: Arc::new(RwLock::new(None)),
            client: Client::new(),
            base_url: "https://api.clarifai.com/v2".to_string(),
        }
    }

    pub fn with_pat(pat: String) -> Self {
        let provider = Self::new();
        *provider.pat.write() = Some(pat);
        provider
    }

    fn get_pat(&self) -> Result<String> {
        self.pat
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| InterpretError::MissingApiKey("clarifai".to_string()))
    }

    fn build_prompt(labels: &[VisionLabel]) -> String {
        format!(
            "Respond with valid JSON only, no additional text. You are a recycling \
             expert for Terre Haute, Indiana.\n\n\
             Image contains: {}\n\n\
             {}\n\n\
             Respond with a JSON object with keys item_name (string), is_recyclable \
             (boolean), bin_color (\"Blue\", \"Green\", \"Black\" or \"Special\"), \
             disposal_method (string), preparation (string, empty if none), \
             special_instructions (string, optional), confidence (number 0.0-1.0).",
            format_labels(labels),
            JURISDICTION_RULES
        )
    }
}

impl Default for ClarifaiInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Interpreter for ClarifaiInterpreter {
    fn name(&self) -> &'static str {
        "clarifai"
    }

    fn is_configured(&self) -> bool {
        self.pat.read().is_some()
    }

    async fn interpret(&self, labels: &[VisionLabel]) -> Result<Interpretation> {
        let pat = self.get_pat()?;

        let body = json!({
            "inputs": [
                {
                    "data": {
                        "text": {
                            "raw": Self::build_prompt(labels)
                        }
                    }
                }
            ]
        });

        let url = format!(
            "{}/models/gpt-4/versions/latest/outputs",
            self.base_url
        );
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Key {}", pat))
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
        let raw = payload
            .pointer("/outputs/0/data/text/raw")
            .and_then(|t| t.as_str())
            .ok_or_else(|| InterpretError::Parse("no text output in response".to_string()))?;

        serde_json::from_str(raw)
            .map_err(|e| InterpretError::Parse(format!("invalid interpretation JSON: {}", e)))
    }
}
