// src/weights/advisor.rs
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{error, info, warn};

use super::stream_weights::StreamWeights;
use crate::config::LlmConfig;
use crate::types::response::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Turns a free-text interest into stream weights through a chat-completion endpoint.
pub struct WeightAdvisor {
    client: Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl WeightAdvisor {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Suggest weights for `streams`. Any failure yields an empty mapping.
    pub async fn suggest(&self, interest: &str, streams: &[&str]) -> StreamWeights {
        match self.request_weights(interest, streams).await {
            Ok(weights) => {
                info!("LLM suggested weights for {} streams", weights.len());
                weights
            }
            Err(e) => {
                error!("Error fetching LLM stream weights: {:#}", e);
                StreamWeights::empty()
            }
        }
    }

    async fn request_weights(&self, interest: &str, streams: &[&str]) -> Result<StreamWeights> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("LLM API key is missing, skipping weight suggestion");
            anyhow::bail!("LLM API key is not configured");
        };

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(interest, streams),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        info!("Requesting stream weights for interest: {}", interest);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to LLM API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("LLM API returned error {}: {}", status, error_text);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse LLM API response")?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .context("LLM response has no choices")?;

        parse_weights(&reply)
    }
}

pub fn build_prompt(interest: &str, streams: &[&str]) -> String {
    let stream_list = streams
        .iter()
        .map(|s| format!("- {}", s))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"A user is interested in "{}". Assign a weight from 1 to 5 (1 = low, 5 = high) for each job stream below.

{}

Return only a valid JSON object:
{{
    "Developer Information Technology": 5,
    "Analyst Research": 5,
    "Digitalisasi & IT": 4,
    ...
}}"#,
        interest, stream_list
    )
}

/// Text from the first `{` through the last `}`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn parse_weights(reply: &str) -> Result<StreamWeights> {
    let json = extract_json_object(reply).context("No JSON object found in LLM reply")?;
    let value: serde_json::Value =
        serde_json::from_str(json).context("LLM reply contains malformed JSON")?;
    StreamWeights::from_json_object(&value).context("LLM reply JSON is not an object")
}
