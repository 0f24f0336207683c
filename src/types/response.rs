use serde::{Deserialize, Serialize};

// ===== Recruitment API envelopes =====

/// Every recruitment API response wraps its payload as `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Listing pages use a missing or null `data` to signal the end.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope<T> {
    pub data: Option<Vec<T>>,
}

// ===== Chat completion (LLM) types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}
