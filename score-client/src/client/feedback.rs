// Chat-completion client for reviewer feedback

use anyhow::{Context as AnyhowContext, Result};
use blind_score::feedback::FeedbackPrompt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI-compatible `chat/completions` endpoint.
pub struct FeedbackClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: String,
}

impl FeedbackClient {
    pub fn new(url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client: Client::new(),
            url,
            api_key,
            model,
        }
    }

    /// Ask the model for feedback. Only the prompt is sent, never the answer text.
    pub async fn request(&self, prompt: &FeedbackPrompt) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.as_str(),
            }],
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("Failed to reach feedback service")?;
        if !response.status().is_success() {
            anyhow::bail!("Feedback service returned {}", response.status());
        }

        let reply: ChatResponse = response
            .json()
            .await
            .context("Failed to parse feedback response")?;
        reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("Feedback response had no choices"))
    }
}
