// API client for score-server

use anyhow::{Context as AnyhowContext, Result};
use blind_score::protocol::{ComputeReply, ComputeRequest, ComputeResponse, QuestionResponse};
use reqwest::{Client, Response};
use serde::Deserialize;

pub struct ApiClient {
    client: Client,
    server_url: String,
}

impl ApiClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            client: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a random interview question
    pub async fn fetch_question(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/question", self.server_url))
            .send()
            .await
            .context("Failed to fetch question")?;

        let body: QuestionResponse = handle_response(response).await?;
        Ok(body.question)
    }

    /// Send the encrypted features for blind weighting
    pub async fn compute(&self, request: &ComputeRequest) -> Result<ComputeResponse> {
        let response = self
            .client
            .post(format!("{}/compute", self.server_url))
            .json(request)
            .send()
            .await
            .context("Failed to send compute request")?;

        let status = response.status();
        let reply: ComputeReply = response
            .json()
            .await
            .with_context(|| format!("Failed to parse compute response ({status})"))?;

        match reply {
            ComputeReply::Success(body) if status.is_success() => Ok(body),
            ComputeReply::Success(_) => anyhow::bail!("Compute failed ({status})"),
            ComputeReply::Failure(err) => anyhow::bail!("Compute failed ({status}): {}", err.error),
        }
    }
}

async fn handle_response<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Request failed ({status}): {body}");
    }

    response
        .json()
        .await
        .context("Failed to parse JSON response")
}
