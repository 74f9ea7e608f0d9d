//! Ollama HTTP client: liveness check and non-streaming generation.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerateError;

/// Base URL of a local Ollama install.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Model used when `--model` is not given.
pub const DEFAULT_MODEL: &str = "phi3:mini";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Client for one Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    /// Client for `base_url`; `timeout` of `None` waits indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GenerateError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(GenerateError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/tags` must answer 200.
    pub async fn check_server(&self) -> Result<(), GenerateError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| GenerateError::ServerUnreachable {
                url: self.base_url.clone(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(GenerateError::ServerNotRunning {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    /// Send `prompt` to `model` and return the raw `response` text.
    pub async fn generate(&self, prompt: &str, model: &str) -> Result<String, GenerateError> {
        let url = format!("{}/api/generate", self.base_url);
        debug!("POST {} (model {}, {} prompt bytes)", url, model, prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(GenerateError::Transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GenerateError::ModelNotFound {
                model: model.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::HttpStatus {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::InvalidResponse(e.to_string()))?;
        Ok(body.response)
    }
}
