//! Client for the bespoke Strider question-answering service

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::llm::LlmClient;

#[derive(Serialize)]
struct StriderRequest {
    question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct StriderResponse {
    answer: String,
}

/// Client for the Strider HTTP QA service: the whole assembled prompt goes
/// out as the `question` field and the service returns a single answer
/// string. The system instruction lives server-side.
pub struct StriderClient {
    client: Client,
    url: String,
    api_key: String,
}

impl StriderClient {
    /// Create a new client
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl LlmClient for StriderClient {
    async fn generate(&self, prompt: &str, stop: Option<&[String]>) -> Result<String> {
        let request = StriderRequest {
            question: prompt.to_string(),
            stop: stop.map(|s| s.to_vec()),
        };

        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let strider_response: StriderResponse = response.json().await?;
        Ok(strider_response.answer)
    }

    fn name(&self) -> &str {
        "strider"
    }
}
