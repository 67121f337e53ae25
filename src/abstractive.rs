use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::text::{count_tokens, truncate_tokens};

/// Generation bounds for one call, in model tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub max_length: usize,
    pub min_length: usize,
}

impl GenerationParams {
    /// `min_length` never exceeds `max_length`.
    pub fn new(max_length: usize, min_length: usize) -> Self {
        Self {
            max_length,
            min_length: min_length.min(max_length),
        }
    }
}

/// A pretrained sequence-to-sequence summarization model.
#[async_trait]
pub trait AbstractiveModel: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, text: &str, params: GenerationParams) -> Result<String>;
}

#[derive(Serialize)]
struct InferenceParameters {
    max_length: usize,
    min_length: usize,
    do_sample: bool,
}

#[derive(Serialize)]
struct InferenceOptions<'a> {
    wait_for_model: bool,
    device: &'a str,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions<'a>,
}

/// Model served by a Hugging Face style inference endpoint.
#[derive(Debug, Clone)]
pub struct InferenceModel {
    client: Client,
    endpoint: String,
    model_name: String,
    api_token: Option<String>,
    device: String,
    max_input_tokens: usize,
}

impl InferenceModel {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/{}", config.model_api_url, config.model_name),
            model_name: config.model_name.clone(),
            api_token: config.model_api_token.clone(),
            device: config.device.clone(),
            max_input_tokens: config.max_input_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AbstractiveModel for InferenceModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, text: &str, params: GenerationParams) -> Result<String> {
        let input = if count_tokens(text) > self.max_input_tokens {
            tracing::debug!(max_input_tokens = self.max_input_tokens, "truncating model input");
            truncate_tokens(text, self.max_input_tokens)
        } else {
            text.to_string()
        };

        let body = InferenceRequest {
            inputs: &input,
            parameters: InferenceParameters {
                max_length: params.max_length,
                min_length: params.min_length,
                do_sample: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
                device: &self.device,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let res = request.send().await?;
        let status = res.status();
        let json: serde_json::Value = res
            .json()
            .await
            .map_err(|e| AppError::Model(format!("Invalid response from model ({}): {}", status, e)))?;

        if !status.is_success() {
            let detail = json["error"].as_str().unwrap_or("no error detail");
            return Err(AppError::Model(format!(
                "Model endpoint returned {}: {}",
                status, detail
            )));
        }

        let summary = json[0]["summary_text"]
            .as_str()
            .or_else(|| json[0]["generated_text"].as_str())
            .ok_or_else(|| AppError::Model("Invalid response format from model".to_string()))?
            .trim()
            .to_string();

        if summary.is_empty() {
            return Err(AppError::Model("Model returned an empty summary".to_string()));
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_clamp_min_length() {
        assert_eq!(GenerationParams::new(10, 20), GenerationParams { max_length: 10, min_length: 10 });
        assert_eq!(GenerationParams::new(100, 20).min_length, 20);
    }

    #[test]
    fn test_endpoint_from_config() {
        let config = Config {
            model_api_url: "http://localhost:9000/models".to_string(),
            model_name: "facebook/bart-large-cnn".to_string(),
            ..Config::default()
        };
        let model = InferenceModel::from_config(&config).unwrap();
        assert_eq!(model.endpoint(), "http://localhost:9000/models/facebook/bart-large-cnn");
        assert_eq!(model.name(), "facebook/bart-large-cnn");
    }
}
