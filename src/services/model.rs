use anyhow::Result;
use async_trait::async_trait;
use openai_api_rs::v1::api::OpenAIClient;
use openai_api_rs::v1::completion::CompletionRequest;
use std::env;

use crate::services::config::ModelConfig;
use crate::utils::{
    error::AppError,
    logger::{log_error, log_info},
};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Anything that can turn a prompt into completion text.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: i32) -> Result<String>;
}

pub fn metadata_prompt(label: &str) -> String {
    format!(
        "Provide a detailed description and metadata for the component: {}",
        label
    )
}

/// Asks `completer` to describe `label` and returns the trimmed answer.
/// No retries and no caching; errors propagate as-is.
pub async fn suggest_metadata(
    completer: &dyn Completer,
    label: &str,
    max_tokens: i32,
) -> Result<String> {
    let answer = completer.complete(&metadata_prompt(label), max_tokens).await?;
    Ok(answer.trim().to_string())
}

/// Legacy completions endpoint of an OpenAI compatible API.
pub struct OpenAiCompleter {
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl OpenAiCompleter {
    pub fn new(api_key: Option<String>, conf: &ModelConfig) -> Self {
        OpenAiCompleter {
            api_key,
            model: conf.model.clone(),
            endpoint: conf.endpoint.clone(),
        }
    }

    /// Reads the API key from `OPENAI_API_KEY`. A missing key only fails
    /// once a suggestion is requested.
    pub fn from_env(conf: &ModelConfig) -> Self {
        Self::new(env::var(API_KEY_VAR).ok(), conf)
    }
}

#[async_trait]
impl Completer for OpenAiCompleter {
    async fn complete(&self, prompt: &str, max_tokens: i32) -> Result<String> {
        let Some(api_key) = self.api_key.as_ref() else {
            return Err(AppError::ModelError(format!(
                "Missing {} environment variable",
                API_KEY_VAR
            ))
            .into());
        };

        let mut client = OpenAIClient::builder()
            .with_endpoint(self.endpoint.clone())
            .with_api_key(api_key.clone())
            .build()
            .map_err(|e| AppError::ModelError(format!("Failed to build client: {}", e)))?;

        let req = CompletionRequest::new(self.model.clone(), prompt.to_owned())
            .max_tokens(max_tokens);

        log_info(&format!("Requesting completion from {}", self.model));
        let result = client.completion(req).await.map_err(|e| {
            log_error(&format!("Completion request failed: {}", e));
            AppError::ModelError(e.to_string())
        })?;

        let Some(choice) = result.choices.first() else {
            return Err(AppError::ModelError(String::from("Completion returned no choices")).into());
        };

        Ok(choice.text.clone())
    }
}
