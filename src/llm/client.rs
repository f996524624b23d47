use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat},
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::llm::CompletionProvider;

pub struct LlmClient {
    chat_client: Client<OpenAIConfig>,
    chat_model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let chat_config = OpenAIConfig::new()
            .with_api_base(&config.openai_api_base)
            .with_api_key(&config.openai_api_key);

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()?;

        // Rate-limited and 5xx responses fail on the first attempt
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Ok(Self {
            chat_client: Client::with_config(chat_config)
                .with_http_client(http_client)
                .with_backoff(no_retry),
            chat_model: config.openai_model.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, OpenAIError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.chat_model)
            .messages(vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()?
                .into()])
            .response_format(ResponseFormat::JsonObject)
            .build()?;

        let response = self.chat_client.chat().create(request).await?;
        debug!(
            "Completion from {} returned {} choices",
            response.model,
            response.choices.len()
        );

        // Blank content counts as no content
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty());

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use httpmock::prelude::*;
    use serde_json::json;

    fn completion_body(content: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1_700_000_000u32,
            "model": "test-model",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_complete_returns_content_in_json_mode() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("authorization", "Bearer test-openai-key")
                    .json_body_partial(
                        r#"{"model": "test-model", "response_format": {"type": "json_object"}}"#,
                    );
                then.status(200)
                    .json_body(completion_body(json!("{\"songs\": []}")));
            })
            .await;

        let client = LlmClient::new(&test_config(&server.base_url())).unwrap();
        let content = client.complete("Generate songs").await.unwrap();

        mock.assert_async().await;
        assert_eq!(content.as_deref(), Some("{\"songs\": []}"));
    }

    #[tokio::test]
    async fn test_complete_maps_missing_and_blank_content_to_none() {
        let server = MockServer::start_async().await;
        let client = LlmClient::new(&test_config(&server.base_url())).unwrap();

        let mut mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(completion_body(json!(null)));
            })
            .await;
        assert_eq!(client.complete("Generate songs").await.unwrap(), None);
        mock.delete_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(completion_body(json!("   ")));
            })
            .await;
        assert_eq!(client.complete("Generate songs").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rate_limited_completion_fails_without_retry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(429).json_body(json!({
                    "error": {
                        "message": "Rate limit reached for requests",
                        "type": "requests",
                        "param": null,
                        "code": "rate_limit_exceeded"
                    }
                }));
            })
            .await;

        let client = LlmClient::new(&test_config(&server.base_url())).unwrap();
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            client.complete("Generate songs"),
        )
        .await
        .expect("rate-limited completion should fail promptly");

        assert!(result.is_err());
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_server_error_completion_fails_without_retry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(503).json_body(json!({
                    "error": {
                        "message": "The server is overloaded",
                        "type": "server_error",
                        "param": null,
                        "code": null
                    }
                }));
            })
            .await;

        let client = LlmClient::new(&test_config(&server.base_url())).unwrap();
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            client.complete("Generate songs"),
        )
        .await
        .expect("failing completion should return promptly");

        assert!(result.is_err());
        mock.assert_hits_async(1).await;
    }
}
