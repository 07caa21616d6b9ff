#[cfg(test)]
mod tests {
    use anyhow::Result;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use pid_labeler::{
        core::{component::get_components, project::store_project},
        services::{
            config::ModelConfig,
            labeler::Labeler,
            model::{suggest_metadata, Completer, OpenAiCompleter},
        },
        utils::{db_utils::get_memory_pool, error::AppError},
    };
    use std::path::PathBuf;

    const COMPLETION_BODY: &str = r#"{
        "id": "cmpl-test",
        "object": "text_completion",
        "created": 1700000000,
        "model": "gpt-3.5-turbo-instruct",
        "choices": [
            {
                "text": "\n\nFT-204 is a flow transmitter measuring feed rate.  \n",
                "index": 0,
                "logprobs": null,
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 14, "completion_tokens": 11, "total_tokens": 25 }
    }"#;

    struct Stub(&'static str);

    #[async_trait]
    impl Completer for Stub {
        async fn complete(&self, _prompt: &str, _max_tokens: i32) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn model_config(endpoint: String) -> ModelConfig {
        ModelConfig {
            endpoint,
            ..ModelConfig::default()
        }
    }

    #[tokio::test]
    async fn test_openai_completer_against_mock_server() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/completions")
                    .body_contains("Provide a detailed description and metadata for the component: FT-204")
                    .body_contains("\"max_tokens\":100");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .body(COMPLETION_BODY);
            })
            .await;

        let completer = OpenAiCompleter::new(
            Some("pid_test_key".to_string()),
            &model_config(format!("{}/v1", server.base_url())),
        );

        let answer = suggest_metadata(&completer, "FT-204", 100).await?;
        assert_eq!(answer, "FT-204 is a flow transmitter measuring feed rate.");

        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_openai_completer_server_error_is_model_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/completions");
                then.status(500).body("upstream exploded");
            })
            .await;

        let completer = OpenAiCompleter::new(
            Some("pid_test_key".to_string()),
            &model_config(format!("{}/v1", server.base_url())),
        );

        let err = suggest_metadata(&completer, "FT-204", 100).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::ModelError(_))
        ));
    }

    #[tokio::test]
    async fn test_stored_metadata_is_trimmed_stub_text() -> Result<()> {
        let pool = get_memory_pool().await?;
        let project = store_project(&pool, "Compressor Station").await?.unwrap();

        let mut app = Labeler::new(true, 100, PathBuf::from("unused"));
        app.current_project = Some(project.clone());

        let stub = Stub("   Centrifugal compressor, 2 stages.\n");
        app.add_label(&pool, &stub, "K-101").await;

        let components = get_components(&pool, project.id).await?;
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].label, "K-101");
        assert_eq!(components[0].metadata, "Centrifugal compressor, 2 stages.");
        assert_eq!(app.components, components);
        Ok(())
    }
}
