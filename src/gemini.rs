use crate::advisor::AdvisorError;
use crate::settings::AiConfig;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("eduai-ai")
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

/// Shared runtime for the AI calls; the GUI spawns on it, the CLI blocks on it.
pub fn runtime() -> &'static Runtime {
    &RUNTIME
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Reply shape constraint. `None` asks for plain text.
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    pub fn json(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }
}

/// A hosted text-generation backend.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, AdvisorError>> + Send;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

fn request_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: &request.prompt,
            }],
        }],
        generation_config: request.response_schema.as_ref().map(|schema| GenerationConfig {
            response_mime_type: "application/json",
            response_schema: schema,
        }),
    }
}

/// Concatenated text of the first candidate.
fn extract_text(body: &str) -> Result<String, AdvisorError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| AdvisorError::Malformed(e.to_string()))?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        Err(AdvisorError::EmptyResponse)
    } else {
        Ok(text)
    }
}

fn service_error(status: u16, body: &str) -> AdvisorError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().chars().take(200).collect());
    AdvisorError::Service { status, message }
}

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(endpoint: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Reads the key from the environment variable named in the settings.
    /// A missing key only surfaces once a request is attempted.
    pub fn from_settings(cfg: &AiConfig) -> Self {
        let api_key = if cfg.enabled {
            std::env::var(&cfg.api_key_env).ok()
        } else {
            None
        };
        Self::new(&cfg.endpoint, &cfg.model, api_key)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AdvisorError> {
        let key = self.api_key.as_deref().ok_or(AdvisorError::MissingApiKey)?;
        debug!(model = %self.model, json = request.response_schema.is_some(), "generateContent");

        let response = self
            .http
            .post(self.url())
            .query(&[("key", key)])
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| AdvisorError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AdvisorError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(service_error(status.as_u16(), &body));
        }
        extract_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_request_has_no_generation_config() {
        let req = GenerationRequest::text("hello");
        let body = serde_json::to_value(request_body(&req)).unwrap();
        assert_eq!(body, json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[test]
    fn json_request_carries_schema() {
        let schema = json!({"type": "OBJECT"});
        let req = GenerationRequest::json("recommend", schema.clone());
        let body = serde_json::to_value(request_body(&req)).unwrap();
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn extracts_and_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Keep "},{"text":"going."}],"role":"model"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Keep going.");
    }

    #[test]
    fn no_candidates_is_empty_response() {
        assert!(matches!(
            extract_text(r#"{"candidates":[]}"#),
            Err(AdvisorError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#),
            Err(AdvisorError::EmptyResponse)
        ));
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(matches!(
            extract_text("<html>"),
            Err(AdvisorError::Malformed(_))
        ));
    }

    #[test]
    fn service_error_uses_api_message() {
        let err = service_error(
            400,
            r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#,
        );
        match err {
            AdvisorError::Service { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let client = GeminiClient::new("https://example.test/v1beta/", "m", Some("  ".into()));
        assert!(!client.has_api_key());
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/m:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new("http://127.0.0.1:9", "m", None);
        let err = client
            .generate(&GenerationRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::MissingApiKey));
    }
}
