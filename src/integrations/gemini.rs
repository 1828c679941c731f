//! Google Gemini API Client.
//!
//! Two operations back the daily pipeline: plain text generation for the
//! standalone scheduled posts, and a schema-constrained JSON response for
//! the combined daily round.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Error;
use crate::prompts;
use crate::Result;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model for the structured daily-content request.
pub const DAILY_CONTENT_MODEL: &str = "gemini-2.5-flash";

/// Lighter model used by the scheduled runner's standalone posts.
pub const SCHEDULER_MODEL: &str = "gemini-2.0-flash";

/// The three generated sections of a daily round.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedContent {
    #[serde(rename = "educationFact")]
    pub education_fact: String,
    pub motivation: String,
    pub birthdays: String,
}

/// Google Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client from the GEMINI_API_KEY environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| Error::InvalidArgument("GEMINI_API_KEY not set".to_string()))?;
        Self::new(api_key, DAILY_CONTENT_MODEL)
    }

    /// Create a client with an API key and model.
    pub fn new<S: Into<String>>(api_key: S, model: &str) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::InvalidArgument("GEMINI_API_KEY is empty".to_string()));
        }

        let http = Client::builder()
            .user_agent("magistr_content/0.1.0")
            .build()
            .map_err(|e| Error::InvalidArgument(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            base_url: GEMINI_API_URL.to_string(),
            model: model.to_string(),
        })
    }

    /// Set the model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Override the API endpoint.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Plain text generation - first candidate's text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let payload = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 4096,
                response_mime_type: None,
                response_schema: None,
            }),
        };

        self.generate(payload).await
    }

    /// Structured daily content: education fact, motivation, birthdays.
    ///
    /// The response shape is pinned with a `responseSchema`; the model is
    /// asked not to append the promotional footer (the assembler does that).
    pub async fn generate_daily_content(&self, date_label: &str) -> Result<GeneratedContent> {
        let payload = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompts::daily_content_prompt(date_label),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 4096,
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(daily_content_schema()),
            }),
        };

        let text = self.generate(payload).await?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Gemini(format!("malformed content JSON: {}", e)))
    }

    async fn generate(&self, payload: GeminiRequest) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Gemini(format!("request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Gemini(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::Gemini(format!("{}: {}", status, text)));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&text)
            .map_err(|e| Error::Gemini(format!("invalid response: {}", e)))?;

        gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| Error::Gemini("empty response".to_string()))
    }
}

/// Fixed response shape of the daily round.
fn daily_content_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "educationFact": {
                "type": "STRING",
                "description": "A short, interesting educational fact in Uzbek with emojis.",
            },
            "motivation": {
                "type": "STRING",
                "description": "A short motivational quote/thought in Uzbek with emojis.",
            },
            "birthdays": {
                "type": "STRING",
                "description": "Famous people born on this day in Uzbek with emojis.",
            },
        },
        "required": ["educationFact", "motivation", "birthdays"],
    })
}

// === Request structures ===

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "generationConfig")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseMimeType")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseSchema")]
    response_schema: Option<Value>,
}

// === Response structures ===

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_new_rejects_empty_key() {
        let err = GeminiClient::new("   ", DAILY_CONTENT_MODEL).unwrap_err();
        assert!(format!("{}", err).contains("empty"));
    }

    #[test]
    fn test_with_model() {
        let client = GeminiClient::new("test_key", DAILY_CONTENT_MODEL)
            .unwrap()
            .with_model(SCHEDULER_MODEL);
        assert_eq!(client.model, SCHEDULER_MODEL);
    }

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test_key", SCHEDULER_MODEL)
            .expect("client")
            .with_base_url(server.base_url())
    }

    fn candidate_body(text: &str) -> Value {
        json!({
            "candidates": [
                { "content": { "role": "model", "parts": [ { "text": text } ] } }
            ]
        })
    }

    #[tokio::test]
    async fn generate_text_returns_first_candidate() {
        let server = MockServer::start_async().await;
        let generate_mock = server.mock(|when, then| {
            when.method(POST)
                .path(format!("/models/{}:generateContent", SCHEDULER_MODEL))
                .query_param("key", "test_key")
                .is_true(|req| {
                    let body = String::from_utf8_lossy(req.body().as_ref());
                    body.contains("motivatsion fikr") && !body.contains("responseSchema")
                });
            then.status(200)
                .json_body(candidate_body("Harakat qiling! 💪"));
        });

        let prompt = crate::prompts::Topic::Motivation.prompt("5-yanvar");
        let text = client(&server).generate_text(&prompt).await.expect("text");

        generate_mock.assert_calls(1);
        assert_eq!(text, "Harakat qiling! 💪");
    }

    #[tokio::test]
    async fn generate_daily_content_parses_structured_response() {
        let server = MockServer::start_async().await;
        let generate_mock = server.mock(|when, then| {
            when.method(POST)
                .path(format!("/models/{}:generateContent", SCHEDULER_MODEL))
                .query_param("key", "test_key")
                .is_true(|req| {
                    let body = String::from_utf8_lossy(req.body().as_ref());
                    body.contains("responseSchema")
                        && body.contains("\"responseMimeType\":\"application/json\"")
                        && body.contains("educationFact")
                });
            then.status(200).json_body(candidate_body(
                r#"{"educationFact":"Fakt 🧠","motivation":"Fikr 💡","birthdays":"Shaxslar 🎂"}"#,
            ));
        });

        let content = client(&server)
            .generate_daily_content("5-yanvar")
            .await
            .expect("content");

        generate_mock.assert_calls(1);
        assert_eq!(content.education_fact, "Fakt 🧠");
        assert_eq!(content.motivation, "Fikr 💡");
        assert_eq!(content.birthdays, "Shaxslar 🎂");
    }

    #[tokio::test]
    async fn generate_daily_content_rejects_malformed_json() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path(format!("/models/{}:generateContent", SCHEDULER_MODEL));
            then.status(200).json_body(candidate_body("not json at all"));
        });

        let err = client(&server)
            .generate_daily_content("5-yanvar")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Gemini(_)));
        assert!(err.to_string().contains("malformed content JSON"));
    }

    #[tokio::test]
    async fn generate_propagates_http_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path(format!("/models/{}:generateContent", SCHEDULER_MODEL));
            then.status(429).body("quota exceeded");
        });

        let err = client(&server).generate_text("salom").await.unwrap_err();
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn generate_rejects_empty_candidates() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path(format!("/models/{}:generateContent", SCHEDULER_MODEL));
            then.status(200).json_body(json!({ "candidates": [] }));
        });

        let err = client(&server).generate_text("salom").await.unwrap_err();
        assert!(err.to_string().contains("empty response"));
    }
}
