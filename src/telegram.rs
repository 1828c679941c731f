//! Telegram Bot API delivery adapter.
//!
//! Rewrites the small markdown subset the generators emit into Telegram
//! HTML and posts it through `sendMessage`.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::Error;
use crate::Result;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.*?)__").unwrap());

/// Rewrite `**bold**` and `__italic__` into `<b>`/`<i>` tags.
///
/// Single pass, non-greedy, non-nested. Already-converted text passes
/// through unchanged.
pub fn markdown_to_html(text: &str) -> String {
    let bold = BOLD_RE.replace_all(text, "<b>$1</b>");
    ITALIC_RE.replace_all(&bold, "<i>$1</i>").into_owned()
}

/// Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent("magistr_content/0.1.0")
            .build()
            .map_err(|e| Error::InvalidArgument(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url: TELEGRAM_API_URL.to_string(),
        })
    }

    /// Override the API endpoint.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send one message to the channel.
    ///
    /// A failed response surfaces the API's `description` field; rate
    /// limiting is handled by the caller's pacing, not here.
    pub async fn send_message(&self, token: &str, chat_id: &str, text: &str) -> Result<Value> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, token);
        let payload = json!({
            "chat_id": chat_id,
            "text": markdown_to_html(text),
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Telegram(format!("request failed: {}", e)))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Telegram(format!("invalid response: {}", e)))?;

        if !status.is_success() {
            let description = body
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(Error::Telegram(description));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_markdown_bold_and_italic() {
        assert_eq!(markdown_to_html("**salom**"), "<b>salom</b>");
        assert_eq!(markdown_to_html("__salom__"), "<i>salom</i>");
        assert_eq!(
            markdown_to_html("💡 **Motivatsiya:** va __fikr__"),
            "💡 <b>Motivatsiya:</b> va <i>fikr</i>"
        );
    }

    #[test]
    fn test_markdown_non_greedy() {
        assert_eq!(
            markdown_to_html("**a** oddiy **b**"),
            "<b>a</b> oddiy <b>b</b>"
        );
    }

    #[test]
    fn test_markdown_idempotent() {
        let once = markdown_to_html("**a**");
        let twice = markdown_to_html(&once);
        assert_eq!(once, "<b>a</b>");
        assert_eq!(twice, once);
    }

    #[test]
    fn test_markdown_plain_text_unchanged() {
        let text = "Harorat: 21°C, hech qanday belgi yo'q";
        assert_eq!(markdown_to_html(text), text);
    }

    #[tokio::test]
    async fn send_message_posts_html_payload() {
        let server = MockServer::start_async().await;
        let send_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/botTOKEN/sendMessage")
                .header("content-type", "application/json")
                .is_true(|req| {
                    let body = String::from_utf8_lossy(req.body().as_ref());
                    body.contains("\"chat_id\":\"-100123\"")
                        && body.contains("<b>Motivatsiya:</b>")
                        && body.contains("\"parse_mode\":\"HTML\"")
                        && body.contains("\"disable_web_page_preview\":true")
                });
            then.status(200).json_body(serde_json::json!({
                "ok": true,
                "result": { "message_id": 7 }
            }));
        });

        let client = TelegramClient::new()
            .expect("client")
            .with_base_url(server.base_url());

        let body = client
            .send_message("TOKEN", "-100123", "💡 **Motivatsiya:**\n\nsalom")
            .await
            .expect("send");

        send_mock.assert_calls(1);
        assert_eq!(body["result"]["message_id"], 7);
    }

    #[tokio::test]
    async fn send_message_surfaces_api_description() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/botTOKEN/sendMessage");
            then.status(400).json_body(serde_json::json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            }));
        });

        let client = TelegramClient::new()
            .expect("client")
            .with_base_url(server.base_url());

        let err = client
            .send_message("TOKEN", "-100123", "salom")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Telegram(_)));
        assert!(err.to_string().contains("Bad Request: chat not found"));
    }

    #[tokio::test]
    async fn send_message_falls_back_to_status_code() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/botTOKEN/sendMessage");
            then.status(502).json_body(serde_json::json!({ "ok": false }));
        });

        let client = TelegramClient::new()
            .expect("client")
            .with_base_url(server.base_url());

        let err = client
            .send_message("TOKEN", "-100123", "salom")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("502"));
    }
}
