use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum OllamaError {
  #[error("failed to reach inference daemon: {0}")]
  Connection(#[source] reqwest::Error),
  #[error("inference daemon returned {status}: {body}")]
  Daemon { status: StatusCode, body: String },
  #[error("inference daemon sent an unreadable payload: {0}")]
  InvalidPayload(#[source] reqwest::Error),
  #[error("inference daemon payload is missing the response field")]
  MissingResponse,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
  model: &'a str,
  prompt: &'a str,
  stream: bool,
}

pub struct OllamaClient {
  http: reqwest::Client,
  generate_url: String,
}

impl OllamaClient {
  pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.ollama_timeout_secs))
      .build()?;
    Ok(Self {
      http,
      generate_url: format!("{}/api/generate", config.ollama_base_url),
    })
  }

  pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
    let payload = OllamaRequest {
      model,
      prompt,
      stream: false,
    };

    let resp = self
      .http
      .post(&self.generate_url)
      .json(&payload)
      .send()
      .await
      .map_err(OllamaError::Connection)?;

    if !resp.status().is_success() {
      let status = resp.status();
      let body = resp.text().await.unwrap_or_default();
      return Err(OllamaError::Daemon { status, body });
    }

    let body = resp
      .json::<serde_json::Value>()
      .await
      .map_err(OllamaError::InvalidPayload)?;
    extract_response(&body)
  }
}

fn extract_response(body: &serde_json::Value) -> Result<String, OllamaError> {
  body
    .get("response")
    .and_then(|v| v.as_str())
    .map(|s| s.to_string())
    .ok_or(OllamaError::MissingResponse)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn payload_always_disables_streaming() {
    let payload = OllamaRequest {
      model: "llama3.2:3b",
      prompt: "Hello",
      stream: false,
    };
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["model"], "llama3.2:3b");
    assert_eq!(json["prompt"], "Hello");
    assert_eq!(json["stream"], false);
  }

  #[test]
  fn extract_response_returns_text_unchanged() {
    let body = serde_json::json!({ "response": "Hi there", "done": true });
    assert_eq!(extract_response(&body).unwrap(), "Hi there");
  }

  #[test]
  fn extract_response_rejects_missing_field() {
    let body = serde_json::json!({ "done": true });
    assert!(matches!(
      extract_response(&body),
      Err(OllamaError::MissingResponse)
    ));
  }

  #[test]
  fn extract_response_rejects_non_string_field() {
    let body = serde_json::json!({ "response": 42 });
    assert!(matches!(
      extract_response(&body),
      Err(OllamaError::MissingResponse)
    ));
  }
}
