use std::time::Duration;

use anyhow::anyhow;

use crate::config::AppConfig;
use crate::models::{GenerateRequest, GenerateResponse};

pub struct ApiClient {
  http: reqwest::Client,
  generate_url: String,
  health_url: String,
  health_timeout: Duration,
}

impl ApiClient {
  pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.api_timeout_secs))
      .build()?;
    let base_url = config.client_base_url();
    Ok(Self {
      http,
      generate_url: format!("{base_url}/generate"),
      health_url: format!("{base_url}/health"),
      health_timeout: Duration::from_secs(config.api_health_timeout_secs),
    })
  }

  pub async fn generate(
    &self,
    prompt: &str,
    model: Option<&str>,
    thinking: bool,
  ) -> anyhow::Result<GenerateResponse> {
    let payload = GenerateRequest {
      model: model.map(|m| m.to_string()),
      prompt: prompt.to_string(),
      thinking,
    };

    let resp = self.http.post(&self.generate_url).json(&payload).send().await?;

    if !resp.status().is_success() {
      let status = resp.status();
      let body = resp
        .json::<serde_json::Value>()
        .await
        .unwrap_or(serde_json::Value::Null);
      let message = body
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or("generation failed")
        .to_string();
      return Err(anyhow!("API error ({status}): {message}"));
    }

    Ok(resp.json::<GenerateResponse>().await?)
  }

  pub async fn health(&self) -> bool {
    let result = self
      .http
      .get(&self.health_url)
      .timeout(self.health_timeout)
      .send()
      .await;
    match result {
      Ok(resp) => resp.status().is_success(),
      Err(_) => false,
    }
  }
}
