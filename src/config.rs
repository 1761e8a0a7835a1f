use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::ModelInfo;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AppConfig {
  pub api_host: String,
  pub api_port: u16,
  pub api_timeout_secs: u64,
  pub api_health_timeout_secs: u64,
  pub ollama_base_url: String,
  pub ollama_timeout_secs: u64,
  pub default_model: String,
  pub thinking_model: String,
  pub frontend_host: String,
  pub frontend_port: u16,
  pub log_level: String,
  pub models: Vec<ModelInfo>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      api_host: "0.0.0.0".to_string(),
      api_port: 8000,
      api_timeout_secs: 200,
      api_health_timeout_secs: 5,
      ollama_base_url: "http://localhost:11434".to_string(),
      ollama_timeout_secs: 60,
      default_model: "llama3.2:3b".to_string(),
      thinking_model: "qwen3:8b".to_string(),
      frontend_host: "localhost".to_string(),
      frontend_port: 8501,
      log_level: "info".to_string(),
      models: vec![
        ModelInfo {
          id: "llama3.2:3b".to_string(),
          label: "Llama 3.2 3B".to_string(),
          mode: "normal".to_string(),
        },
        ModelInfo {
          id: "qwen3:8b".to_string(),
          label: "Qwen3 8B".to_string(),
          mode: "thinking".to_string(),
        },
      ],
    }
  }
}

impl AppConfig {
  pub fn is_known_model(&self, id: &str) -> bool {
    self.models.iter().any(|m| m.id == id)
  }

  pub fn bind_addr(&self) -> String {
    format!("{}:{}", self.api_host, self.api_port)
  }

  // Single source of truth for the address the front-end dials. The bind
  // host 0.0.0.0 is not dialable, so it maps to localhost.
  pub fn client_base_url(&self) -> String {
    let host = if self.api_host == "0.0.0.0" {
      "localhost"
    } else {
      &self.api_host
    };
    format!("http://{}:{}", host, self.api_port)
  }

  pub fn allowed_origins(&self) -> Vec<String> {
    let mut origins = vec![
      format!("http://127.0.0.1:{}", self.frontend_port),
      format!("http://localhost:{}", self.frontend_port),
    ];
    let configured = format!("http://{}:{}", self.frontend_host, self.frontend_port);
    if !origins.contains(&configured) {
      origins.push(configured);
    }
    origins
  }
}

pub fn config_path() -> PathBuf {
  std::env::var("CHATDESK_CONFIG")
    .map(PathBuf::from)
    .unwrap_or_else(|_| PathBuf::from("chatdesk.json"))
}

pub fn load_or_init(path: &Path) -> anyhow::Result<AppConfig> {
  if path.exists() {
    let data = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&data)?;
    Ok(config)
  } else {
    let config = AppConfig::default();
    save_config(path, &config)?;
    Ok(config)
  }
}

pub fn save_config(path: &Path, config: &AppConfig) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(config)?;
  std::fs::write(path, json)?;
  Ok(())
}
