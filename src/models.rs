use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GenerateRequest {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub model: Option<String>,
  pub prompt: String,
  #[serde(default)]
  pub thinking: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GenerateResponse {
  pub response: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ModelInfo {
  pub id: String,
  pub label: String,
  pub mode: String,
}
