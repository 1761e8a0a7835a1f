use std::net::TcpListener;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::logger::Logger;
use crate::models::{GenerateRequest, GenerateResponse};
use crate::ollama::OllamaClient;

pub struct RouterState {
  pub started_at: Instant,
  pub config: Arc<AppConfig>,
  pub ollama: OllamaClient,
  pub logger: Arc<Logger>,
}

pub async fn run_router(listener: TcpListener, state: RouterState) -> anyhow::Result<()> {
  let origins: Vec<HeaderValue> = state
    .config
    .allowed_origins()
    .iter()
    .filter_map(|origin| origin.parse().ok())
    .collect();

  let app = Router::new()
    .route("/", get(root))
    .route("/health", get(health))
    .route("/generate", post(generate))
    .layer(
      CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any),
    )
    .with_state(Arc::new(state));

  listener.set_nonblocking(true)?;
  let listener = tokio::net::TcpListener::from_std(listener)?;
  axum::serve(listener, app).await?;
  Ok(())
}

async fn root() -> Json<serde_json::Value> {
  Json(serde_json::json!({
    "message": "chatdesk API",
    "version": env!("CARGO_PKG_VERSION"),
    "endpoints": ["/health", "/generate"]
  }))
}

async fn health(State(state): State<Arc<RouterState>>) -> Json<serde_json::Value> {
  let uptime = state.started_at.elapsed().as_millis();
  Json(serde_json::json!({
    "status": "healthy",
    "version": env!("CARGO_PKG_VERSION"),
    "uptime_ms": uptime
  }))
}

async fn generate(
  State(state): State<Arc<RouterState>>,
  Json(req): Json<GenerateRequest>,
) -> impl IntoResponse {
  if let Some(requested) = req.model.as_deref() {
    if !state.config.is_known_model(requested) {
      return error_response(
        StatusCode::BAD_REQUEST,
        "model_unknown",
        &format!("Unknown model: {requested}"),
      );
    }
  }

  let model = select_model(req.thinking, req.model.as_deref(), &state.config);
  state.logger.info(&format!("generating with model {model}"));
  state
    .logger
    .debug(&format!("prompt: {}", prompt_preview(&req.prompt)));

  match state.ollama.generate(&model, &req.prompt).await {
    Ok(text) => {
      state
        .logger
        .info(&format!("generated {} chars with {model}", text.len()));
      (StatusCode::OK, Json(GenerateResponse { response: text })).into_response()
    }
    Err(err) => {
      state.logger.error(&format!("generation failed: {err}"));
      error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "generation_failed",
        &format!("Failed to generate response: {err}"),
      )
    }
  }
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
  let body = Json(serde_json::json!({ "error": message, "code": code }));
  (status, body).into_response()
}

// Thinking mode wins over an explicit request; an explicit request wins
// over the configured default.
fn select_model(thinking: bool, requested: Option<&str>, config: &AppConfig) -> String {
  if thinking {
    return config.thinking_model.clone();
  }
  if let Some(requested) = requested {
    if !requested.trim().is_empty() {
      return requested.to_string();
    }
  }
  config.default_model.clone()
}

fn prompt_preview(prompt: &str) -> String {
  if prompt.chars().count() <= 100 {
    prompt.to_string()
  } else {
    let head: String = prompt.chars().take(100).collect();
    format!("{head}...")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn select_model_prefers_thinking_model() {
    let config = AppConfig::default();
    let model = select_model(true, Some("llama3.2:3b"), &config);
    assert_eq!(model, config.thinking_model);
  }

  #[test]
  fn select_model_honors_explicit_request() {
    let config = AppConfig::default();
    let model = select_model(false, Some("qwen3:8b"), &config);
    assert_eq!(model, "qwen3:8b");
  }

  #[test]
  fn select_model_falls_back_to_default() {
    let config = AppConfig::default();
    assert_eq!(select_model(false, None, &config), config.default_model);
  }

  #[test]
  fn select_model_ignores_blank_request() {
    let config = AppConfig::default();
    assert_eq!(select_model(false, Some("  "), &config), config.default_model);
  }

  #[test]
  fn prompt_preview_caps_long_prompts() {
    let short = "Explain recursion";
    assert_eq!(prompt_preview(short), short);

    let long = "x".repeat(250);
    let preview = prompt_preview(&long);
    assert_eq!(preview.chars().count(), 103);
    assert!(preview.ends_with("..."));
  }
}
