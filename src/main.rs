use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;

use chatdesk::config::{config_path, load_or_init};
use chatdesk::logger::{LogLevel, Logger};
use chatdesk::ollama::OllamaClient;
use chatdesk::router::{run_router, RouterState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let config_path = config_path();
  let config = load_or_init(&config_path)
    .with_context(|| format!("loading config from {}", config_path.display()))?;

  let log_path = config_path.with_extension("log");
  let logger = Arc::new(Logger::new(&log_path, LogLevel::parse(&config.log_level))?);
  logger.info("chatdesk API starting up");

  let addr = config.bind_addr();
  let listener =
    std::net::TcpListener::bind(&addr).with_context(|| format!("binding {addr}"))?;
  logger.info(&format!("listening on http://{addr}"));
  logger.info(&format!("forwarding to {}", config.ollama_base_url));

  let ollama = OllamaClient::new(&config)?;
  let state = RouterState {
    started_at: Instant::now(),
    config: Arc::new(config),
    ollama,
    logger,
  };

  run_router(listener, state).await
}
