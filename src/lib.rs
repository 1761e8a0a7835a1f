pub mod client;
pub mod config;
pub mod logger;
pub mod models;
pub mod ollama;
pub mod router;
pub mod session;

pub use client::ApiClient;
pub use config::AppConfig;
pub use ollama::OllamaClient;
pub use session::ChatSession;
