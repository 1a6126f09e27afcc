use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::chat_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_MODEL_PATH: &str = "model.json";
pub const DEFAULT_PORT: u16 = 8501;

/// Application configuration loaded from environment variables.
/// Only a malformed `PORT` fails startup; everything else has a default or
/// is optional.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
    /// `None` disables the chat assistant.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub chat_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, so tests need not touch
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            model_path: lookup("MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),
            openai_api_key: non_blank(lookup("OPENAI_API_KEY")),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: match lookup("PORT") {
                Some(raw) => raw
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
                None => DEFAULT_PORT,
            },
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
