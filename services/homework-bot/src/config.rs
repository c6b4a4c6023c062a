//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practicum: PracticumConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default = "default_retry_period")]
    pub retry_period_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            practicum: PracticumConfig::default(),
            telegram: TelegramConfig::default(),
            retry_period_seconds: default_retry_period(),
        }
    }
}

/// Homework review API settings
#[derive(Clone, Serialize, Deserialize)]
pub struct PracticumConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub token: String,
}

impl std::fmt::Debug for PracticumConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumConfig")
            .field("endpoint", &self.endpoint)
            .field("token_set", &!self.token.is_empty())
            .finish()
    }
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: String::new(),
        }
    }
}

/// Telegram Bot API settings
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_url", &self.api_url)
            .field("bot_token_set", &!self.bot_token.is_empty())
            .field("chat_id_set", &!self.chat_id.is_empty())
            .finish()
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
            bot_token: String::new(),
            chat_id: String::new(),
        }
    }
}

impl Config {
    /// Overlay secrets from the process environment
    pub fn resolve_secrets(&mut self) {
        self.resolve_secrets_with(|name| std::env::var(name).ok());
    }

    /// Overlay secrets using the given lookup. Empty values are ignored.
    pub fn resolve_secrets_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(token) = present(PRACTICUM_TOKEN_VAR) {
            tracing::debug!("Using {} from environment", PRACTICUM_TOKEN_VAR);
            self.practicum.token = token;
        }
        if let Some(token) = present(TELEGRAM_TOKEN_VAR) {
            tracing::debug!("Using {} from environment", TELEGRAM_TOKEN_VAR);
            self.telegram.bot_token = token;
        }
        if let Some(chat_id) = present(TELEGRAM_CHAT_ID_VAR) {
            tracing::debug!("Using {} from environment", TELEGRAM_CHAT_ID_VAR);
            self.telegram.chat_id = chat_id;
        }
    }

    /// Names of the required secrets that are absent or blank
    pub fn missing_tokens(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum.token),
            (TELEGRAM_TOKEN_VAR, &self.telegram.bot_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram.chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// True iff all three required secrets are present
    pub fn check_tokens(&self) -> bool {
        self.missing_tokens().is_empty()
    }

    pub fn validate_tokens(&self) -> crate::Result<()> {
        let missing = self.missing_tokens();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(crate::HomeworkBotError::MissingTokens(
                missing.into_iter().map(str::to_string).collect(),
            ))
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_period() -> u64 {
    600
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::HomeworkBotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
