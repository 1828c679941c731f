//! Delivery configuration for the Telegram channel
//!
//! The interactive console persists the credential pair as a JSON record on
//! disk; the scheduled runner reads the same pair from the environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::Error;

/// File that mirrors the in-memory config between sessions.
pub const CONFIG_FILE: &str = "telegram_config.json";

/// Telegram delivery credentials.
///
/// Both fields empty is a valid state - the console starts that way - but
/// delivery is refused until both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(rename = "botToken", default)]
    pub bot_token: String,
    #[serde(rename = "chatId", default)]
    pub chat_id: String,
}

impl DeliveryConfig {
    pub fn new(bot_token: &str, chat_id: &str) -> Self {
        Self {
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    /// Read credentials from TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| Error::InvalidArgument("TELEGRAM_BOT_TOKEN not set".to_string()))?;
        let chat_id = env::var("TELEGRAM_CHAT_ID")
            .map_err(|_| Error::InvalidArgument("TELEGRAM_CHAT_ID not set".to_string()))?;
        Ok(Self { bot_token, chat_id })
    }

    /// Both credential fields present.
    pub fn is_complete(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }
}

/// Load/save wrapper around the persisted JSON record.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(CONFIG_FILE),
        }
    }

    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored record. A missing file means an empty config, not an
    /// error.
    pub fn load(&self) -> Result<DeliveryConfig> {
        if !self.path.exists() {
            return Ok(DeliveryConfig::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Serialize the credential pair and overwrite the stored record.
    pub fn save(&self, config: &DeliveryConfig) -> Result<()> {
        let raw = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
