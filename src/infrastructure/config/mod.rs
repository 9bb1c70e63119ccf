//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;

pub const TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub channels: ChannelsConfig,
    pub feed: FeedConfig,
    pub discord: DiscordConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    pub presence: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChannelsConfig {
    pub welcome: String,
    pub lounges: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FeedConfig {
    pub url: String,
    pub source_name: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiscordConfig {
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "internet-times-bot".to_string(),
                prefix: "!".to_string(),
                presence: "The Internet Times 📡".to_string(),
            },
            channels: ChannelsConfig {
                welcome: "👋ᴡᴇʟᴄᴏᴍᴇ".to_string(),
                lounges: vec![
                    "🛋️ʟᴏᴜɴɢᴇ-1".to_string(),
                    "🛋️ʟᴏᴜɴɢᴇ-2".to_string(),
                    "🛋️ʟᴏᴜɴɢᴇ-3".to_string(),
                ],
            },
            feed: FeedConfig {
                url: "http://www.theverge.com/rss/index.xml".to_string(),
                source_name: "The Verge".to_string(),
                timeout_seconds: 10,
            },
            discord: DiscordConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the optional file, then apply environment overrides
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Config::default()
        };

        if let Ok(token) = std::env::var(TOKEN_ENV) {
            config.discord.token = Some(token);
        }
        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            config.bot.prefix = prefix;
            config.validate()?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }
        if self.feed.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue("feed.timeout-seconds must be positive".to_string()));
        }
        Ok(())
    }

    /// The gateway token; absence is fatal for `run`
    pub fn token(&self) -> Result<&str, ConfigError> {
        self.discord
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField(TOKEN_ENV.to_string()))
    }
}
