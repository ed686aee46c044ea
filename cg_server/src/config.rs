//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use chat_games::{
    commands::{DispatcherConfig, dispatcher::DEFAULT_BOT_USERNAME},
    records::CooldownPolicy,
};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Upper bound for `PURGE_COUNT`
pub const MAX_PURGE_COUNT: u32 = 100;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Directory holding one JSON record file per chat
    pub data_dir: PathBuf,
    /// Bot identity and command behaviour
    pub bot: BotConfig,
    /// Cooldowns between chance game rounds
    pub cooldowns: CooldownConfig,
    /// External score service; scores are only logged when absent
    pub score_service: Option<ScoreServiceConfig>,
}

/// Bot identity and command behaviour
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Username commands may be suffixed with
    pub username: String,
    /// Username allowed to run /delete
    pub admin: Option<String>,
    /// Messages removed by /delete
    pub purge_count: u32,
    /// Pause between wheel animation frames
    pub wheel_frame_delay_ms: u64,
}

/// Cooldowns in minutes
#[derive(Debug, Clone)]
pub struct CooldownConfig {
    pub slot_machine_mins: u32,
    pub blackjack_mins: u32,
    pub spin_mins: u32,
}

/// Score service connection
#[derive(Debug, Clone)]
pub struct ScoreServiceConfig {
    /// Base URL, e.g. `http://scores.internal:5000`
    pub url: String,
    /// Shared secret sent with every request (required with a URL)
    pub secret: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `data_dir_override` - Optional data directory override (from CLI args)
    ///
    /// # Returns
    ///
    /// * `Result<ServerConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        data_dir_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), bind_override, data_dir_override)
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// [`ServerConfig::from_env`] is this with the process environment.
    pub fn from_lookup<F>(
        env: F,
        bind_override: Option<SocketAddr>,
        data_dir_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Bind address
        let bind = match bind_override {
            Some(bind) => bind,
            None => {
                let raw = env("SERVER_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
                raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "SERVER_BIND".to_string(),
                    reason: format!("'{raw}' is not an IP:PORT address"),
                })?
            }
        };

        let data_dir = data_dir_override
            .or_else(|| env("DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let bot = BotConfig {
            username: env("BOT_USERNAME")
                .map(|name| name.trim_start_matches('@').to_string())
                .unwrap_or_else(|| DEFAULT_BOT_USERNAME.to_string()),
            admin: env("BOT_ADMIN")
                .map(|name| name.trim_start_matches('@').to_string())
                .filter(|name| !name.is_empty()),
            purge_count: parse_env_or(&env, "PURGE_COUNT", 50),
            wheel_frame_delay_ms: parse_env_or(&env, "WHEEL_FRAME_DELAY_MS", 1000),
        };

        let cooldowns = CooldownConfig {
            slot_machine_mins: parse_env_or(&env, "COOLDOWN_SLOTMACHINE_MINS", 30),
            blackjack_mins: parse_env_or(&env, "COOLDOWN_BLACKJACK_MINS", 15),
            spin_mins: parse_env_or(&env, "COOLDOWN_SPIN_MINS", 15),
        };

        // Score service (the secret is REQUIRED once a URL is set)
        let score_service = match env("SCORE_SERVICE_URL").filter(|url| !url.is_empty()) {
            Some(url) => {
                let secret = env("SCORE_SERVICE_SECRET").ok_or_else(|| {
                    ConfigError::MissingRequired {
                        var: "SCORE_SERVICE_SECRET".to_string(),
                        hint: "Set it to the secret shared with the score service".to_string(),
                    }
                })?;
                Some(ScoreServiceConfig {
                    url,
                    secret,
                    timeout_secs: parse_env_or(&env, "SCORE_SERVICE_TIMEOUT_SECS", 5),
                })
            }
            None => None,
        };

        Ok(ServerConfig {
            bind,
            data_dir,
            bot,
            cooldowns,
            score_service,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.username.is_empty() {
            return Err(ConfigError::Invalid {
                var: "BOT_USERNAME".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.bot.purge_count == 0 || self.bot.purge_count > MAX_PURGE_COUNT {
            return Err(ConfigError::Invalid {
                var: "PURGE_COUNT".to_string(),
                reason: format!("Must be between 1 and {MAX_PURGE_COUNT}"),
            });
        }

        if let Some(score) = &self.score_service {
            if !(score.url.starts_with("http://") || score.url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    var: "SCORE_SERVICE_URL".to_string(),
                    reason: "Must start with http:// or https://".to_string(),
                });
            }

            if score.secret.is_empty() {
                return Err(ConfigError::Invalid {
                    var: "SCORE_SERVICE_SECRET".to_string(),
                    reason: "Must not be empty".to_string(),
                });
            }

            if score.timeout_secs == 0 {
                return Err(ConfigError::Invalid {
                    var: "SCORE_SERVICE_TIMEOUT_SECS".to_string(),
                    reason: "Must be greater than 0".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Settings for the command dispatcher
    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            bot_username: self.bot.username.clone(),
            admin_username: self.bot.admin.clone(),
            cooldowns: CooldownPolicy::from_minutes(
                self.cooldowns.slot_machine_mins,
                self.cooldowns.blackjack_mins,
                self.cooldowns.spin_mins,
            ),
            purge_count: self.bot.purge_count,
            wheel_frame_delay: Duration::from_millis(self.bot.wheel_frame_delay_ms),
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T, F>(env: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    env(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
