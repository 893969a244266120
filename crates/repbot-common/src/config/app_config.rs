//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::fmt;

use repbot_core::Snowflake;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub discord: DiscordConfig,
    pub database: DatabaseConfig,
    /// Liveness HTTP endpoint; disabled when no port is configured
    pub liveness: Option<ServerConfig>,
    pub policy: PolicyConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Discord credentials and command registration
#[derive(Clone, Deserialize)]
pub struct DiscordConfig {
    pub token: String,
    pub application_id: u64,
    #[serde(default)]
    pub command_scope: CommandScope,
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"[redacted]")
            .field("application_id", &self.application_id)
            .field("command_scope", &self.command_scope)
            .finish()
    }
}

/// Where slash commands are registered
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommandScope {
    /// Registered once for every server the bot is in
    #[default]
    Global,
    /// Registered per server; updates apply immediately
    Guilds(Vec<Snowflake>),
}

/// Server configuration (liveness endpoint)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// How denied commands are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DenialPolicy {
    /// Disallowed users get no reply at all
    #[default]
    Silent,
    /// Disallowed users are told they may not use the command
    Reply,
}

/// Authorization policy knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub struct PolicyConfig {
    #[serde(default)]
    pub denial: DenialPolicy,
    /// Restrict `configure` and `add_allowed_user` to the server owner
    #[serde(default)]
    pub owner_only_admin: bool,
}

// Default value functions
fn default_app_name() -> String {
    "repbot".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required keys are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };
        let parsed = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            lookup(key)
                .map(|v| v.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue(key, v)))
                .transpose()
        };

        let app = AppSettings {
            name: lookup("APP_NAME").unwrap_or_else(default_app_name),
            env: lookup("APP_ENV")
                .as_deref()
                .and_then(Environment::parse)
                .unwrap_or_default(),
        };

        let application_id = required("APPLICATION_ID")?;
        let discord = DiscordConfig {
            token: required("BOT_TOKEN")?,
            application_id: application_id
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|id| *id != 0)
                .ok_or_else(|| ConfigError::InvalidValue("APPLICATION_ID", application_id.clone()))?,
            command_scope: Self::command_scope(&lookup)?,
        };

        let database = DatabaseConfig {
            url: required("DATABASE_URL")?,
            max_connections: parsed("DATABASE_MAX_CONNECTIONS")?
                .map_or_else(default_max_connections, |v| v as u32),
            min_connections: parsed("DATABASE_MIN_CONNECTIONS")?
                .map_or_else(default_min_connections, |v| v as u32),
        };

        let liveness = match lookup("PORT") {
            Some(port) => Some(ServerConfig {
                host: lookup("LIVENESS_HOST").unwrap_or_else(default_host),
                port: port
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PORT", port.clone()))?,
            }),
            None => None,
        };

        let policy = PolicyConfig {
            denial: match lookup("DENIAL_POLICY").map(|v| v.trim().to_lowercase()) {
                None => DenialPolicy::default(),
                Some(v) if v == "silent" => DenialPolicy::Silent,
                Some(v) if v == "reply" => DenialPolicy::Reply,
                Some(v) => return Err(ConfigError::InvalidValue("DENIAL_POLICY", v)),
            },
            owner_only_admin: match lookup("OWNER_ONLY_ADMIN").map(|v| v.trim().to_lowercase()) {
                None => false,
                Some(v) if matches!(v.as_str(), "1" | "true" | "yes") => true,
                Some(v) if matches!(v.as_str(), "0" | "false" | "no") => false,
                Some(v) => return Err(ConfigError::InvalidValue("OWNER_ONLY_ADMIN", v)),
            },
        };

        Ok(Self {
            app,
            discord,
            database,
            liveness,
            policy,
        })
    }

    fn command_scope<F>(lookup: &F) -> Result<CommandScope, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scope = lookup("COMMAND_SCOPE").map(|v| v.trim().to_lowercase());
        match scope.as_deref() {
            None | Some("global") => Ok(CommandScope::Global),
            Some("guild" | "guilds") => {
                let raw = lookup("COMMAND_GUILD_IDS").ok_or(ConfigError::MissingVar("COMMAND_GUILD_IDS"))?;
                let ids = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        Snowflake::parse(s)
                            .ok()
                            .filter(|id| id.as_u64() != 0)
                            .ok_or_else(|| ConfigError::InvalidValue("COMMAND_GUILD_IDS", s.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if ids.is_empty() {
                    return Err(ConfigError::MissingVar("COMMAND_GUILD_IDS"));
                }
                Ok(CommandScope::Guilds(ids))
            }
            Some(other) => Err(ConfigError::InvalidValue("COMMAND_SCOPE", other.to_string())),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
