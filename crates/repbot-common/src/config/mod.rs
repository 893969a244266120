//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CommandScope, ConfigError, DatabaseConfig, DenialPolicy,
    DiscordConfig, Environment, PolicyConfig, ServerConfig,
};
