//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, NotifyConfig,
    RateLimitConfig, ServerConfig, SessionConfig, SnowflakeConfig,
};
