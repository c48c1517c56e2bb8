//! # estate-common
//!
//! Shared utilities including configuration, error handling, credential and
//! token primitives, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_session_token, hash_password, is_valid_email_format, validate_password_strength,
    verify_password,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, NotifyConfig,
    RateLimitConfig, ServerConfig, SessionConfig, SnowflakeConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
