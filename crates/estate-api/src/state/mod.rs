//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context and configuration.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use estate_common::AppConfig;
use estate_service::ServiceContext;
use time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Name of the session cookie
    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }

    /// Build the session cookie carrying an issued token
    ///
    /// HttpOnly keeps the token out of script reach; SameSite=Lax still
    /// allows top-level navigations to carry the session.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.config.session.cookie_name.clone(), token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(Duration::days(self.config.session.ttl_days))
            .secure(self.config.app.env.is_production())
            .build()
    }

    /// Build the expired cookie that clears the session on logout
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.config.session.cookie_name.clone(), ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(Duration::ZERO)
            .secure(self.config.app.env.is_production())
            .build()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}
