//! Service context - dependency container for services
//!
//! Holds all repositories, the notifier port, and other dependencies needed
//! by services.

use std::sync::Arc;

use estate_core::{
    FavoriteRepository, Notifier, PropertyRepository, SessionRepository, SnowflakeGenerator,
    UserRepository,
};
use estate_db::PgPool;

/// Tunable settings carried alongside the dependency container
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Administrative address copied on new-listing notifications
    pub admin_email: String,
    /// Session lifetime in days
    pub session_ttl_days: i64,
    /// Password-reset token lifetime in minutes
    pub reset_token_ttl_minutes: i64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            admin_email: "listings@estate.example".to_string(),
            session_ttl_days: estate_core::SESSION_TTL_DAYS,
            reset_token_ttl_minutes: 60,
        }
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The notification port (best-effort delivery)
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool (kept for readiness probes)
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    property_repo: Arc<dyn PropertyRepository>,
    favorite_repo: Arc<dyn FavoriteRepository>,

    // Ports
    notifier: Arc<dyn Notifier>,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,

    settings: ServiceSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        property_repo: Arc<dyn PropertyRepository>,
        favorite_repo: Arc<dyn FavoriteRepository>,
        notifier: Arc<dyn Notifier>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            pool,
            user_repo,
            session_repo,
            property_repo,
            favorite_repo,
            notifier,
            snowflake_generator,
            settings,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    /// Get the property repository
    pub fn property_repo(&self) -> &dyn PropertyRepository {
        self.property_repo.as_ref()
    }

    /// Get the favorite repository
    pub fn favorite_repo(&self) -> &dyn FavoriteRepository {
        self.favorite_repo.as_ref()
    }

    /// Get the notification port
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> estate_core::Snowflake {
        self.snowflake_generator.generate()
    }

    /// Get the tunable settings
    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    property_repo: Option<Arc<dyn PropertyRepository>>,
    favorite_repo: Option<Arc<dyn FavoriteRepository>>,
    notifier: Option<Arc<dyn Notifier>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    settings: ServiceSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            session_repo: None,
            property_repo: None,
            favorite_repo: None,
            notifier: None,
            snowflake_generator: None,
            settings: ServiceSettings::default(),
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn property_repo(mut self, repo: Arc<dyn PropertyRepository>) -> Self {
        self.property_repo = Some(repo);
        self
    }

    pub fn favorite_repo(mut self, repo: Arc<dyn FavoriteRepository>) -> Self {
        self.favorite_repo = Some(repo);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.session_repo
                .ok_or_else(|| ServiceError::validation("session_repo is required"))?,
            self.property_repo
                .ok_or_else(|| ServiceError::validation("property_repo is required"))?,
            self.favorite_repo
                .ok_or_else(|| ServiceError::validation("favorite_repo is required"))?,
            self.notifier
                .ok_or_else(|| ServiceError::validation("notifier is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            self.settings,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
