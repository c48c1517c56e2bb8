//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer provides
//! the implementation. Uniqueness invariants (email, slug, favorite pair) are
//! ultimately enforced by storage-level constraints; repository pre-checks
//! exist only to produce friendlier errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Favorite, Property, PropertyStatus, PropertyType, Session, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by case-normalized email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by a pending password-reset token
    async fn find_by_reset_token(&self, token: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash and clear any pending reset token
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;

    /// Store a password-reset token with its expiry
    async fn set_reset_token(
        &self,
        id: Snowflake,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Record a successful login
    async fn touch_last_login(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Look up a session by its opaque token
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<Session>>;

    /// Persist a new session
    async fn create(&self, session: &Session) -> RepoResult<()>;

    /// Delete a session; deleting a missing token is not an error
    async fn delete(&self, token: &str) -> RepoResult<()>;
}

// ============================================================================
// Property Repository
// ============================================================================

/// Sortable fields; anything else requested falls back to `CreatedAt` desc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertySort {
    Id,
    Title,
    Price,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl PropertySort {
    /// Map a requested sort-field name onto the allow-list
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "price" => Some(Self::Price),
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "updatedAt" | "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Typed listing filters, AND-combined; unknown query keys never reach here
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub property_types: Vec<PropertyType>,
    pub status: Option<PropertyStatus>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<i32>,
    pub featured: Option<bool>,
    pub verified: Option<bool>,
    /// Restrict to publicly visible rows (approved, not soft-deleted)
    pub public_only: bool,
    /// Restrict to a single owner (the "my properties" view)
    pub owner_id: Option<Snowflake>,
}

/// Full listing query: filters + sort + offset pagination
#[derive(Debug, Clone, Default)]
pub struct PropertyQuery {
    pub filter: PropertyFilter,
    pub sort: PropertySort,
    pub direction: SortDirection,
    pub limit: i64,
    pub offset: i64,
}

/// One page of listing results with the unpaginated total
#[derive(Debug, Clone)]
pub struct PropertyPage {
    pub items: Vec<Property>,
    pub total: i64,
}

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Find property by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Property>>;

    /// Find property by slug
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Property>>;

    /// Check slug uniqueness (soft-deleted rows included)
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool>;

    /// Create a new property
    async fn create(&self, property: &Property) -> RepoResult<()>;

    /// Persist the full current state of a property
    async fn update(&self, property: &Property) -> RepoResult<()>;

    /// Irreversibly remove a property row
    async fn purge(&self, id: Snowflake) -> RepoResult<()>;

    /// Atomically bump the view counter, returning the new value
    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<i64>>;

    /// Filtered, sorted, paginated listing with total count
    async fn list(&self, query: &PropertyQuery) -> RepoResult<PropertyPage>;

    /// Approve: set approval fields and verification in one statement
    async fn mark_approved(
        &self,
        id: Snowflake,
        admin_id: Snowflake,
        at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Reject: set approval fields and the mandatory reason in one statement
    async fn mark_rejected(
        &self,
        id: Snowflake,
        admin_id: Snowflake,
        reason: &str,
        at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Set the soft-delete flag and timestamp
    async fn mark_deleted(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;

    /// Clear the soft-delete flag and timestamp
    async fn mark_restored(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Favorite Repository
// ============================================================================

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Find favorite by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Favorite>>;

    /// Find the favorite a user holds on a property, if any
    async fn find_by_user_and_property(
        &self,
        user_id: Snowflake,
        property_id: Snowflake,
    ) -> RepoResult<Option<Favorite>>;

    /// List all favorites for a user, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Favorite>>;

    /// Create a favorite
    async fn create(&self, favorite: &Favorite) -> RepoResult<()>;

    /// Delete a favorite by its ID
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}
