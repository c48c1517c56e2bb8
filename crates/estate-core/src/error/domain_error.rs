//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Favorite not found: {0}")]
    FavoriteNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the owner or an administrator may perform this action")]
    NotOwnerOrAdmin,

    #[error("Administrator role required")]
    AdminRequired,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Slug already in use")]
    SlugAlreadyExists,

    #[error("Property already favorited: {0}")]
    FavoriteAlreadyExists(Snowflake),

    // =========================================================================
    // State Errors
    // =========================================================================
    #[error("Property is not deleted")]
    PropertyNotDeleted,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PropertyNotFound(_) => "UNKNOWN_PROPERTY",
            Self::FavoriteNotFound(_) => "UNKNOWN_FAVORITE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingFields(_) => "MISSING_FIELDS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",

            // Authorization
            Self::NotOwnerOrAdmin => "NOT_OWNER_OR_ADMIN",
            Self::AdminRequired => "ADMIN_REQUIRED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::SlugAlreadyExists => "SLUG_ALREADY_EXISTS",
            Self::FavoriteAlreadyExists(_) => "FAVORITE_ALREADY_EXISTS",

            // State
            Self::PropertyNotDeleted => "PROPERTY_NOT_DELETED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::PropertyNotFound(_) | Self::FavoriteNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::MissingFields(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::RejectionReasonRequired
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotOwnerOrAdmin | Self::AdminRequired)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::SlugAlreadyExists | Self::FavoriteAlreadyExists(_)
        )
    }

    /// Check if this is an invalid-state error (maps to 400, not 409)
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::PropertyNotDeleted)
    }
}
