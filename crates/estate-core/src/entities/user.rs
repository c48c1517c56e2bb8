//! User entity - a registered marketplace account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Account role, the single source of truth for administrative authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Storage-safe string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse from the stored string form; unknown values fall back to `User`
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// User entity representing a marketplace account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub reset_token: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the `user` role and no verification
    pub fn new(id: Snowflake, email: String, full_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            full_name,
            role: Role::User,
            is_verified: false,
            last_login_at: None,
            reset_token: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this account holds the admin role
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether a stored reset token is still usable at `now`
    pub fn reset_token_valid(&self, now: DateTime<Utc>) -> bool {
        match (&self.reset_token, self.reset_token_expires_at) {
            (Some(_), Some(expires_at)) => now < expires_at,
            _ => false,
        }
    }

    /// Record a successful login
    pub fn touch_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
        self.updated_at = at;
    }
}
