//! Session entity - an opaque browsing session tied to a user

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Fixed session lifetime in days
pub const SESSION_TTL_DAYS: i64 = 30;

/// Which account class the session was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    User,
    Investor,
    Partner,
}

impl UserType {
    /// Storage-safe string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Investor => "investor",
            Self::Partner => "partner",
        }
    }

    /// Parse from the stored string form; unknown values fall back to `User`
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "investor" => Self::Investor,
            "partner" => Self::Partner,
            _ => Self::User,
        }
    }
}

/// Session entity keyed by an opaque high-entropy token
///
/// A session is valid iff it exists and `now < expires_at`. Expired rows are
/// purged lazily on lookup, so callers never observe a stale session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: Snowflake,
    pub user_type: UserType,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a session expiring `SESSION_TTL_DAYS` from now
    pub fn new(token: String, user_id: Snowflake, user_type: UserType) -> Self {
        Self::with_ttl_days(token, user_id, user_type, SESSION_TTL_DAYS)
    }

    /// Create a session with an explicit lifetime in days
    pub fn with_ttl_days(
        token: String,
        user_id: Snowflake,
        user_type: UserType,
        ttl_days: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            user_type,
            expires_at: now + Duration::days(ttl_days),
            created_at: now,
        }
    }

    /// Whether the session has passed its expiry at `now`
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
