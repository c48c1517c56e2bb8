//! Session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for sessions table
#[derive(Debug, Clone, FromRow)]
pub struct SessionModel {
    pub token: String,
    pub user_id: i64,
    pub user_type: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
