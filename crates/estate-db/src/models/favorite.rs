//! Favorite database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for favorites table
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteModel {
    pub id: i64,
    pub user_id: i64,
    pub property_id: i64,
    pub created_at: DateTime<Utc>,
}
