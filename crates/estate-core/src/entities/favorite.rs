//! Favorite entity - a bookmark linking a user to a property

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Favorite entity; at most one per (user, property) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub property_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(id: Snowflake, user_id: Snowflake, property_id: Snowflake) -> Self {
        Self {
            id,
            user_id,
            property_id,
            created_at: Utc::now(),
        }
    }
}
