//! Favorite entity <-> model mapper

use estate_core::{Favorite, Snowflake};

use crate::models::FavoriteModel;

impl From<FavoriteModel> for Favorite {
    fn from(model: FavoriteModel) -> Self {
        Favorite {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            property_id: Snowflake::new(model.property_id),
            created_at: model.created_at,
        }
    }
}
