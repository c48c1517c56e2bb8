//! Session entity <-> model mapper

use estate_core::{Session, Snowflake, UserType};

use crate::models::SessionModel;

impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session {
            token: model.token,
            user_id: Snowflake::new(model.user_id),
            user_type: UserType::from_str_or_default(&model.user_type),
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
