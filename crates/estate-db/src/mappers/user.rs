//! User entity <-> model mapper

use estate_core::{Role, Snowflake, User};

use crate::models::UserModel;

/// Convert UserModel to User entity
///
/// The password hash stays in the database layer; the entity never carries it.
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            full_name: model.full_name,
            role: Role::from_str_or_default(&model.role),
            is_verified: model.is_verified,
            last_login_at: model.last_login_at,
            reset_token: model.reset_token,
            reset_token_expires_at: model.reset_token_expires_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
