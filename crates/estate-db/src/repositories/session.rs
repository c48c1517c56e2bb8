//! PostgreSQL implementation of SessionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use estate_core::{RepoResult, Session, SessionRepository};

use crate::models::SessionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SessionRepository
///
/// Rows are stored keyed by the opaque token. Expiry is checked by the
/// service (lazy purge); there is no background reaper.
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new PgSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, token))]
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<Session>> {
        let result = sqlx::query_as::<_, SessionModel>(
            r"
            SELECT token, user_id, user_type, expires_at, created_at
            FROM sessions
            WHERE token = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Session::from))
    }

    #[instrument(skip(self, session))]
    async fn create(&self, session: &Session) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO sessions (token, user_id, user_type, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&session.token)
        .bind(session.user_id.into_inner())
        .bind(session.user_type.as_str())
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn delete(&self, token: &str) -> RepoResult<()> {
        // Deleting an absent token is a no-op, not an error
        sqlx::query(
            r"
            DELETE FROM sessions WHERE token = $1
            ",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
