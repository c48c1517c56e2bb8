//! PostgreSQL implementation of FavoriteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use estate_core::{DomainError, Favorite, FavoriteRepository, RepoResult, Snowflake};

use crate::models::FavoriteModel;

use super::error::{favorite_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of FavoriteRepository
#[derive(Clone)]
pub struct PgFavoriteRepository {
    pool: PgPool,
}

impl PgFavoriteRepository {
    /// Create a new PgFavoriteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Favorite>> {
        let result = sqlx::query_as::<_, FavoriteModel>(
            r"
            SELECT id, user_id, property_id, created_at
            FROM favorites
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Favorite::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user_and_property(
        &self,
        user_id: Snowflake,
        property_id: Snowflake,
    ) -> RepoResult<Option<Favorite>> {
        let result = sqlx::query_as::<_, FavoriteModel>(
            r"
            SELECT id, user_id, property_id, created_at
            FROM favorites
            WHERE user_id = $1 AND property_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(property_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Favorite::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Favorite>> {
        let results = sqlx::query_as::<_, FavoriteModel>(
            r"
            SELECT id, user_id, property_id, created_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Favorite::from).collect())
    }

    #[instrument(skip(self, favorite))]
    async fn create(&self, favorite: &Favorite) -> RepoResult<()> {
        let id = favorite.id;
        sqlx::query(
            r"
            INSERT INTO favorites (id, user_id, property_id, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(favorite.id.into_inner())
        .bind(favorite.user_id.into_inner())
        .bind(favorite.property_id.into_inner())
        .bind(favorite.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::FavoriteAlreadyExists(id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM favorites WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(favorite_not_found(id));
        }

        Ok(())
    }
}
