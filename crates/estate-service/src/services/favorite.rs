//! Favorites service
//!
//! A favorite is a (user, property) bookmark; at most one per pair.

use chrono::Utc;
use tracing::{info, instrument};

use estate_core::{DomainError, Favorite, Snowflake, User};

use crate::dto::{CreateFavoriteRequest, FavoriteResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Favorites service
pub struct FavoriteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FavoriteService<'a> {
    /// Create a new FavoriteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the actor's favorites, newest first
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn list(&self, actor: &User) -> ServiceResult<Vec<FavoriteResponse>> {
        let favorites = self.ctx.favorite_repo().find_by_user(actor.id).await?;
        Ok(favorites.iter().map(FavoriteResponse::from).collect())
    }

    /// Favorite a property for the actor
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn create(
        &self,
        actor: &User,
        request: CreateFavoriteRequest,
    ) -> ServiceResult<FavoriteResponse> {
        let property_id = request
            .property_id
            .parse::<Snowflake>()
            .map_err(|_| ServiceError::validation("propertyId must be a numeric identifier"))?;

        // The property must exist before it can be favorited
        if self
            .ctx
            .property_repo()
            .find_by_id(property_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Property", request.property_id));
        }

        // Advisory duplicate check carrying the existing id; the unique index
        // is the real gate
        if let Some(existing) = self
            .ctx
            .favorite_repo()
            .find_by_user_and_property(actor.id, property_id)
            .await?
        {
            return Err(ServiceError::from(DomainError::FavoriteAlreadyExists(
                existing.id,
            )));
        }

        let favorite = Favorite {
            id: self.ctx.generate_id(),
            user_id: actor.id,
            property_id,
            created_at: Utc::now(),
        };

        self.ctx.favorite_repo().create(&favorite).await?;

        info!(favorite_id = %favorite.id, "favorite created");
        Ok(FavoriteResponse::from(&favorite))
    }

    /// Remove one of the actor's favorites by favorite id
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete(&self, actor: &User, id: Snowflake) -> ServiceResult<()> {
        let favorite = self
            .ctx
            .favorite_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Favorite", id.to_string()))?;

        if favorite.user_id != actor.id {
            // Another user's favorite is invisible, not forbidden
            return Err(ServiceError::not_found("Favorite", id.to_string()));
        }

        self.ctx.favorite_repo().delete(id).await?;

        info!(favorite_id = %id, "favorite deleted");
        Ok(())
    }

    /// Remove the actor's favorite on a property, addressed by property id
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete_by_property(
        &self,
        actor: &User,
        property_id: Snowflake,
    ) -> ServiceResult<()> {
        let favorite = self
            .ctx
            .favorite_repo()
            .find_by_user_and_property(actor.id, property_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Favorite", property_id.to_string()))?;

        self.ctx.favorite_repo().delete(favorite.id).await?;

        info!(favorite_id = %favorite.id, "favorite deleted");
        Ok(())
    }
}
