//! Favorite handlers
//!
//! Bookmarks are private to the session user; another user's favorites
//! are indistinguishable from absent ones.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use estate_core::Snowflake;
use estate_service::{CreateFavoriteRequest, FavoriteResponse, FavoriteService, MessageResponse};
use serde::Deserialize;

use crate::extractors::{SessionUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Query parameters for DELETE /favorites
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFavoriteQuery {
    pub property_id: Option<String>,
}

/// List the caller's favorites, newest first
///
/// GET /favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
) -> ApiResult<Json<Vec<FavoriteResponse>>> {
    let favorites = FavoriteService::new(state.service_context())
        .list(&user)
        .await?;
    Ok(Json(favorites))
}

/// Favorite a property
///
/// POST /favorites
pub async fn create_favorite(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
    ValidatedJson(request): ValidatedJson<CreateFavoriteRequest>,
) -> ApiResult<Created<Json<FavoriteResponse>>> {
    let favorite = FavoriteService::new(state.service_context())
        .create(&user, request)
        .await?;
    Ok(Created(Json(favorite)))
}

/// Remove a favorite by its id
///
/// DELETE /favorites/:id
pub async fn delete_favorite(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = id
        .parse::<Snowflake>()
        .map_err(|_| ApiError::invalid_path(format!("Invalid favorite id: {id}")))?;

    FavoriteService::new(state.service_context())
        .delete(&user, id)
        .await?;

    Ok(Json(MessageResponse::new("Favorite removed")))
}

/// Remove a favorite addressed by the property it points at
///
/// DELETE /favorites?propertyId=...
pub async fn delete_favorite_by_property(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
    Query(query): Query<DeleteFavoriteQuery>,
) -> ApiResult<Json<MessageResponse>> {
    let raw = query
        .property_id
        .ok_or_else(|| ApiError::invalid_query("propertyId query parameter is required"))?;

    let property_id = raw
        .parse::<Snowflake>()
        .map_err(|_| ApiError::invalid_query(format!("Invalid property id: {raw}")))?;

    FavoriteService::new(state.service_context())
        .delete_by_property(&user, property_id)
        .await?;

    Ok(Json(MessageResponse::new("Favorite removed")))
}
