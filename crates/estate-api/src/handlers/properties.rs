//! Property handlers
//!
//! Public browsing plus the authenticated listing lifecycle: create,
//! update, soft-delete/restore, admin approval, and view counting.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use estate_core::Snowflake;
use estate_service::{
    CreatePropertyRequest, MessageResponse, PropertyListQuery, PropertyListResponse,
    PropertyResponse, PropertyService, RejectPropertyRequest, UpdatePropertyRequest,
    ViewCountResponse,
};
use serde::Deserialize;

use crate::extractors::{SessionUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Query parameters for DELETE /properties/:id
#[derive(Debug, Default, Deserialize)]
pub struct DeletePropertyQuery {
    /// When true, bypass the soft-delete and purge the row (admin only)
    #[serde(default)]
    pub permanent: bool,
}

/// Browse the public catalog
///
/// GET /properties
///
/// Only approved, non-deleted listings are visible. Unknown query
/// parameters are ignored.
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<PropertyListQuery>,
) -> ApiResult<Json<PropertyListResponse>> {
    let response = PropertyService::new(state.service_context())
        .list_public(query)
        .await?;
    Ok(Json(response))
}

/// Fetch one listing by id or slug, counting the view
///
/// GET /properties/:id_or_slug
pub async fn get_property(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> ApiResult<Json<PropertyResponse>> {
    let response = PropertyService::new(state.service_context())
        .get_by_id_or_slug(&id_or_slug)
        .await?;
    Ok(Json(response))
}

/// Create a listing; it enters the approval queue as pending
///
/// POST /properties
pub async fn create_property(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
    ValidatedJson(request): ValidatedJson<CreatePropertyRequest>,
) -> ApiResult<Created<Json<PropertyResponse>>> {
    let response = PropertyService::new(state.service_context())
        .create(&user, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Partially update a listing (owner or admin)
///
/// PUT /properties/:id
pub async fn update_property(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePropertyRequest>,
) -> ApiResult<Json<PropertyResponse>> {
    let id = parse_property_id(&id)?;
    let response = PropertyService::new(state.service_context())
        .update(&user, id, request)
        .await?;
    Ok(Json(response))
}

/// Delete a listing: soft-delete by default, purge with ?permanent=true
///
/// DELETE /properties/:id
pub async fn delete_property(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
    Path(id): Path<String>,
    Query(query): Query<DeletePropertyQuery>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_property_id(&id)?;
    let service = PropertyService::new(state.service_context());

    if query.permanent {
        service.purge(&user, id).await?;
        Ok(Json(MessageResponse::new("Property permanently deleted")))
    } else {
        service.soft_delete(&user, id).await?;
        Ok(Json(MessageResponse::new("Property deleted")))
    }
}

/// Approve a pending listing (admin)
///
/// POST /properties/:id/approve
pub async fn approve_property(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PropertyResponse>> {
    let id = parse_property_id(&id)?;
    let response = PropertyService::new(state.service_context())
        .approve(&user, id)
        .await?;
    Ok(Json(response))
}

/// Reject a pending listing with a reason (admin)
///
/// POST /properties/:id/reject
pub async fn reject_property(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<RejectPropertyRequest>,
) -> ApiResult<Json<PropertyResponse>> {
    let id = parse_property_id(&id)?;
    let response = PropertyService::new(state.service_context())
        .reject(&user, id, request)
        .await?;
    Ok(Json(response))
}

/// Bring a soft-deleted listing back (owner or admin)
///
/// POST /properties/:id/restore
pub async fn restore_property(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PropertyResponse>> {
    let id = parse_property_id(&id)?;
    let response = PropertyService::new(state.service_context())
        .restore(&user, id)
        .await?;
    Ok(Json(response))
}

/// Record a view without fetching the listing body
///
/// POST /properties/:id/view
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ViewCountResponse>> {
    let id = parse_property_id(&id)?;
    let view_count = PropertyService::new(state.service_context())
        .increment_view(id)
        .await?;
    Ok(Json(ViewCountResponse { view_count }))
}

/// List the caller's own listings, regardless of state
///
/// GET /users/@me/properties
pub async fn list_own_properties(
    State(state): State<AppState>,
    SessionUser { user }: SessionUser,
    Query(query): Query<PropertyListQuery>,
) -> ApiResult<Json<PropertyListResponse>> {
    let response = PropertyService::new(state.service_context())
        .list_owned(&user, query)
        .await?;
    Ok(Json(response))
}

fn parse_property_id(raw: &str) -> ApiResult<Snowflake> {
    raw.parse::<Snowflake>()
        .map_err(|_| ApiError::invalid_path(format!("Invalid property id: {raw}")))
}
