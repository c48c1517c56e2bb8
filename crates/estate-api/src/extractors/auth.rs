//! Session extractor
//!
//! Resolves the opaque session cookie to a full user record.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use estate_core::User;
use estate_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the session cookie
///
/// Extraction fails with 401 when the cookie is absent, or when the token it
/// carries no longer maps to a live session and user.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user: User,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // CookieJar extraction is infallible
        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(err) => match err {},
        };

        let app_state = AppState::from_ref(state);

        let token = jar
            .get(app_state.cookie_name())
            .map(|cookie| cookie.value().to_string())
            .ok_or(ApiError::MissingAuth)?;

        let user = AuthService::new(app_state.service_context())
            .resolve_identity(&token)
            .await?
            .ok_or_else(|| {
                tracing::debug!("session token did not resolve to a user");
                ApiError::InvalidSession
            })?;

        Ok(SessionUser { user })
    }
}

/// Optional session user
///
/// Resolves to None when the cookie is absent or the session is invalid or
/// expired; only backend faults surface as errors.
#[derive(Debug, Clone)]
pub struct OptionalSessionUser(pub Option<SessionUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalSessionUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // CookieJar extraction is infallible
        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(err) => match err {},
        };

        let app_state = AppState::from_ref(state);

        let Some(token) = jar
            .get(app_state.cookie_name())
            .map(|cookie| cookie.value().to_string())
        else {
            return Ok(OptionalSessionUser(None));
        };

        let user = AuthService::new(app_state.service_context())
            .resolve_identity(&token)
            .await?;

        Ok(OptionalSessionUser(user.map(|user| SessionUser { user })))
    }
}
