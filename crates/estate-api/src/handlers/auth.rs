//! Authentication handlers
//!
//! Registration, login, logout, session introspection, and the
//! password-reset flow. Sessions travel in an HttpOnly cookie.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use estate_service::{
    AuthResponse, AuthService, ForgotPasswordRequest, LoginRequest, MessageResponse,
    RegisterRequest, ResetPasswordRequest, SessionCheckResponse, UserResponse,
};

use crate::extractors::{OptionalSessionUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let response = AuthService::new(state.service_context())
        .register(request)
        .await?;

    let jar = jar.add(state.session_cookie(response.session_token.clone()));
    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let response = AuthService::new(state.service_context())
        .login(request)
        .await?;

    let jar = jar.add(state.session_cookie(response.session_token.clone()));
    Ok((jar, Json(response)))
}

/// Revoke the current session and clear the cookie
///
/// POST /auth/logout
///
/// Succeeds whether or not a valid session cookie was presented.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    if let Some(cookie) = jar.get(state.cookie_name()) {
        AuthService::new(state.service_context())
            .logout(cookie.value())
            .await?;
    }

    let jar = jar.remove(state.removal_cookie());
    Ok((jar, Json(MessageResponse::new("Logged out"))))
}

/// Check whether the request carries a live session
///
/// GET /auth/session
///
/// Anonymous and expired sessions both answer 401 with
/// `authenticated: false` rather than an error envelope.
pub async fn session_check(
    user: OptionalSessionUser,
) -> (StatusCode, Json<SessionCheckResponse>) {
    match user.0 {
        Some(session_user) => (
            StatusCode::OK,
            Json(SessionCheckResponse::authenticated(UserResponse::from(
                &session_user.user,
            ))),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(SessionCheckResponse::anonymous()),
        ),
    }
}

/// Start the password-reset flow
///
/// POST /auth/forgot-password
///
/// The reply is identical for known and unknown addresses.
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::new(state.service_context())
        .forgot_password(request)
        .await?;

    Ok(Json(MessageResponse::new(
        "If that email is registered, a reset link has been sent",
    )))
}

/// Complete the password-reset flow
///
/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::new(state.service_context())
        .reset_password(request)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}
