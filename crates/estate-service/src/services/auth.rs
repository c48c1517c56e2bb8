//! Authentication service
//!
//! Handles registration, login, session issuance/validation/revocation, and
//! the password-reset flow.

use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use estate_common::auth::{
    generate_session_token, hash_password, is_valid_email_format, validate_password_strength,
    verify_password,
};
use estate_common::AppError;
use estate_core::{Notification, Session, Snowflake, User, UserType};

use crate::dto::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and open a session for them
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);

        if !is_valid_email_format(&email) {
            return Err(ServiceError::App(AppError::Domain(
                estate_core::DomainError::InvalidEmail,
            )));
        }
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Advisory pre-check; the unique index is the real gate
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(ServiceError::from(
                estate_core::DomainError::EmailAlreadyExists,
            ));
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user_id = self.ctx.generate_id();
        let user = User::new(user_id, email, request.full_name.trim().to_string());

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user_id, "user registered");

        let session = self.create_session(user_id, UserType::User).await?;

        Ok(AuthResponse::new(UserResponse::from(&user), session.token))
    }

    /// Login with email and password
    ///
    /// Every failure path collapses to `InvalidCredentials`; the caller never
    /// learns whether the email exists.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash) {
            warn!(user_id = %user.id, "login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        self.ctx.user_repo().touch_last_login(user.id).await?;

        info!(user_id = %user.id, "user logged in");

        let session = self.create_session(user.id, UserType::User).await?;

        Ok(AuthResponse::new(UserResponse::from(&user), session.token))
    }

    /// Revoke a session; revoking an unknown token is a no-op
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> ServiceResult<()> {
        self.ctx.session_repo().delete(token).await?;
        info!("session revoked");
        Ok(())
    }

    /// Look up a session, purging it lazily if expired
    #[instrument(skip(self, token))]
    pub async fn get_session(&self, token: &str) -> ServiceResult<Option<Session>> {
        let Some(session) = self.ctx.session_repo().find_by_token(token).await? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            // Lazy expiry: the caller never observes a stale session
            self.ctx.session_repo().delete(token).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Resolve a session token to its user
    ///
    /// Returns `None` if the session is absent, expired, or the referenced
    /// user no longer exists; absence of proof is unauthenticated, never an
    /// error class of its own.
    #[instrument(skip(self, token))]
    pub async fn resolve_identity(&self, token: &str) -> ServiceResult<Option<User>> {
        let Some(session) = self.get_session(token).await? else {
            return Ok(None);
        };

        self.ctx
            .user_repo()
            .find_by_id(session.user_id)
            .await
            .map_err(ServiceError::from)
    }

    /// Start the password-reset flow
    ///
    /// Always succeeds with the same generic outcome whether or not the email
    /// is registered, to prevent account enumeration.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> ServiceResult<()> {
        let email = normalize_email(&request.email);

        let Some(user) = self.ctx.user_repo().find_by_email(&email).await? else {
            info!("password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_session_token();
        let expires_at =
            Utc::now() + Duration::minutes(self.ctx.settings().reset_token_ttl_minutes);

        self.ctx
            .user_repo()
            .set_reset_token(user.id, &token, expires_at)
            .await?;

        let notification = Notification::new(
            user.email.clone(),
            "Password reset requested",
            format!("Use this token to reset your password: {token}"),
        );
        if let Err(e) = self.ctx.notifier().send(notification).await {
            warn!(user_id = %user.id, error = %e, "password reset notification failed");
        }

        info!(user_id = %user.id, "password reset token issued");
        Ok(())
    }

    /// Complete the password-reset flow
    #[instrument(skip(self, request))]
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> ServiceResult<()> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_reset_token(&request.token)
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid or expired reset token"))?;

        if !user.reset_token_valid(Utc::now()) {
            return Err(ServiceError::validation("Invalid or expired reset token"));
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        // Clears the reset token along with the hash update
        self.ctx
            .user_repo()
            .update_password(user.id, &password_hash)
            .await?;

        info!(user_id = %user.id, "password reset completed");
        Ok(())
    }

    async fn create_session(
        &self,
        user_id: Snowflake,
        user_type: UserType,
    ) -> ServiceResult<Session> {
        let token = generate_session_token();
        let session = Session::with_ttl_days(
            token,
            user_id,
            user_type,
            self.ctx.settings().session_ttl_days,
        );
        self.ctx.session_repo().create(&session).await?;
        Ok(session)
    }
}

/// Case-normalize an email address for storage and lookup
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
