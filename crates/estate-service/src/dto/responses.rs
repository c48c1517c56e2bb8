//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authenticated user response (never carries the password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Authentication response: the user plus the session token also set as a
/// cookie by the HTTP layer
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub session_token: String,
}

impl AuthResponse {
    pub fn new(user: UserResponse, session_token: String) -> Self {
        Self {
            user,
            session_token,
        }
    }
}

/// Session check response
#[derive(Debug, Serialize)]
pub struct SessionCheckResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl SessionCheckResponse {
    pub fn authenticated(user: UserResponse) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }
}

/// Generic message response (e.g. the enumeration-safe forgot-password reply)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Property Responses
// ============================================================================

/// Full property response
///
/// Structured collection fields are returned deserialized; when stored text
/// is not valid serialized structure, the raw string is passed through.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub status: String,
    pub approval_status: String,
    pub is_verified: bool,
    pub is_featured: bool,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sqft: Option<f64>,
    pub amenities: Value,
    pub images: Value,
    pub keywords: Value,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub view_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Paginated property listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListResponse {
    pub items: Vec<PropertyResponse>,
    pub total: i64,
    pub has_more: bool,
    pub limit: i64,
    pub offset: i64,
}

/// Response to a public view-count increment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCountResponse {
    pub view_count: i64,
}

// ============================================================================
// Favorite Responses
// ============================================================================

/// Favorite response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: String,
    pub user_id: String,
    pub property_id: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness response including the datastore probe result
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
}

impl ReadinessResponse {
    pub fn ready() -> Self {
        Self {
            status: "ready",
            database: "up",
        }
    }

    pub fn degraded() -> Self {
        Self {
            status: "degraded",
            database: "down",
        }
    }
}
