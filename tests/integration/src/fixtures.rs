//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            full_name: format!("Test User {suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub session_token: String,
}

/// User response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_verified: bool,
    pub created_at: String,
}

/// Session check response
#[derive(Debug, Deserialize)]
pub struct SessionCheckResponse {
    pub authenticated: bool,
    pub user: Option<UserResponse>,
}

/// Create property request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<serde_json::Value>,
}

impl CreatePropertyRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test Property {suffix}"),
            slug: format!("test-property-{suffix}"),
            description: "A comfortable test listing".to_string(),
            property_type: "residential".to_string(),
            address: format!("{suffix} Main Street"),
            city: "Lakeville".to_string(),
            state: "MN".to_string(),
            postal_code: "55044".to_string(),
            price: 425_000.0,
            bedrooms: Some(3),
            amenities: Some(serde_json::json!(["garage", "garden"])),
        }
    }
}

/// Property response (fields the tests care about)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub status: String,
    pub approval_status: String,
    pub is_verified: bool,
    pub city: String,
    pub price: f64,
    pub amenities: serde_json::Value,
    pub deleted: bool,
    pub owner_id: Option<String>,
    pub rejection_reason: Option<String>,
    pub view_count: i64,
}

/// Paginated property listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListResponse {
    pub items: Vec<PropertyResponse>,
    pub total: i64,
    pub has_more: bool,
    pub limit: i64,
    pub offset: i64,
}

/// View count response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCountResponse {
    pub view_count: i64,
}

/// Create favorite request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoriteRequest {
    pub property_id: String,
}

/// Favorite response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: String,
    pub user_id: String,
    pub property_id: String,
    pub created_at: String,
}

/// Generic message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
