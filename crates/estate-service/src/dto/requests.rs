//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those with field-level rules also
//! implement `Validate`.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Forgot-password request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Reset-password request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

// ============================================================================
// Property Requests
// ============================================================================

/// A structured collection field that arrives either already serialized or as
/// a JSON list; both forms end up in the same stored representation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    Text(String),
    List(Vec<Value>),
}

impl StringOrList {
    /// Normalize to the serialized storage form
    ///
    /// Already-valid JSON text passes through unchanged, so re-submitting a
    /// stored value is idempotent.
    #[must_use]
    pub fn into_stored(self) -> String {
        match self {
            Self::Text(s) => {
                if serde_json::from_str::<Value>(&s).is_ok() {
                    s
                } else {
                    Value::String(s).to_string()
                }
            }
            Self::List(items) => Value::Array(items).to_string(),
        }
    }
}

/// Create property request
///
/// Required fields are optional at the deserialization layer so the service
/// can report every missing field at once instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqft: Option<f64>,
    pub amenities: Option<StringOrList>,
    pub images: Option<StringOrList>,
    pub keywords: Option<StringOrList>,
    pub is_featured: Option<bool>,
}

/// Update property request - partial patch, omitted fields keep prior values
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqft: Option<f64>,
    pub amenities: Option<StringOrList>,
    pub images: Option<StringOrList>,
    pub keywords: Option<StringOrList>,
    pub is_featured: Option<bool>,
}

/// Reject property request - the reason is mandatory and non-empty
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RejectPropertyRequest {
    pub reason: Option<String>,
}

/// Listing query parameters as they arrive on the wire
///
/// Unknown keys are ignored by serde; typed filters are built from this in
/// the service layer. `type` accepts a comma-separated list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<i32>,
    pub featured: Option<bool>,
    pub verified: Option<bool>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ============================================================================
// Favorite Requests
// ============================================================================

/// Create favorite request; the property ID arrives as a string-form Snowflake
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoriteRequest {
    #[validate(length(min = 1, message = "propertyId is required"))]
    pub property_id: String,
}
