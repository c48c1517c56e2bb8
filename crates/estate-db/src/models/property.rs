//! Property database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for properties table
///
/// Enum-valued columns (`property_type`, `status`, `approval_status`, `role`
/// on users) are stored as lowercase TEXT and parsed in the mapper.
#[derive(Debug, Clone, FromRow)]
pub struct PropertyModel {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
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
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqft: Option<f64>,
    pub amenities: String,
    pub images: String,
    pub keywords: String,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub owner_id: Option<i64>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub view_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
