//! Entity -> response DTO mappers

use serde_json::Value;

use estate_core::{Favorite, Property, User};

use super::responses::{FavoriteResponse, PropertyResponse, UserResponse};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role.as_str().to_string(),
            is_verified: user.is_verified,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// Deserialize stored collection text; invalid structure passes through raw
fn structured_or_raw(stored: &str) -> Value {
    serde_json::from_str(stored).unwrap_or_else(|_| Value::String(stored.to_string()))
}

impl From<&Property> for PropertyResponse {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id.to_string(),
            slug: property.slug.clone(),
            title: property.title.clone(),
            description: property.description.clone(),
            property_type: property.property_type.as_str().to_string(),
            status: property.status.as_str().to_string(),
            approval_status: property.approval_status.as_str().to_string(),
            is_verified: property.is_verified,
            is_featured: property.is_featured,
            address: property.address.clone(),
            city: property.city.clone(),
            state: property.state.clone(),
            postal_code: property.postal_code.clone(),
            price: property.price,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            area_sqft: property.area_sqft,
            amenities: structured_or_raw(&property.amenities),
            images: structured_or_raw(&property.images),
            keywords: structured_or_raw(&property.keywords),
            deleted: property.deleted,
            deleted_at: property.deleted_at,
            owner_id: property.owner_id.map(|id| id.to_string()),
            approved_by: property.approved_by.map(|id| id.to_string()),
            approved_at: property.approved_at,
            rejection_reason: property.rejection_reason.clone(),
            view_count: property.view_count,
            published_at: property.published_at,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

impl From<&Favorite> for FavoriteResponse {
    fn from(favorite: &Favorite) -> Self {
        Self {
            id: favorite.id.to_string(),
            user_id: favorite.user_id.to_string(),
            property_id: favorite.property_id.to_string(),
            created_at: favorite.created_at,
        }
    }
}
