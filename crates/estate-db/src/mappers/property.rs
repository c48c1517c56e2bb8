//! Property entity <-> model mapper

use estate_core::{ApprovalStatus, Property, PropertyStatus, PropertyType, Snowflake};

use crate::models::PropertyModel;

/// Convert PropertyModel to Property entity
///
/// Enum columns hold values written through `as_str`, so parse failures only
/// arise from rows edited outside the application; those fall back to defaults.
impl From<PropertyModel> for Property {
    fn from(model: PropertyModel) -> Self {
        Property {
            id: Snowflake::new(model.id),
            slug: model.slug,
            title: model.title,
            description: model.description,
            property_type: PropertyType::parse(&model.property_type).unwrap_or_default(),
            status: PropertyStatus::parse(&model.status).unwrap_or_default(),
            approval_status: ApprovalStatus::parse(&model.approval_status).unwrap_or_default(),
            is_verified: model.is_verified,
            is_featured: model.is_featured,
            address: model.address,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            price: model.price,
            bedrooms: model.bedrooms,
            bathrooms: model.bathrooms,
            area_sqft: model.area_sqft,
            amenities: model.amenities,
            images: model.images,
            keywords: model.keywords,
            deleted: model.deleted,
            deleted_at: model.deleted_at,
            owner_id: model.owner_id.map(Snowflake::new),
            approved_by: model.approved_by.map(Snowflake::new),
            approved_at: model.approved_at,
            rejection_reason: model.rejection_reason,
            view_count: model.view_count,
            published_at: model.published_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
