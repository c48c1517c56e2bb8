//! Property entity - a marketplace listing with two orthogonal state axes
//!
//! Approval (pending -> approved | rejected) and soft-deletion are independent
//! small state machines: a property can be pending and soft-deleted at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Category of property being listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[default]
    Residential,
    Commercial,
    Industrial,
    Farmland,
    Rental,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Industrial => "industrial",
            Self::Farmland => "farmland",
            Self::Rental => "rental",
        }
    }

    /// Case-insensitive parse from the stored or query string form
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "residential" => Some(Self::Residential),
            "commercial" => Some(Self::Commercial),
            "industrial" => Some(Self::Industrial),
            "farmland" => Some(Self::Farmland),
            "rental" => Some(Self::Rental),
            _ => None,
        }
    }
}

/// Market status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    #[default]
    Available,
    Sold,
    Reserved,
    UnderConstruction,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
            Self::Reserved => "reserved",
            Self::UnderConstruction => "under_construction",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Some(Self::Available),
            "sold" => Some(Self::Sold),
            "reserved" => Some(Self::Reserved),
            "under_construction" => Some(Self::UnderConstruction),
            _ => None,
        }
    }
}

/// Admin-controlled approval gate determining public visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Property entity
///
/// The structured collection fields (`amenities`, `images`, `keywords`) are
/// stored as serialized JSON text; deserialization back to structured form
/// happens at the service boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: Snowflake,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub approval_status: ApprovalStatus,
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
    pub owner_id: Option<Snowflake>,
    pub approved_by: Option<Snowflake>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub view_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Whether this listing is visible on the public listing surface
    #[inline]
    pub fn is_publicly_visible(&self) -> bool {
        !self.deleted && self.approval_status == ApprovalStatus::Approved
    }

    /// Apply admin approval: verified, published, stamped with the approver
    pub fn approve(&mut self, admin_id: Snowflake, at: DateTime<Utc>) {
        self.approval_status = ApprovalStatus::Approved;
        self.is_verified = true;
        self.approved_by = Some(admin_id);
        self.approved_at = Some(at);
        self.published_at = Some(at);
        self.rejection_reason = None;
        self.updated_at = at;
    }

    /// Apply admin rejection with the mandatory reason
    pub fn reject(&mut self, admin_id: Snowflake, reason: String, at: DateTime<Utc>) {
        self.approval_status = ApprovalStatus::Rejected;
        self.is_verified = false;
        self.approved_by = Some(admin_id);
        self.approved_at = Some(at);
        self.rejection_reason = Some(reason);
        self.updated_at = at;
    }

    /// Mark as soft-deleted; approval status is untouched
    pub fn soft_delete(&mut self, at: DateTime<Utc>) {
        self.deleted = true;
        self.deleted_at = Some(at);
        self.updated_at = at;
    }

    /// Clear the soft-delete flag; prior approval status is preserved
    pub fn restore(&mut self, at: DateTime<Utc>) {
        self.deleted = false;
        self.deleted_at = None;
        self.updated_at = at;
    }

    /// Whether `user_id` is the recorded creator of this listing
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.owner_id == Some(user_id)
    }
}
