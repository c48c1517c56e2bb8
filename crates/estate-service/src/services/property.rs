//! Property lifecycle service
//!
//! Owns the approval and soft-delete state machines and the authorization
//! rules for moving listings between states.

use chrono::Utc;
use tracing::{info, instrument, warn};

use estate_core::{
    ApprovalStatus, DomainError, Notification, Property, PropertyFilter, PropertyQuery,
    PropertySort, PropertyStatus, PropertyType, Snowflake, SortDirection, User,
};

use crate::dto::{
    CreatePropertyRequest, PropertyListQuery, PropertyListResponse, PropertyResponse,
    RejectPropertyRequest, UpdatePropertyRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Default page size for listings
pub const DEFAULT_PAGE_LIMIT: i64 = 50;
/// Upper bound on requested page size
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Property lifecycle service
pub struct PropertyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PropertyService<'a> {
    /// Create a new PropertyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a listing in the pending approval state
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn create(
        &self,
        actor: &User,
        request: CreatePropertyRequest,
    ) -> ServiceResult<PropertyResponse> {
        let missing = missing_required_fields(&request);
        if !missing.is_empty() {
            return Err(ServiceError::from(DomainError::MissingFields(missing)));
        }

        // The sweep above guarantees presence of every required field
        let title = request.title.unwrap_or_default();
        let slug = request.slug.unwrap_or_default();
        let description = request.description.unwrap_or_default();
        let type_raw = request.property_type.unwrap_or_default();
        let address = request.address.unwrap_or_default();
        let city = request.city.unwrap_or_default();
        let state = request.state.unwrap_or_default();
        let postal_code = request.postal_code.unwrap_or_default();
        let price = request.price.unwrap_or_default();

        let property_type = PropertyType::parse(&type_raw)
            .ok_or_else(|| ServiceError::validation(format!("Unknown property type: {type_raw}")))?;
        let status = match request.status.as_deref() {
            Some(raw) => PropertyStatus::parse(raw)
                .ok_or_else(|| ServiceError::validation(format!("Unknown status: {raw}")))?,
            None => PropertyStatus::default(),
        };

        // Advisory pre-check; the unique index is the real gate and covers
        // soft-deleted rows too
        if self.ctx.property_repo().slug_exists(&slug).await? {
            return Err(ServiceError::from(DomainError::SlugAlreadyExists));
        }

        let now = Utc::now();
        let property = Property {
            id: self.ctx.generate_id(),
            slug,
            title,
            description,
            property_type,
            status,
            approval_status: ApprovalStatus::Pending,
            is_verified: false,
            is_featured: request.is_featured.unwrap_or(false),
            address,
            city,
            state,
            postal_code,
            price,
            bedrooms: request.bedrooms,
            bathrooms: request.bathrooms,
            area_sqft: request.area_sqft,
            amenities: request
                .amenities
                .map_or_else(|| "[]".to_string(), |v| v.into_stored()),
            images: request
                .images
                .map_or_else(|| "[]".to_string(), |v| v.into_stored()),
            keywords: request
                .keywords
                .map_or_else(|| "[]".to_string(), |v| v.into_stored()),
            deleted: false,
            deleted_at: None,
            owner_id: Some(actor.id),
            approved_by: None,
            approved_at: None,
            rejection_reason: None,
            view_count: 0,
            published_at: None,
            created_at: now,
            updated_at: now,
        };

        self.ctx.property_repo().create(&property).await?;

        info!(property_id = %property.id, "property created");

        self.notify(Notification::new(
            actor.email.clone(),
            "Listing received",
            format!(
                "Your listing \"{}\" was received and is awaiting review.",
                property.title
            ),
        ))
        .await;
        self.notify(Notification::new(
            self.ctx.settings().admin_email.clone(),
            "New listing awaiting review",
            format!("Listing \"{}\" ({}) is pending approval.", property.title, property.slug),
        ))
        .await;

        Ok(PropertyResponse::from(&property))
    }

    /// Fetch by numeric id or slug, counting the view
    ///
    /// Numeric-looking strings are treated as identifiers. Every successful
    /// fetch increments the view counter by exactly one.
    #[instrument(skip(self))]
    pub async fn get_by_id_or_slug(&self, id_or_slug: &str) -> ServiceResult<PropertyResponse> {
        let mut property = self
            .resolve(id_or_slug)
            .await?
            .ok_or_else(|| ServiceError::not_found("Property", id_or_slug))?;

        let new_count = self
            .ctx
            .property_repo()
            .increment_views(property.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Property", id_or_slug))?;
        property.view_count = new_count;

        Ok(PropertyResponse::from(&property))
    }

    /// Public listing: only approved, non-deleted properties are visible
    #[instrument(skip(self, query))]
    pub async fn list_public(&self, query: PropertyListQuery) -> ServiceResult<PropertyListResponse> {
        let property_query = build_query(query, true, None)?;
        self.run_list(property_query).await
    }

    /// Owner view: every listing the actor created, regardless of state
    #[instrument(skip(self, actor, query), fields(actor_id = %actor.id))]
    pub async fn list_owned(
        &self,
        actor: &User,
        query: PropertyListQuery,
    ) -> ServiceResult<PropertyListResponse> {
        let property_query = build_query(query, false, Some(actor.id))?;
        self.run_list(property_query).await
    }

    /// Partial update; only supplied fields are overwritten
    #[instrument(skip(self, actor, patch), fields(actor_id = %actor.id))]
    pub async fn update(
        &self,
        actor: &User,
        id: Snowflake,
        patch: UpdatePropertyRequest,
    ) -> ServiceResult<PropertyResponse> {
        let mut property = self.require(id).await?;
        ensure_owner_or_admin(actor, &property)?;

        if let Some(slug) = patch.slug {
            if slug != property.slug && self.ctx.property_repo().slug_exists(&slug).await? {
                return Err(ServiceError::from(DomainError::SlugAlreadyExists));
            }
            property.slug = slug;
        }
        if let Some(title) = patch.title {
            property.title = title;
        }
        if let Some(description) = patch.description {
            property.description = description;
        }
        if let Some(raw) = patch.property_type {
            property.property_type = PropertyType::parse(&raw)
                .ok_or_else(|| ServiceError::validation(format!("Unknown property type: {raw}")))?;
        }
        if let Some(raw) = patch.status {
            property.status = PropertyStatus::parse(&raw)
                .ok_or_else(|| ServiceError::validation(format!("Unknown status: {raw}")))?;
        }
        if let Some(address) = patch.address {
            property.address = address;
        }
        if let Some(city) = patch.city {
            property.city = city;
        }
        if let Some(state) = patch.state {
            property.state = state;
        }
        if let Some(postal_code) = patch.postal_code {
            property.postal_code = postal_code;
        }
        if let Some(price) = patch.price {
            property.price = price;
        }
        if let Some(bedrooms) = patch.bedrooms {
            property.bedrooms = Some(bedrooms);
        }
        if let Some(bathrooms) = patch.bathrooms {
            property.bathrooms = Some(bathrooms);
        }
        if let Some(area_sqft) = patch.area_sqft {
            property.area_sqft = Some(area_sqft);
        }
        if let Some(amenities) = patch.amenities {
            property.amenities = amenities.into_stored();
        }
        if let Some(images) = patch.images {
            property.images = images.into_stored();
        }
        if let Some(keywords) = patch.keywords {
            property.keywords = keywords.into_stored();
        }
        if let Some(is_featured) = patch.is_featured {
            property.is_featured = is_featured;
        }
        property.updated_at = Utc::now();

        self.ctx.property_repo().update(&property).await?;

        info!(property_id = %property.id, "property updated");
        Ok(PropertyResponse::from(&property))
    }

    /// Soft-delete a listing; re-deleting just re-sets the same flags
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn soft_delete(&self, actor: &User, id: Snowflake) -> ServiceResult<()> {
        let property = self.require(id).await?;
        ensure_owner_or_admin(actor, &property)?;

        self.ctx.property_repo().mark_deleted(id, Utc::now()).await?;

        info!(property_id = %id, "property soft-deleted");
        Ok(())
    }

    /// Restore a soft-deleted listing; fails on an active one
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn restore(&self, actor: &User, id: Snowflake) -> ServiceResult<PropertyResponse> {
        let mut property = self.require(id).await?;
        ensure_owner_or_admin(actor, &property)?;

        if !property.deleted {
            return Err(ServiceError::from(DomainError::PropertyNotDeleted));
        }

        let now = Utc::now();
        self.ctx.property_repo().mark_restored(id, now).await?;
        property.restore(now);

        info!(property_id = %id, "property restored");
        Ok(PropertyResponse::from(&property))
    }

    /// Irreversibly remove a listing; admin only, no soft-delete precondition
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn purge(&self, actor: &User, id: Snowflake) -> ServiceResult<()> {
        if !actor.is_admin() {
            return Err(ServiceError::from(DomainError::AdminRequired));
        }

        // Existence check keeps 404 distinct from the generic forbidden case
        self.require(id).await?;
        self.ctx.property_repo().purge(id).await?;

        info!(property_id = %id, "property purged");
        Ok(())
    }

    /// Approve a pending listing; admin only
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn approve(&self, actor: &User, id: Snowflake) -> ServiceResult<PropertyResponse> {
        if !actor.is_admin() {
            return Err(ServiceError::from(DomainError::AdminRequired));
        }

        let mut property = self.require(id).await?;
        let now = Utc::now();

        self.ctx
            .property_repo()
            .mark_approved(id, actor.id, now)
            .await?;
        property.approve(actor.id, now);

        info!(property_id = %id, "property approved");

        self.notify_owner(
            &property,
            "Listing approved",
            format!("Your listing \"{}\" is now live.", property.title),
        )
        .await;

        Ok(PropertyResponse::from(&property))
    }

    /// Reject a listing with a mandatory reason; admin only
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn reject(
        &self,
        actor: &User,
        id: Snowflake,
        request: RejectPropertyRequest,
    ) -> ServiceResult<PropertyResponse> {
        if !actor.is_admin() {
            return Err(ServiceError::from(DomainError::AdminRequired));
        }

        let reason = request
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ServiceError::from(DomainError::RejectionReasonRequired))?
            .to_string();

        let mut property = self.require(id).await?;
        let now = Utc::now();

        self.ctx
            .property_repo()
            .mark_rejected(id, actor.id, &reason, now)
            .await?;
        property.reject(actor.id, reason.clone(), now);

        info!(property_id = %id, "property rejected");

        self.notify_owner(
            &property,
            "Listing rejected",
            format!(
                "Your listing \"{}\" was rejected: {reason}",
                property.title
            ),
        )
        .await;

        Ok(PropertyResponse::from(&property))
    }

    /// Public, unauthenticated view-count increment
    #[instrument(skip(self))]
    pub async fn increment_view(&self, id: Snowflake) -> ServiceResult<i64> {
        self.ctx
            .property_repo()
            .increment_views(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Property", id.to_string()))
    }

    async fn run_list(&self, query: PropertyQuery) -> ServiceResult<PropertyListResponse> {
        let page = self.ctx.property_repo().list(&query).await?;
        let returned = i64::try_from(page.items.len()).unwrap_or(i64::MAX);

        Ok(PropertyListResponse {
            items: page.items.iter().map(PropertyResponse::from).collect(),
            total: page.total,
            has_more: query.offset + returned < page.total,
            limit: query.limit,
            offset: query.offset,
        })
    }

    async fn resolve(&self, id_or_slug: &str) -> ServiceResult<Option<Property>> {
        // Numeric-looking strings are identifiers, everything else is a slug
        if let Ok(id) = id_or_slug.parse::<Snowflake>() {
            return self
                .ctx
                .property_repo()
                .find_by_id(id)
                .await
                .map_err(ServiceError::from);
        }
        self.ctx
            .property_repo()
            .find_by_slug(id_or_slug)
            .await
            .map_err(ServiceError::from)
    }

    async fn require(&self, id: Snowflake) -> ServiceResult<Property> {
        self.ctx
            .property_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Property", id.to_string()))
    }

    async fn notify_owner(&self, property: &Property, subject: &str, body: String) {
        let Some(owner_id) = property.owner_id else {
            return;
        };
        let owner = match self.ctx.user_repo().find_by_id(owner_id).await {
            Ok(Some(owner)) => owner,
            Ok(None) => return,
            Err(e) => {
                warn!(property_id = %property.id, error = %e, "owner lookup for notification failed");
                return;
            }
        };
        self.notify(Notification::new(owner.email, subject, body))
            .await;
    }

    async fn notify(&self, notification: Notification) {
        // Advisory: delivery failures are logged and never fail the request
        if let Err(e) = self.ctx.notifier().send(notification).await {
            warn!(error = %e, "notification delivery failed");
        }
    }
}

/// Required fields for creating a listing, reported all at once when absent
fn missing_required_fields(request: &CreatePropertyRequest) -> Vec<String> {
    let mut missing = Vec::new();
    let mut check = |present: bool, name: &str| {
        if !present {
            missing.push(name.to_string());
        }
    };

    check(is_present(&request.title), "title");
    check(is_present(&request.slug), "slug");
    check(is_present(&request.description), "description");
    check(is_present(&request.property_type), "type");
    check(is_present(&request.address), "address");
    check(is_present(&request.city), "city");
    check(is_present(&request.state), "state");
    check(is_present(&request.postal_code), "postalCode");
    check(request.price.is_some(), "price");

    missing
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Build a typed repository query from wire-form listing parameters
fn build_query(
    query: PropertyListQuery,
    public_only: bool,
    owner_id: Option<Snowflake>,
) -> ServiceResult<PropertyQuery> {
    let property_types = match query.property_type.as_deref() {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                PropertyType::parse(s)
                    .ok_or_else(|| ServiceError::validation(format!("Unknown property type: {s}")))
            })
            .collect::<ServiceResult<Vec<_>>>()?,
        None => Vec::new(),
    };

    let status = match query.status.as_deref() {
        Some(raw) => Some(
            PropertyStatus::parse(raw)
                .ok_or_else(|| ServiceError::validation(format!("Unknown status: {raw}")))?,
        ),
        None => None,
    };

    // Off-list sort fields silently fall back to createdAt descending
    let (sort, direction) = match query.sort.as_deref().and_then(PropertySort::parse) {
        Some(sort) => {
            let direction = match query.direction.as_deref() {
                Some("asc" | "ascending") => SortDirection::Ascending,
                _ => SortDirection::Descending,
            };
            (sort, direction)
        }
        None => (PropertySort::CreatedAt, SortDirection::Descending),
    };

    Ok(PropertyQuery {
        filter: PropertyFilter {
            city: query.city,
            state: query.state,
            property_types,
            status,
            min_price: query.min_price,
            max_price: query.max_price,
            bedrooms: query.bedrooms,
            featured: query.featured,
            verified: query.verified,
            public_only,
            owner_id,
        },
        sort,
        direction,
        limit: query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        offset: query.offset.unwrap_or(0).max(0),
    })
}

/// Owner-or-admin gate shared by the mutating operations
fn ensure_owner_or_admin(actor: &User, property: &Property) -> ServiceResult<()> {
    if actor.is_admin() || property.is_owned_by(actor.id) {
        Ok(())
    } else {
        Err(ServiceError::from(DomainError::NotOwnerOrAdmin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_property(owner: Snowflake) -> Property {
        let now = Utc::now();
        Property {
            id: Snowflake::new(10),
            slug: "s".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            property_type: PropertyType::Residential,
            status: PropertyStatus::Available,
            approval_status: ApprovalStatus::Pending,
            is_verified: false,
            is_featured: false,
            address: "a".to_string(),
            city: "c".to_string(),
            state: "st".to_string(),
            postal_code: "p".to_string(),
            price: 1.0,
            bedrooms: None,
            bathrooms: None,
            area_sqft: None,
            amenities: "[]".to_string(),
            images: "[]".to_string(),
            keywords: "[]".to_string(),
            deleted: false,
            deleted_at: None,
            owner_id: Some(owner),
            approved_by: None,
            approved_at: None,
            rejection_reason: None,
            view_count: 0,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_user(id: i64, admin: bool) -> User {
        let mut user = User::new(
            Snowflake::new(id),
            format!("u{id}@example.com"),
            "U".to_string(),
        );
        if admin {
            user.role = estate_core::Role::Admin;
        }
        user
    }

    #[test]
    fn test_missing_fields_lists_every_absence() {
        let request = CreatePropertyRequest {
            title: Some("Villa".to_string()),
            slug: Some("villa".to_string()),
            description: Some("desc".to_string()),
            property_type: Some("residential".to_string()),
            address: Some("1 Road".to_string()),
            state: Some("TX".to_string()),
            postal_code: Some("73301".to_string()),
            ..Default::default()
        };

        let missing = missing_required_fields(&request);
        assert_eq!(missing, vec!["city".to_string(), "price".to_string()]);
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let request = CreatePropertyRequest {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(missing_required_fields(&request).contains(&"title".to_string()));
    }

    #[test]
    fn test_owner_or_admin_gate() {
        let property = sample_property(Snowflake::new(1));

        assert!(ensure_owner_or_admin(&sample_user(1, false), &property).is_ok());
        assert!(ensure_owner_or_admin(&sample_user(99, true), &property).is_ok());

        let err = ensure_owner_or_admin(&sample_user(2, false), &property).unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_build_query_sort_fallback() {
        let query = build_query(
            PropertyListQuery {
                sort: Some("ownerId".to_string()),
                direction: Some("asc".to_string()),
                ..Default::default()
            },
            true,
            None,
        )
        .unwrap();

        // Off-list field ignores the requested direction too
        assert_eq!(query.sort, PropertySort::CreatedAt);
        assert_eq!(query.direction, SortDirection::Descending);
        assert_eq!(query.limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_build_query_parses_type_list() {
        let query = build_query(
            PropertyListQuery {
                property_type: Some("residential, COMMERCIAL".to_string()),
                limit: Some(5000),
                ..Default::default()
            },
            true,
            None,
        )
        .unwrap();

        assert_eq!(
            query.filter.property_types,
            vec![PropertyType::Residential, PropertyType::Commercial]
        );
        assert_eq!(query.limit, MAX_PAGE_LIMIT);
        assert!(query.filter.public_only);
    }

    #[test]
    fn test_build_query_rejects_unknown_type() {
        let result = build_query(
            PropertyListQuery {
                property_type: Some("castle".to_string()),
                ..Default::default()
            },
            true,
            None,
        );
        assert!(result.is_err());
    }
}
