//! PostgreSQL implementation of PropertyRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use estate_core::{
    ApprovalStatus, DomainError, Property, PropertyFilter, PropertyPage, PropertyQuery,
    PropertyRepository, PropertySort, RepoResult, Snowflake, SortDirection,
};

use crate::models::PropertyModel;

use super::error::{map_db_error, map_unique_violation, property_not_found};

const PROPERTY_COLUMNS: &str = "id, slug, title, description, property_type, status, \
     approval_status, is_verified, is_featured, address, city, state, postal_code, price, \
     bedrooms, bathrooms, area_sqft, amenities, images, keywords, deleted, deleted_at, \
     owner_id, approved_by, approved_at, rejection_reason, view_count, published_at, \
     created_at, updated_at";

/// PostgreSQL implementation of PropertyRepository
#[derive(Clone)]
pub struct PgPropertyRepository {
    pool: PgPool,
}

impl PgPropertyRepository {
    /// Create a new PgPropertyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append AND-combined filter conditions with bound parameters.
///
/// Every value reaches the query through `push_bind`; only fixed SQL text is
/// pushed directly.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &PropertyFilter) {
    builder.push(" WHERE TRUE");

    if filter.public_only {
        builder
            .push(" AND approval_status = ")
            .push_bind(ApprovalStatus::Approved.as_str())
            .push(" AND deleted = FALSE");
    }

    if let Some(owner_id) = filter.owner_id {
        builder
            .push(" AND owner_id = ")
            .push_bind(owner_id.into_inner());
    }

    if let Some(city) = &filter.city {
        builder.push(" AND city = ").push_bind(city.clone());
    }

    if let Some(state) = &filter.state {
        builder.push(" AND state = ").push_bind(state.clone());
    }

    if !filter.property_types.is_empty() {
        let types: Vec<String> = filter
            .property_types
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();
        builder
            .push(" AND property_type = ANY(")
            .push_bind(types)
            .push(")");
    }

    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }

    if let Some(min_price) = filter.min_price {
        builder.push(" AND price >= ").push_bind(min_price);
    }

    if let Some(max_price) = filter.max_price {
        builder.push(" AND price <= ").push_bind(max_price);
    }

    if let Some(bedrooms) = filter.bedrooms {
        builder.push(" AND bedrooms = ").push_bind(bedrooms);
    }

    if let Some(featured) = filter.featured {
        builder.push(" AND is_featured = ").push_bind(featured);
    }

    if let Some(verified) = filter.verified {
        builder.push(" AND is_verified = ").push_bind(verified);
    }
}

/// Render an allow-listed sort as a fixed SQL fragment
fn order_clause(sort: PropertySort, direction: SortDirection) -> &'static str {
    match (sort, direction) {
        (PropertySort::Id, SortDirection::Ascending) => " ORDER BY id ASC",
        (PropertySort::Id, SortDirection::Descending) => " ORDER BY id DESC",
        (PropertySort::Title, SortDirection::Ascending) => " ORDER BY title ASC",
        (PropertySort::Title, SortDirection::Descending) => " ORDER BY title DESC",
        (PropertySort::Price, SortDirection::Ascending) => " ORDER BY price ASC",
        (PropertySort::Price, SortDirection::Descending) => " ORDER BY price DESC",
        (PropertySort::CreatedAt, SortDirection::Ascending) => " ORDER BY created_at ASC",
        (PropertySort::CreatedAt, SortDirection::Descending) => " ORDER BY created_at DESC",
        (PropertySort::UpdatedAt, SortDirection::Ascending) => " ORDER BY updated_at ASC",
        (PropertySort::UpdatedAt, SortDirection::Descending) => " ORDER BY updated_at DESC",
    }
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Property>> {
        let result = sqlx::query_as::<_, PropertyModel>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Property::from))
    }

    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Property>> {
        let result = sqlx::query_as::<_, PropertyModel>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Property::from))
    }

    #[instrument(skip(self))]
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool> {
        // Soft-deleted rows still hold their slug
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM properties WHERE slug = $1)
            ",
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, property))]
    async fn create(&self, property: &Property) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO properties (id, slug, title, description, property_type, status,
                approval_status, is_verified, is_featured, address, city, state, postal_code,
                price, bedrooms, bathrooms, area_sqft, amenities, images, keywords, deleted,
                deleted_at, owner_id, approved_by, approved_at, rejection_reason, view_count,
                published_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30)
            ",
        )
        .bind(property.id.into_inner())
        .bind(&property.slug)
        .bind(&property.title)
        .bind(&property.description)
        .bind(property.property_type.as_str())
        .bind(property.status.as_str())
        .bind(property.approval_status.as_str())
        .bind(property.is_verified)
        .bind(property.is_featured)
        .bind(&property.address)
        .bind(&property.city)
        .bind(&property.state)
        .bind(&property.postal_code)
        .bind(property.price)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.area_sqft)
        .bind(&property.amenities)
        .bind(&property.images)
        .bind(&property.keywords)
        .bind(property.deleted)
        .bind(property.deleted_at)
        .bind(property.owner_id.map(Snowflake::into_inner))
        .bind(property.approved_by.map(Snowflake::into_inner))
        .bind(property.approved_at)
        .bind(property.rejection_reason.as_deref())
        .bind(property.view_count)
        .bind(property.published_at)
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, property))]
    async fn update(&self, property: &Property) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE properties
            SET slug = $2, title = $3, description = $4, property_type = $5, status = $6,
                approval_status = $7, is_verified = $8, is_featured = $9, address = $10,
                city = $11, state = $12, postal_code = $13, price = $14, bedrooms = $15,
                bathrooms = $16, area_sqft = $17, amenities = $18, images = $19,
                keywords = $20, deleted = $21, deleted_at = $22, approved_by = $23,
                approved_at = $24, rejection_reason = $25, published_at = $26,
                updated_at = $27
            WHERE id = $1
            ",
        )
        .bind(property.id.into_inner())
        .bind(&property.slug)
        .bind(&property.title)
        .bind(&property.description)
        .bind(property.property_type.as_str())
        .bind(property.status.as_str())
        .bind(property.approval_status.as_str())
        .bind(property.is_verified)
        .bind(property.is_featured)
        .bind(&property.address)
        .bind(&property.city)
        .bind(&property.state)
        .bind(&property.postal_code)
        .bind(property.price)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.area_sqft)
        .bind(&property.amenities)
        .bind(&property.images)
        .bind(&property.keywords)
        .bind(property.deleted)
        .bind(property.deleted_at)
        .bind(property.approved_by.map(Snowflake::into_inner))
        .bind(property.approved_at)
        .bind(property.rejection_reason.as_deref())
        .bind(property.published_at)
        .bind(property.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugAlreadyExists))?;

        if result.rows_affected() == 0 {
            return Err(property_not_found(property.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn purge(&self, id: Snowflake) -> RepoResult<()> {
        // Favorites go with the row via ON DELETE CASCADE
        let result = sqlx::query(
            r"
            DELETE FROM properties WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(property_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<i64>> {
        // Single-statement increment: concurrent fetches never lose a count
        let result = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE properties
            SET view_count = view_count + 1
            WHERE id = $1
            RETURNING view_count
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, query))]
    async fn list(&self, query: &PropertyQuery) -> RepoResult<PropertyPage> {
        let mut count_builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM properties");
        push_filters(&mut count_builder, &query.filter);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut select_builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {PROPERTY_COLUMNS} FROM properties"));
        push_filters(&mut select_builder, &query.filter);
        select_builder.push(order_clause(query.sort, query.direction));
        select_builder.push(" LIMIT ").push_bind(query.limit);
        select_builder.push(" OFFSET ").push_bind(query.offset);

        let models: Vec<PropertyModel> = select_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(PropertyPage {
            items: models.into_iter().map(Property::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn mark_approved(
        &self,
        id: Snowflake,
        admin_id: Snowflake,
        at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE properties
            SET approval_status = 'approved', is_verified = TRUE, approved_by = $2,
                approved_at = $3, published_at = $3, rejection_reason = NULL, updated_at = $3
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(admin_id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(property_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, reason))]
    async fn mark_rejected(
        &self,
        id: Snowflake,
        admin_id: Snowflake,
        reason: &str,
        at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE properties
            SET approval_status = 'rejected', is_verified = FALSE, approved_by = $2,
                approved_at = $3, rejection_reason = $4, updated_at = $3
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(admin_id.into_inner())
        .bind(at)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(property_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_deleted(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE properties
            SET deleted = TRUE, deleted_at = $2, updated_at = $2
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(property_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_restored(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE properties
            SET deleted = FALSE, deleted_at = NULL, updated_at = $2
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(property_not_found(id));
        }

        Ok(())
    }
}
