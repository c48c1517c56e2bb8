//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let response = client.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let response = client.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let request = RegisterRequest::unique();

    let response = client.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.full_name, request.full_name);
    assert_eq!(auth.user.role, "user");
    assert!(!auth.session_token.is_empty());

    // The Set-Cookie from registration authenticates follow-up requests
    let response = client.get("/auth/session").await.unwrap();
    let session: SessionCheckResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(session.authenticated);
    assert_eq!(session.user.unwrap().email, request.email.to_lowercase());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let request = RegisterRequest::unique();

    // First registration
    client.post("/auth/register", &request).await.unwrap();

    // Second registration with same email
    let response = client.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_weak_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let mut request = RegisterRequest::unique();
    request.password = "short".to_string();

    let response = client.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_client = server.client().unwrap();

    // Register first
    let register_req = RegisterRequest::unique();
    register_client
        .post("/auth/register", &register_req)
        .await
        .unwrap();

    // Login from a fresh client (no cookies yet)
    let client = server.client().unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    let response = client.post("/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.full_name, register_req.full_name);
    assert!(!auth.session_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    // Unknown email
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "WrongPass123!".to_string(),
    };
    let response = client.post("/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Known email, wrong password: indistinguishable from the above
    let register_req = RegisterRequest::unique();
    client.post("/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest {
        email: register_req.email.clone(),
        password: "WrongPass123!".to_string(),
    };
    let response = client.post("/auth/login", &login_req).await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_session_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let register_req = RegisterRequest::unique();
    client.post("/auth/register", &register_req).await.unwrap();

    // Session is live
    let response = client.get("/auth/session").await.unwrap();
    let session: SessionCheckResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(session.authenticated);

    // Logout revokes it and clears the cookie
    let response = client.post_empty("/auth/logout").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = client.get("/auth/session").await.unwrap();
    let session: SessionCheckResponse =
        assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert!(!session.authenticated);
    assert!(session.user.is_none());
}

#[tokio::test]
async fn test_expired_session_is_rejected_and_purged() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let register_req = RegisterRequest::unique();
    client.post("/auth/register", &register_req).await.unwrap();
    assert_eq!(server.session_count(&register_req.email).await.unwrap(), 1);

    server.expire_sessions(&register_req.email).await.unwrap();

    // An expired session reads as anonymous
    let response = client.get("/auth/session").await.unwrap();
    let session: SessionCheckResponse =
        assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert!(!session.authenticated);

    // and the lookup removed the stale row
    assert_eq!(server.session_count(&register_req.email).await.unwrap(), 0);
}

#[tokio::test]
async fn test_session_check_anonymous() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let response = client.get("/auth/session").await.unwrap();
    let session: SessionCheckResponse =
        assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert!(!session.authenticated);
}

#[tokio::test]
async fn test_forgot_password_is_generic() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let register_req = RegisterRequest::unique();
    client.post("/auth/register", &register_req).await.unwrap();

    // Registered address
    let body = serde_json::json!({ "email": register_req.email });
    let response = client.post("/auth/forgot-password", &body).await.unwrap();
    let known: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Unknown address answers identically
    let body = serde_json::json!({ "email": "nobody@example.com" });
    let response = client.post("/auth/forgot-password", &body).await.unwrap();
    let unknown: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(known.message, unknown.message);
}

// ============================================================================
// Property Tests
// ============================================================================

#[tokio::test]
async fn test_create_property_enters_pending() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let request = CreatePropertyRequest::unique();
    let response = client.post("/properties", &request).await.unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(property.slug, request.slug);
    assert_eq!(property.approval_status, "pending");
    assert!(!property.is_verified);
    assert!(!property.deleted);
    assert_eq!(property.amenities, serde_json::json!(["garage", "garden"]));

    // Pending listings never appear in the public catalog
    let response = client
        .get(&format!("/properties?city={}", request.city))
        .await
        .unwrap();
    let listing: PropertyListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listing.items.iter().all(|p| p.id != property.id));
}

#[tokio::test]
async fn test_create_property_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let request = CreatePropertyRequest::unique();
    let response = client.post("/properties", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_create_property_reports_all_missing_fields() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    // price and city both absent; the error names every missing field
    let body = serde_json::json!({
        "title": "Incomplete",
        "slug": format!("incomplete-{}", unique_suffix()),
        "description": "Missing things",
        "type": "residential",
        "address": "1 Nowhere Lane",
        "state": "MN",
        "postalCode": "55044",
    });
    let response = client.post("/properties", &body).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert!(error.error.message.contains("price"));
    assert!(error.error.message.contains("city"));
}

#[tokio::test]
async fn test_create_property_duplicate_slug() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let request = CreatePropertyRequest::unique();
    client.post("/properties", &request).await.unwrap();

    let mut duplicate = CreatePropertyRequest::unique();
    duplicate.slug = request.slug.clone();
    let response = client.post("/properties", &duplicate).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "SLUG_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_approval_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Owner registers and lists a property
    let owner = server.client().unwrap();
    owner
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let request = CreatePropertyRequest::unique();
    let response = owner.post("/properties", &request).await.unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // A second user is promoted to admin out of band
    let admin = server.client().unwrap();
    let admin_req = RegisterRequest::unique();
    admin.post("/auth/register", &admin_req).await.unwrap();
    server.promote_to_admin(&admin_req.email).await.unwrap();

    // Approval flips both the approval state and the verified flag
    let response = admin
        .post_empty(&format!("/properties/{}/approve", property.id))
        .await
        .unwrap();
    let approved: PropertyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(approved.approval_status, "approved");
    assert!(approved.is_verified);

    // Now it appears in the public catalog
    let anonymous = server.client().unwrap();
    let response = anonymous
        .get(&format!("/properties?city={}", request.city))
        .await
        .unwrap();
    let listing: PropertyListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listing.items.iter().any(|p| p.id == property.id));

    // Fetching by slug counts the view
    let response = anonymous
        .get(&format!("/properties/{}", request.slug))
        .await
        .unwrap();
    let fetched: PropertyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, property.id);
    assert_eq!(fetched.view_count, property.view_count + 1);
}

#[tokio::test]
async fn test_approve_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = client
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Owners cannot approve their own listings
    let response = client
        .post_empty(&format!("/properties/{}/approve", property.id))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "ADMIN_REQUIRED");
}

#[tokio::test]
async fn test_reject_requires_reason() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let owner = server.client().unwrap();
    owner
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();
    let response = owner
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let admin = server.client().unwrap();
    let admin_req = RegisterRequest::unique();
    admin.post("/auth/register", &admin_req).await.unwrap();
    server.promote_to_admin(&admin_req.email).await.unwrap();

    // No reason: rejected as a validation failure
    let response = admin
        .post(
            &format!("/properties/{}/reject", property.id),
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // With a reason: the reason is stored verbatim
    let response = admin
        .post(
            &format!("/properties/{}/reject", property.id),
            &serde_json::json!({ "reason": "Listing photos are missing" }),
        )
        .await
        .unwrap();
    let rejected: PropertyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rejected.approval_status, "rejected");
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Listing photos are missing")
    );
}

#[tokio::test]
async fn test_update_property_as_owner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = client
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let patch = serde_json::json!({ "title": "Renovated Home", "price": 450_000.0 });
    let response = client
        .put(&format!("/properties/{}", property.id), &patch)
        .await
        .unwrap();
    let updated: PropertyResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(updated.title, "Renovated Home");
    assert_eq!(updated.price, 450_000.0);
    // Untouched fields keep their values
    assert_eq!(updated.slug, property.slug);
}

#[tokio::test]
async fn test_non_owner_cannot_delete() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let owner = server.client().unwrap();
    owner
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();
    let response = owner
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let other = server.client().unwrap();
    other
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = other
        .delete(&format!("/properties/{}", property.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The listing is untouched
    let response = owner
        .get(&format!("/properties/{}", property.id))
        .await
        .unwrap();
    let fetched: PropertyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!fetched.deleted);
}

#[tokio::test]
async fn test_soft_delete_and_restore() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = client
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Restoring an active listing is an invalid transition
    let response = client
        .post_empty(&format!("/properties/{}/restore", property.id))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "PROPERTY_NOT_DELETED");

    // Soft delete, then the same restore succeeds
    let response = client
        .delete(&format!("/properties/{}", property.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = client
        .post_empty(&format!("/properties/{}/restore", property.id))
        .await
        .unwrap();
    let restored: PropertyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!restored.deleted);
}

#[tokio::test]
async fn test_permanent_delete_is_admin_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let owner = server.client().unwrap();
    owner
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();
    let response = owner
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Owners cannot purge
    let response = owner
        .delete(&format!("/properties/{}?permanent=true", property.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let admin = server.client().unwrap();
    let admin_req = RegisterRequest::unique();
    admin.post("/auth/register", &admin_req).await.unwrap();
    server.promote_to_admin(&admin_req.email).await.unwrap();

    let response = admin
        .delete(&format!("/properties/{}?permanent=true", property.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The row is gone, not soft-deleted
    let response = owner
        .get(&format!("/properties/{}", property.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_view_count_endpoint() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = client
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = client
        .post_empty(&format!("/properties/{}/view", property.id))
        .await
        .unwrap();
    let first: ViewCountResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = client
        .post_empty(&format!("/properties/{}/view", property.id))
        .await
        .unwrap();
    let second: ViewCountResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(second.view_count, first.view_count + 1);
}

#[tokio::test]
async fn test_concurrent_views_each_count() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = client
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/properties/{}/view", property.id);

    let response = client.post_empty(&path).await.unwrap();
    let start: ViewCountResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Fire a burst of simultaneous increments; none may be lost
    let concurrent: i64 = 10;
    let mut tasks = Vec::new();
    for _ in 0..concurrent {
        let client = client.clone();
        let path = path.clone();
        tasks.push(tokio::spawn(async move {
            client.post_empty(&path).await.unwrap().status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    let response = client.post_empty(&path).await.unwrap();
    let after: ViewCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(after.view_count, start.view_count + concurrent + 1);
}

#[tokio::test]
async fn test_public_list_pagination_and_sort_fallback() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let owner = server.client().unwrap();
    owner
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let admin = server.client().unwrap();
    let admin_req = RegisterRequest::unique();
    admin.post("/auth/register", &admin_req).await.unwrap();
    server.promote_to_admin(&admin_req.email).await.unwrap();

    // Two approved listings in a city unique to this test run
    let city = format!("Testville{}", unique_suffix());
    for _ in 0..2 {
        let mut request = CreatePropertyRequest::unique();
        request.city = city.clone();
        let response = owner.post("/properties", &request).await.unwrap();
        let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        admin
            .post_empty(&format!("/properties/{}/approve", property.id))
            .await
            .unwrap();
    }

    let anonymous = server.client().unwrap();
    let response = anonymous
        .get(&format!("/properties?city={city}&limit=1"))
        .await
        .unwrap();
    let page: PropertyListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 2);
    assert!(page.has_more);
    assert_eq!(page.limit, 1);
    assert_eq!(page.offset, 0);

    // An off-list sort key is ignored rather than rejected
    let response = anonymous
        .get(&format!("/properties?city={city}&sort=evil;drop"))
        .await
        .unwrap();
    let page: PropertyListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn test_owned_listing_includes_all_states() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = client
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Pending listings are visible to their owner
    let response = client.get("/users/@me/properties").await.unwrap();
    let owned: PropertyListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(owned.items.iter().any(|p| p.id == property.id));
}

// ============================================================================
// Favorite Tests
// ============================================================================

#[tokio::test]
async fn test_favorite_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = client
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Favorite it
    let request = CreateFavoriteRequest {
        property_id: property.id.clone(),
    };
    let response = client.post("/favorites", &request).await.unwrap();
    let favorite: FavoriteResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(favorite.property_id, property.id);

    // A second favorite of the same property conflicts
    let response = client.post("/favorites", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Exactly one entry in the list
    let response = client.get("/favorites").await.unwrap();
    let favorites: Vec<FavoriteResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        favorites
            .iter()
            .filter(|f| f.property_id == property.id)
            .count(),
        1
    );

    // Remove it and the list is empty again
    let response = client
        .delete(&format!("/favorites/{}", favorite.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = client.get("/favorites").await.unwrap();
    let favorites: Vec<FavoriteResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(favorites.iter().all(|f| f.property_id != property.id));
}

#[tokio::test]
async fn test_favorite_unknown_property() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let request = CreateFavoriteRequest {
        property_id: "999999999999999999".to_string(),
    };
    let response = client.post("/favorites", &request).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_other_users_favorite_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let alice = server.client().unwrap();
    alice
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = alice
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let request = CreateFavoriteRequest {
        property_id: property.id.clone(),
    };
    let response = alice.post("/favorites", &request).await.unwrap();
    let favorite: FavoriteResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Bob cannot see, and therefore cannot delete, Alice's favorite
    let bob = server.client().unwrap();
    bob.post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = bob
        .delete(&format!("/favorites/{}", favorite.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_favorite_by_property() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    client
        .post("/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();

    let response = client
        .post("/properties", &CreatePropertyRequest::unique())
        .await
        .unwrap();
    let property: PropertyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let request = CreateFavoriteRequest {
        property_id: property.id.clone(),
    };
    client.post("/favorites", &request).await.unwrap();

    // Addressed by the property rather than the favorite id
    let response = client
        .delete(&format!("/favorites?propertyId={}", property.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = client.get("/favorites").await.unwrap();
    let favorites: Vec<FavoriteResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(favorites.iter().all(|f| f.property_id != property.id));
}

#[tokio::test]
async fn test_favorites_require_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let response = client.get("/favorites").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}
