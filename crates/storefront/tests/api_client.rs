//! Behavioral tests for the backend API client.
//!
//! Each test spins up an in-process axum server on an ephemeral port that
//! plays the content backend, and points a real [`ApiClient`] at it. This
//! exercises the full read path - HTTP, envelope unwrapping, normalization,
//! and the fail-soft degradation - without any network dependency.

#![allow(clippy::unwrap_used)]

use axum::{Json, Router, http::StatusCode, routing::get, routing::post};
use serde_json::{Value, json};

use green_globe_storefront::backend::{ApiClient, MessagePayload};
use green_globe_storefront::config::BackendApiConfig;

/// Serve a router on an ephemeral port and return its API base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock backend");
    let addr = listener.local_addr().expect("mock backend has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("mock backend crashed");
    });
    format!("http://{addr}/api")
}

fn client_for(api_url: String) -> ApiClient {
    ApiClient::new(&BackendApiConfig { api_url })
}

fn ok_envelope(data: Value) -> Json<Value> {
    Json(json!({"success": true, "data": data}))
}

fn product_doc(id: &str, name: &str, slug: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": format!("{name} description"),
        "image": format!("https://cdn.example.com/{id}.jpg"),
        "category": {"name": slug, "slug": slug},
        "createdAt": "2026-01-05T10:00:00Z",
        "inStock": true
    })
}

// =============================================================================
// Fail-soft reads
// =============================================================================

#[tokio::test]
async fn list_categories_normalizes_wire_documents() {
    let router = Router::new().route(
        "/api/categories",
        get(|| async {
            ok_envelope(json!([
                {"_id": "c1", "name": "Dried Herbs", "slug": "dried-herbs", "productCount": 4},
                {"_id": "c2", "name": "Spices", "slug": "spices"}
            ]))
        }),
    );
    let client = client_for(spawn_backend(router).await);

    let categories = client.list_categories().await;
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].slug, "dried-herbs");
    assert_eq!(categories[0].product_count, 4);
    // productCount absent defaults to zero
    assert_eq!(categories[1].product_count, 0);
}

#[tokio::test]
async fn false_envelope_reads_degrade_to_empty() {
    let router = Router::new().route(
        "/api/products",
        get(|| async { Json(json!({"success": false, "data": []})) }),
    );
    let client = client_for(spawn_backend(router).await);

    assert!(client.list_products().await.is_empty());
}

#[tokio::test]
async fn malformed_body_reads_degrade_to_empty() {
    let router = Router::new().route(
        "/api/certificates",
        get(|| async { "<html>gateway timeout</html>" }),
    );
    let client = client_for(spawn_backend(router).await);

    assert!(client.list_certificates().await.is_empty());
}

#[tokio::test]
async fn server_error_reads_degrade_to_empty() {
    let router = Router::new().route(
        "/api/team",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = client_for(spawn_backend(router).await);

    assert!(client.list_team_members().await.is_empty());
}

#[tokio::test]
async fn unreachable_backend_degrades_everywhere() {
    // Nothing listens on port 9; every read must still settle empty
    let client = client_for("http://127.0.0.1:9/api".to_string());

    assert!(client.list_products().await.is_empty());
    assert!(client.list_categories().await.is_empty());
    assert!(client.get_contact_info().await.is_empty());
    assert!(client.get_product_by_id("p1").await.is_none());
}

// =============================================================================
// Product lookups
// =============================================================================

#[tokio::test]
async fn get_product_by_id_finds_unique_match() {
    let router = Router::new().route(
        "/api/products",
        get(|| async {
            ok_envelope(json!([
                product_doc("p1", "Chamomile", "herbs"),
                product_doc("p2", "Cumin", "spices"),
            ]))
        }),
    );
    let client = client_for(spawn_backend(router).await);

    let product = client.get_product_by_id("p2").await.unwrap();
    assert_eq!(product.name, "Cumin");
    assert!(client.get_product_by_id("p404").await.is_none());
}

#[tokio::test]
async fn get_product_by_id_takes_first_of_duplicates() {
    let router = Router::new().route(
        "/api/products",
        get(|| async {
            ok_envelope(json!([
                product_doc("dup", "First", "herbs"),
                product_doc("dup", "Second", "herbs"),
            ]))
        }),
    );
    let client = client_for(spawn_backend(router).await);

    let product = client.get_product_by_id("dup").await.unwrap();
    assert_eq!(product.name, "First");
}

#[tokio::test]
async fn list_by_category_handles_object_and_bare_string_shapes() {
    let router = Router::new().route(
        "/api/products",
        get(|| async {
            ok_envelope(json!([
                product_doc("p1", "Chamomile", "herbs"),
                // Older documents carry the category as a bare string
                {
                    "_id": "p2",
                    "name": "Hibiscus",
                    "image": "https://cdn.example.com/p2.jpg",
                    "category": "herbs",
                    "createdAt": "2025-08-14T09:00:00Z",
                    "inStock": false
                },
                product_doc("p3", "Cumin", "spices"),
            ]))
        }),
    );
    let client = client_for(spawn_backend(router).await);

    let herbs = client.list_products_by_category("herbs").await;
    assert_eq!(herbs.len(), 2);
    assert_eq!(herbs[0].name, "Chamomile");
    assert_eq!(herbs[1].name, "Hibiscus");
    assert_eq!(herbs[1].category.name, "herbs");
}

// =============================================================================
// Contact info
// =============================================================================

#[tokio::test]
async fn contact_info_folds_channels_last_wins() {
    let router = Router::new().route(
        "/api/contact",
        get(|| async {
            ok_envelope(json!([
                {"type": "phone", "label": "Phone", "value": "A"},
                {"type": "email", "label": "Email", "value": "hello@example.com"},
                {"type": "phone", "label": "Phone", "value": "B"},
            ]))
        }),
    );
    let client = client_for(spawn_backend(router).await);

    let info = client.get_contact_info().await;
    assert_eq!(info.len(), 2);
    assert_eq!(info.get("phone").unwrap().value, "B");
    assert_eq!(info.get("email").unwrap().value, "hello@example.com");
}

// =============================================================================
// Message submission (loud-fail write)
// =============================================================================

fn payload() -> MessagePayload {
    MessagePayload {
        name: "Nadia".to_string(),
        email: "nadia@example.com".to_string(),
        phone: "+20 100 555 0123".to_string(),
        subject: "Wholesale".to_string(),
        message: "Do you ship to Rotterdam?".to_string(),
    }
}

#[tokio::test]
async fn send_message_succeeds_on_success_envelope() {
    let router = Router::new().route(
        "/api/messages",
        post(|| async { Json(json!({"success": true})) }),
    );
    let client = client_for(spawn_backend(router).await);

    assert!(client.send_message(&payload()).await.is_ok());
}

#[tokio::test]
async fn send_message_surfaces_backend_rejection_text() {
    let router = Router::new().route(
        "/api/messages",
        post(|| async { Json(json!({"success": false, "message": "Subject is required"})) }),
    );
    let client = client_for(spawn_backend(router).await);

    let err = client.send_message(&payload()).await.unwrap_err();
    assert_eq!(err.user_message(), "Subject is required");
}

#[tokio::test]
async fn send_message_without_detail_uses_generic_text() {
    let router = Router::new().route(
        "/api/messages",
        post(|| async { Json(json!({"success": false})) }),
    );
    let client = client_for(spawn_backend(router).await);

    let err = client.send_message(&payload()).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Failed to send message. Please try again later."
    );
}

#[tokio::test]
async fn send_message_transport_failure_is_an_error() {
    let client = client_for("http://127.0.0.1:9/api".to_string());

    let err = client.send_message(&payload()).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Failed to send message. Please try again later."
    );
}
