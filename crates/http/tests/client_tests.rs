//! Integration tests for the typed Volant admin API client

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use volant_core::{CredentialPair, CredentialStore, MemoryCredentialStore};
use volant_http::types::{LoginRequest, NewProduct, ProductFilter, ProductUpdate, ReviewFilter};
use volant_http::{ClientError, VolantClient};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn authed_client(server: &MockServer, access: &str) -> (VolantClient, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::with_pair(CredentialPair::new(
        access, "R1",
    )));
    let client = VolantClient::builder()
        .base_url(server.uri())
        .credential_store(store.clone())
        .build()
        .unwrap();
    (client, store)
}

#[tokio::test]
async fn test_client_builder() {
    let client = VolantClient::builder()
        .base_url("http://localhost:8080")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = VolantClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_client_builder_rejects_invalid_base_url() {
    let result = VolantClient::builder().base_url("not a url").build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let client = VolantClient::new("http://localhost:8080/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn test_login_persists_session_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "admin@volant.sh",
            "password": "wheel-nut"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "admin": {"id": 1, "email": "admin@volant.sh", "name": "Admin"},
                "accessToken": "A1",
                "refreshToken": "R1"
            }
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let client = VolantClient::builder()
        .base_url(server.uri())
        .credential_store(store.clone())
        .build()
        .unwrap();

    let profile = client
        .login(&LoginRequest {
            email: "admin@volant.sh".to_string(),
            password: "wheel-nut".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(profile.email, "admin@volant.sh");
    assert_eq!(
        store.get().await.unwrap(),
        Some(CredentialPair::new("A1", "R1"))
    );
}

#[tokio::test]
async fn test_login_failure_maps_to_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let client = VolantClient::builder()
        .base_url(server.uri())
        .credential_store(store.clone())
        .build()
        .unwrap();

    let err = client
        .login(&LoginRequest {
            email: "admin@volant.sh".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.is_auth_expired());
    assert!(matches!(err, ClientError::AuthenticationFailed(_)));
    assert_eq!(store.get().await.unwrap(), None);
}

#[tokio::test]
async fn test_logout_clears_credentials_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": null})))
        .mount(&server)
        .await;

    let (client, store) = authed_client(&server, "A1");

    client.logout().await.unwrap();
    assert_eq!(store.get().await.unwrap(), None);
}

#[tokio::test]
async fn test_logout_clears_credentials_even_when_the_call_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("session table down"))
        .mount(&server)
        .await;

    let (client, store) = authed_client(&server, "A1");

    let err = client.logout().await.unwrap_err();
    assert!(matches!(err, ClientError::ServerError { status: 500, .. }));
    assert_eq!(store.get().await.unwrap(), None);
}

#[tokio::test]
async fn test_me_returns_the_signed_in_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 1, "email": "admin@volant.sh", "name": "Admin"}
        })))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let profile = client.me().await.unwrap();
    assert_eq!(profile.id, 1);
    assert_eq!(profile.name, "Admin");
}

#[tokio::test]
async fn test_list_products_sends_filters_as_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("category", "rims"))
        .and(query_param("search", "suede"))
        .and(query_param("page", "2"))
        .and(query_param("perPage", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "items": [{
                    "id": 7,
                    "name": "GT3 Suede",
                    "description": "330mm suede rim",
                    "price": "249.90",
                    "categoryId": 2,
                    "imageUrl": "https://cdn.volant.sh/gt3.jpg",
                    "inStock": true,
                    "createdAt": "2025-03-01T10:00:00Z",
                    "updatedAt": "2025-03-02T09:30:00Z"
                }],
                "total": 25,
                "page": 2,
                "perPage": 12
            }
        })))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let filter = ProductFilter {
        category: Some("rims".to_string()),
        search: Some("suede".to_string()),
        page: Some(2),
        per_page: Some(12),
    };

    let page = client.list_products(&filter).await.unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].price, "249.90".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn test_create_product_sends_the_decimal_price_as_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(json!({
            "name": "Rally Classic",
            "description": "350mm leather rim",
            "price": "189.00",
            "categoryId": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": 11,
                "name": "Rally Classic",
                "description": "350mm leather rim",
                "price": "189.00",
                "categoryId": 3,
                "inStock": true,
                "createdAt": "2025-04-01T08:00:00Z",
                "updatedAt": "2025-04-01T08:00:00Z"
            }
        })))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let product = client
        .create_product(&NewProduct {
            name: "Rally Classic".to_string(),
            description: "350mm leather rim".to_string(),
            price: "189.00".parse().unwrap(),
            category_id: 3,
            image_url: None,
        })
        .await
        .unwrap();

    assert_eq!(product.id, 11);
}

#[tokio::test]
async fn test_update_product_sends_only_set_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/products/7"))
        .and(body_json(json!({"price": "219.00"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": 7,
                "name": "GT3 Suede",
                "description": "330mm suede rim",
                "price": "219.00",
                "categoryId": 2,
                "inStock": true,
                "createdAt": "2025-03-01T10:00:00Z",
                "updatedAt": "2025-06-01T12:00:00Z"
            }
        })))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let update = ProductUpdate {
        price: Some("219.00".parse().unwrap()),
        ..ProductUpdate::default()
    };

    let product = client.update_product(7, &update).await.unwrap();
    assert_eq!(product.price, "219.00".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn test_list_messages_pages_through_the_inbox() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "items": [{
                    "id": 31,
                    "name": "Jo Keller",
                    "email": "jo@example.com",
                    "subject": "Wheel hub compatibility",
                    "body": "Does the GT3 Suede fit a Fanatec hub?",
                    "read": false,
                    "createdAt": "2025-06-10T15:20:00Z"
                }],
                "total": 41,
                "page": 3,
                "perPage": 20
            }
        })))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let page = client.list_messages(Some(3)).await.unwrap();
    assert_eq!(page.page, 3);
    assert!(!page.items[0].read);
}

#[tokio::test]
async fn test_delete_product_checks_the_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/products/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": null})))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");
    client.delete_product(3).await.unwrap();
}

#[tokio::test]
async fn test_missing_product_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("product not found"))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let err = client.get_product(999).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_envelope_failure_becomes_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "database unavailable"
        })))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let err = client
        .list_products(&ProductFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api(message) if message == "database unavailable"));
}

#[tokio::test]
async fn test_missing_data_payload_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let err = client.dashboard_summary().await.unwrap_err();
    assert!(matches!(err, ClientError::Api(_)));
}

#[tokio::test]
async fn test_approve_review_patches_the_approval_flag() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/reviews/9"))
        .and(body_json(json!({"approved": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": 9,
                "productId": 7,
                "author": "K. Larsson",
                "rating": 5,
                "body": "Transformed my sim rig.",
                "approved": true,
                "createdAt": "2025-05-10T12:00:00Z"
            }
        })))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let review = client.approve_review(9).await.unwrap();
    assert!(review.approved);
}

#[tokio::test]
async fn test_list_reviews_filters_by_approval() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reviews"))
        .and(query_param("approved", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "id": 4,
                "productId": 2,
                "author": "M. Oduya",
                "rating": 4,
                "body": "Great grip, slow shipping.",
                "approved": false,
                "createdAt": "2025-05-11T09:00:00Z"
            }]
        })))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let reviews = client
        .list_reviews(&ReviewFilter {
            approved: Some(false),
            product_id: None,
        })
        .await
        .unwrap();

    assert_eq!(reviews.len(), 1);
    assert!(!reviews[0].approved);
}

#[tokio::test]
async fn test_mark_message_read() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/messages/5/read"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": null})))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");
    client.mark_message_read(5).await.unwrap();
}

#[tokio::test]
async fn test_dashboard_summary_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "products": 42,
                "categories": 6,
                "unreadMessages": 3,
                "pendingReviews": 5
            }
        })))
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server, "A1");

    let summary = client.dashboard_summary().await.unwrap();
    assert_eq!(summary.products, 42);
    assert_eq!(summary.unread_messages, 3);
    assert_eq!(summary.pending_reviews, 5);
}

#[tokio::test]
async fn test_typed_calls_refresh_transparently() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 1, "name": "Racing"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refreshToken": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"accessToken": "A2", "refreshToken": "R2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = authed_client(&server, "A1");

    let categories = client.list_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(
        store.get().await.unwrap(),
        Some(CredentialPair::new("A2", "R2"))
    );
}
