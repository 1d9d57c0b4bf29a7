use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode, header},
    routing::{get, post, put},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tene_storefront::{
    app,
    config::{ApiConfig, AppConfig, CorsConfig, ServerConfig, SessionConfig},
};
use tower::ServiceExt;

#[derive(Clone, Default)]
struct Upstream {
    calls: Arc<Mutex<Vec<String>>>,
    payloads: Arc<Mutex<Vec<Value>>>,
    auth_headers: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    fn record(&self, call: &str, headers: &HeaderMap) {
        self.calls.lock().unwrap().push(call.to_string());
        if let Some(auth) = headers.get(header::AUTHORIZATION) {
            self.auth_headers
                .lock()
                .unwrap()
                .push(auth.to_str().unwrap().to_string());
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn stored_address() -> Value {
    json!({
        "_id": "a1",
        "firstName": "Asha",
        "lastName": "Rao",
        "phone": "9876543210",
        "addressLine1": "12 MG Road",
        "city": "Pune",
        "state": "MH",
        "postalCode": "411001",
        "isDefault": true
    })
}

async fn products(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let section = query.get("section").cloned().unwrap_or_default();
    upstream.record(&format!("GET /products?section={}", section), &headers);

    match section.as_str() {
        "trending" => (
            StatusCode::OK,
            Json(json!({ "data": [{
                "slug": "linen-shirt",
                "name": "Linen Shirt",
                "stock": 4,
                "images": ["linen.jpg"],
                "variants": [{ "name": "White", "sizes": [
                    { "name": "M", "price": 850, "discountPrice": 790.5, "stock": 1 }
                ]}]
            }]})),
        ),
        "new-arrivals" => (
            StatusCode::OK,
            Json(json!({ "products": [{
                "slug": "denim-jacket",
                "name": "Denim Jacket",
                "stock": 0,
                "variants": [{ "sizes": [
                    { "name": "L", "price": 2499, "discountPrice": 0, "stock": 0 }
                ]}]
            }]})),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "collections index rebuilding" })),
        ),
    }
}

async fn product(Path(slug): Path<String>) -> (StatusCode, Json<Value>) {
    match slug.as_str() {
        "linen-shirt" => (
            StatusCode::OK,
            Json(json!({ "product": {
                "slug": "linen-shirt",
                "name": "Linen Shirt",
                "variants": [{ "sizes": [
                    { "name": "S", "price": 850, "stock": 0 },
                    { "name": "M", "price": 850, "discountPrice": 790.5, "stock": 2 }
                ]}]
            }})),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Product not found" })),
        ),
    }
}

async fn verify_otp(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["phone"] == json!("+919876543210") && body["code"] == json!("123456") {
        (
            StatusCode::OK,
            Json(json!({ "data": {
                "token": "tok-123",
                "user": { "_id": "u1", "name": "Asha Rao", "phone": "+919876543210" }
            }})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Incorrect OTP" })),
        )
    }
}

async fn list_addresses(State(upstream): State<Upstream>, headers: HeaderMap) -> Json<Value> {
    upstream.record("GET /user/addresses", &headers);
    Json(json!({ "addresses": [stored_address()] }))
}

async fn add_address(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    upstream.record("POST /user/addresses", &headers);
    upstream.payloads.lock().unwrap().push(body);
    Json(json!({ "message": "Address saved" }))
}

async fn delete_address(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Json<Value> {
    upstream.record(&format!("DELETE /user/addresses/{}", id), &headers);
    Json(json!({ "addresses": [] }))
}

async fn update_address(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    upstream.record(&format!("PUT /user/addresses/{}", id), &headers);
    upstream.payloads.lock().unwrap().push(body);
    Json(json!({ "message": "Address updated" }))
}

async fn set_default_address(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Json<Value> {
    upstream.record(&format!("PUT /user/addresses/{}/default", id), &headers);
    let mut address = stored_address();
    address["_id"] = json!(id);
    address["isDefault"] = json!(true);
    Json(json!({ "data": { "addresses": [address] } }))
}

async fn catch_all(
    State(upstream): State<Upstream>,
    method: axum::http::Method,
    uri: axum::http::Uri,
    headers: HeaderMap,
) -> StatusCode {
    upstream.record(&format!("{} {}", method, uri.path()), &headers);
    StatusCode::OK
}

async fn validate_coupon(Json(body): Json<Value>) -> Json<Value> {
    match body["code"].as_str() {
        Some("FLAT500") => Json(json!({ "valid": true, "discount": 500, "message": "Applied" })),
        _ => Json(json!({ "valid": false, "message": "Coupon expired" })),
    }
}

async fn spawn_upstream(upstream: Upstream) -> String {
    let router = Router::new()
        .route("/products", get(products))
        .route("/products/{slug}", get(product))
        .route("/auth/otp/verify", post(verify_otp))
        .route("/user/addresses", get(list_addresses).post(add_address))
        .route(
            "/user/addresses/{id}",
            put(update_address).delete(delete_address),
        )
        .route("/user/addresses/{id}/default", put(set_default_address))
        .route(
            "/blogs",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream cms down") }),
        )
        .route("/coupons/validate", post(validate_coupon))
        .fallback(catch_all)
        .with_state(upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn storefront() -> (Router, Upstream) {
    let upstream = Upstream::default();
    let base_url = spawn_upstream(upstream.clone()).await;

    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_body_size: 1024 * 1024,
        },
        api: ApiConfig {
            base_url,
            timeout: Duration::from_secs(5),
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        session: SessionConfig {
            cookie_name: "auth_token".to_string(),
            cookie_secure: false,
        },
    };

    (app::build(&config).unwrap(), upstream)
}

fn json_request(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn home_renders_priced_cards_and_survives_a_failed_section() {
    let (app, upstream) = storefront().await;

    let response = app.oneshot(get_request("/api/home", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let trending = &body["trending"][0];
    assert_eq!(trending["slug"], "linen-shirt");
    assert_eq!(trending["price"], "₹ 790.50");
    assert_eq!(trending["mrp"], "₹ 850.00");
    assert_eq!(trending["discount"], "7% OFF");
    assert_eq!(trending["soldOut"], false);

    let arrival = &body["newArrivals"][0];
    assert_eq!(arrival["price"], "₹ 2499.00");
    assert_eq!(arrival["discount"], Value::Null);
    assert_eq!(arrival["soldOut"], true);

    assert_eq!(body["collections"], json!([]));
    assert_eq!(upstream.calls().len(), 3);
}

#[tokio::test]
async fn listing_rejects_unknown_sections() {
    let (app, _) = storefront().await;

    let response = app
        .oneshot(get_request("/api/products?section=clearance", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Unknown section: clearance");
}

#[tokio::test]
async fn product_detail_and_missing_product() {
    let (app, _) = storefront().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/products/linen-shirt", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["card"]["price"], "₹ 790.50");
    assert_eq!(body["variants"][0]["sizes"][0]["purchasable"], false);
    assert_eq!(body["variants"][0]["sizes"][1]["purchasable"], true);

    let response = app
        .oneshot(get_request("/api/products/ghost", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Product not found");
}

#[tokio::test]
async fn otp_login_sets_session_and_follows_stored_redirect() {
    let (app, _) = storefront().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/session/redirect",
            json!({ "path": "/checkout" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("post_login_redirect=/checkout")));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/otp/verify",
            json!({ "phone": "98765 43210", "code": "123456" }),
            Some("post_login_redirect=/checkout"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    let session = cookies
        .iter()
        .find(|c| c.starts_with("auth_token=tok-123"))
        .expect("session cookie");
    assert!(session.contains("HttpOnly"));
    assert!(cookies.iter().any(|c| c.starts_with("post_login_redirect=;")));

    let body = body_json(response).await;
    assert_eq!(body["redirectTo"], "/checkout");
    assert_eq!(body["user"]["name"], "Asha Rao");
}

#[tokio::test]
async fn wrong_otp_surfaces_upstream_message() {
    let (app, _) = storefront().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/otp/verify",
            json!({ "phone": "9876543210", "code": "000000" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Incorrect OTP");
}

#[tokio::test]
async fn open_redirects_are_refused() {
    let (app, _) = storefront().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/session/redirect",
            json!({ "path": "//evil.example.com" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn account_routes_require_a_session() {
    let (app, upstream) = storefront().await;

    let response = app
        .oneshot(get_request("/api/account/addresses", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn adding_an_address_sends_api_field_names_then_refetches() {
    let (app, upstream) = storefront().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/account/addresses",
            json!({
                "name": "Asha Rao",
                "phone": "+91 98765 43210",
                "address": "12 MG Road",
                "city": "Pune",
                "state": "MH",
                "pincode": "411001"
            }),
            Some("auth_token=tok-123"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = upstream.payloads.lock().unwrap()[0].clone();
    assert_eq!(payload["addressLine1"], "12 MG Road");
    assert_eq!(payload["postalCode"], "411001");
    assert_eq!(payload["firstName"], "Asha");
    assert_eq!(payload["lastName"], "Rao");
    assert!(payload.get("address").is_none());
    assert!(payload.get("pincode").is_none());

    assert_eq!(
        upstream.calls(),
        vec!["POST /user/addresses", "GET /user/addresses"]
    );
    assert!(upstream
        .auth_headers
        .lock()
        .unwrap()
        .iter()
        .all(|h| h == "Bearer tok-123"));

    let body = body_json(response).await;
    assert_eq!(body[0]["name"], "Asha Rao");
    assert_eq!(body[0]["pincode"], "411001");
    assert_eq!(body[0]["address"], "12 MG Road");
}

#[tokio::test]
async fn deleting_an_address_uses_the_returned_list() {
    let (app, upstream) = storefront().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/account/addresses/a1")
                .header(header::AUTHORIZATION, "Bearer tok-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
    assert_eq!(upstream.calls(), vec!["DELETE /user/addresses/a1"]);
}

#[tokio::test]
async fn updating_an_address_targets_its_id_then_refetches() {
    let (app, upstream) = storefront().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/account/addresses/a1",
            json!({
                "id": "a1",
                "name": "Asha Rao",
                "address": "14 FC Road",
                "city": "Pune",
                "state": "MH",
                "pincode": "411004"
            }),
            Some("auth_token=tok-123"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = upstream.payloads.lock().unwrap()[0].clone();
    assert_eq!(payload["addressLine1"], "14 FC Road");
    assert_eq!(payload["postalCode"], "411004");
    assert!(payload.get("address").is_none());
    assert!(payload.get("pincode").is_none());
    assert!(payload.get("_id").is_none());

    assert_eq!(
        upstream.calls(),
        vec!["PUT /user/addresses/a1", "GET /user/addresses"]
    );

    let body = body_json(response).await;
    assert_eq!(body[0]["id"], "a1");
}

#[tokio::test]
async fn setting_default_uses_the_returned_list() {
    let (app, upstream) = storefront().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/account/addresses/a9/default",
            json!({}),
            Some("auth_token=tok-123"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(upstream.calls(), vec!["PUT /user/addresses/a9/default"]);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "a9");
    assert_eq!(body[0]["isDefault"], true);
    assert_eq!(body[0]["pincode"], "411001");
}

#[tokio::test]
async fn encoded_slashes_in_address_ids_are_refused() {
    let (app, upstream) = storefront().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/account/addresses/..%2F..%2Forders%2F42")
                .header(header::COOKIE, "auth_token=tok-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get_request("/api/products/..%2Fuser%2Fprofile", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn invalid_address_never_reaches_the_api() {
    let (app, upstream) = storefront().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/account/addresses",
            json!({ "name": "Asha", "address": "12 MG Road", "city": "Pune", "pincode": "41" }),
            Some("auth_token=tok-123"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn blog_falls_back_to_static_posts() {
    let (app, _) = storefront().await;

    let response = app
        .oneshot(get_request("/api/blogs?limit=2", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["slug"], "linen-care-guide");
}

#[tokio::test]
async fn coupon_discount_is_capped_at_subtotal() {
    let (app, _) = storefront().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/coupons/validate",
            json!({ "code": " flat500 ", "subtotal": 300 }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], "FLAT500");
    assert_eq!(body["valid"], true);
    assert_eq!(body["discount"], "₹ 300.00");
    assert_eq!(body["total"], "₹ 0.00");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/coupons/validate",
            json!({ "code": "OLD10", "subtotal": 1000 }),
            None,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["message"], "Coupon expired");
    assert_eq!(body["total"], "₹ 1000.00");
}

#[tokio::test]
async fn liveness_does_not_touch_upstream() {
    let (app, upstream) = storefront().await;

    let response = app.oneshot(get_request("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(upstream.calls().is_empty());
}
