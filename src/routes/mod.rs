mod account;
mod auth;
mod blogs;
mod coupons;
mod health;
mod products;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::{AppState, middleware::auth_middleware};

pub fn create_router(state: AppState) -> Router<AppState> {
    let account = Router::new()
        .route(
            "/profile",
            get(account::get_profile).put(account::update_profile),
        )
        .route(
            "/addresses",
            get(account::list_addresses).post(account::add_address),
        )
        .route(
            "/addresses/{id}",
            put(account::update_address).delete(account::delete_address),
        )
        .route("/addresses/{id}/default", put(account::set_default_address))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    let api = Router::new()
        .route("/home", get(products::home))
        .route("/products", get(products::list_products))
        .route("/products/{slug}", get(products::get_product))
        .route("/auth/otp/send", post(auth::send_otp))
        .route("/auth/otp/verify", post(auth::verify_otp))
        .route("/auth/google", post(auth::google_auth))
        .route("/auth/logout", post(auth::logout))
        .route("/session/redirect", put(auth::set_redirect_target))
        .route("/blogs", get(blogs::list_posts))
        .route("/coupons/validate", post(coupons::validate_coupon))
        .nest("/account", account);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api", api)
}
