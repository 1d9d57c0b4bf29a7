pub mod api_client;
pub mod auth_service;
pub mod blog_service;
pub mod catalog_service;
pub mod coupon_service;
pub mod user_service;

pub use api_client::ApiClient;
