use serde_json::Value;

use crate::{
    error::{AppError, Result},
    models::Product,
    services::api_client::{ApiClient, path_segment},
};

pub const SECTIONS: [&str; 3] = ["trending", "new-arrivals", "collections"];

const DEFAULT_LIMIT: u32 = 12;
const MAX_LIMIT: u32 = 48;

pub async fn list_products(api: &ApiClient, section: &str, limit: Option<u32>) -> Result<Vec<Product>> {
    if !SECTIONS.contains(&section) {
        return Err(AppError::BadRequest(format!("Unknown section: {}", section)));
    }

    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT).to_string();
    let body: Value = api
        .get_with_query(
            "/products",
            &[("section", section), ("limit", limit.as_str())],
            None,
        )
        .await?;

    Ok(products_from(body))
}

pub async fn get_product(api: &ApiClient, slug: &str) -> Result<Product> {
    let slug = path_segment(slug)?;
    let body: Value = api.get(&format!("/products/{}", slug), None).await?;
    let body = match body {
        Value::Object(mut obj) if obj.contains_key("product") => {
            obj.remove("product").unwrap_or(Value::Null)
        }
        other => other,
    };

    serde_json::from_value(body)
        .map_err(|e| AppError::InternalError(format!("Malformed product {}: {}", slug, e)))
}

/// Accepts a bare array or `{ "products": [...] }`; unparseable entries are dropped.
fn products_from(body: Value) -> Vec<Product> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("products") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}
