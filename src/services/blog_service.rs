use serde_json::Value;

use crate::{models::BlogPost, services::api_client::ApiClient};

const DEFAULT_LIMIT: u32 = 6;

/// Shown when the blog feed cannot be loaded.
const FALLBACK_POSTS: [(&str, &str, &str); 3] = [
    (
        "linen-care-guide",
        "How to Care for Linen",
        "Wash cold, dry flat and let the creases tell the story.",
    ),
    (
        "monsoon-wardrobe",
        "Building a Monsoon Wardrobe",
        "Quick-dry fabrics and colours that shrug off the rain.",
    ),
    (
        "size-guide",
        "Finding Your Perfect Fit",
        "Measure once, order with confidence.",
    ),
];

/// Never fails: upstream errors fall back to the built-in posts.
pub async fn list_posts(api: &ApiClient, limit: Option<u32>) -> Vec<BlogPost> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).max(1);

    let fetched = api
        .get_with_query::<Value, _>("/blogs", &[("limit", limit.to_string())], None)
        .await
        .map(posts_from);

    match fetched {
        Ok(posts) if !posts.is_empty() => posts,
        Ok(_) => {
            tracing::warn!("Blog feed was empty, serving fallback posts");
            fallback_posts(limit)
        }
        Err(e) => {
            tracing::warn!("Failed to load blog feed, serving fallback posts: {}", e);
            fallback_posts(limit)
        }
    }
}

pub fn fallback_posts(limit: u32) -> Vec<BlogPost> {
    FALLBACK_POSTS
        .iter()
        .take(limit as usize)
        .map(|(slug, title, excerpt)| BlogPost {
            slug: slug.to_string(),
            title: title.to_string(),
            excerpt: Some(excerpt.to_string()),
            image: None,
            published_at: None,
        })
        .collect()
}

fn posts_from(body: Value) -> Vec<BlogPost> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("blogs").or_else(|| obj.remove("posts")) {
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
