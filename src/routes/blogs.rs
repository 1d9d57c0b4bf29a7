use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    models::{BlogPost, BlogQuery},
    services::blog_service,
};

pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<BlogQuery>,
) -> Json<Vec<BlogPost>> {
    Json(blog_service::list_posts(&state.api, params.limit).await)
}
