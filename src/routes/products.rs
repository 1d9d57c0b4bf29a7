use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    AppState,
    error::Result,
    models::{HomeResponse, ProductCard, ProductDetail, ProductListQuery},
    services::catalog_service,
};

const HOME_SECTION_SIZE: u32 = 8;

pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    let (trending, new_arrivals, collections) = tokio::join!(
        section_cards(&state, "trending"),
        section_cards(&state, "new-arrivals"),
        section_cards(&state, "collections"),
    );

    Json(HomeResponse {
        trending,
        new_arrivals,
        collections,
    })
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<Vec<ProductCard>>> {
    let section = params.section.as_deref().unwrap_or("trending");
    let products = catalog_service::list_products(&state.api, section, params.limit).await?;

    Ok(Json(products.iter().map(ProductCard::from).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>> {
    let product = catalog_service::get_product(&state.api, &slug).await?;

    Ok(Json(ProductDetail::from(product)))
}

/// A carousel that fails to load renders empty instead of failing the page.
async fn section_cards(state: &AppState, section: &str) -> Vec<ProductCard> {
    match catalog_service::list_products(&state.api, section, Some(HOME_SECTION_SIZE)).await {
        Ok(products) => products.iter().map(ProductCard::from).collect(),
        Err(e) => {
            tracing::warn!("Home section {} unavailable: {}", section, e);
            Vec::new()
        }
    }
}
