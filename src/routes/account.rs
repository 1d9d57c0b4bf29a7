use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::Result,
    models::{AddressForm, UpdateProfileRequest, User},
    services::user_service,
    utils::session::Session,
};

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<User>> {
    let user = user_service::get_profile(&state.api, &session.token).await?;

    Ok(Json(user))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<User>> {
    let user = user_service::update_profile(&state.api, &session.token, payload).await?;

    Ok(Json(user))
}

pub async fn list_addresses(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<AddressForm>>> {
    let addresses = user_service::list_addresses(&state.api, &session.token).await?;

    Ok(Json(addresses))
}

pub async fn add_address(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<AddressForm>,
) -> Result<Json<Vec<AddressForm>>> {
    let addresses = user_service::add_address(&state.api, &session.token, payload).await?;

    Ok(Json(addresses))
}

pub async fn update_address(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(payload): Json<AddressForm>,
) -> Result<Json<Vec<AddressForm>>> {
    let addresses = user_service::update_address(&state.api, &session.token, &id, payload).await?;

    Ok(Json(addresses))
}

pub async fn delete_address(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AddressForm>>> {
    let addresses = user_service::delete_address(&state.api, &session.token, &id).await?;

    Ok(Json(addresses))
}

pub async fn set_default_address(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AddressForm>>> {
    let addresses = user_service::set_default_address(&state.api, &session.token, &id).await?;

    Ok(Json(addresses))
}
