use serde_json::Value;

use crate::{
    error::{AppError, Result},
    models::{AddressForm, ApiAddress, UpdateProfileRequest, User},
    services::api_client::{ApiClient, path_segment},
};

pub async fn get_profile(api: &ApiClient, token: &str) -> Result<User> {
    let body: Value = api.get("/user/profile", Some(token)).await?;
    user_from(body)
}

pub async fn update_profile(
    api: &ApiClient,
    token: &str,
    changes: UpdateProfileRequest,
) -> Result<User> {
    let changes = changes.normalized()?;
    if changes.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".to_string()));
    }

    let body: Value = api.put("/user/profile", &changes, Some(token)).await?;
    user_from(body)
}

pub async fn list_addresses(api: &ApiClient, token: &str) -> Result<Vec<AddressForm>> {
    let body: Value = api.get("/user/addresses", Some(token)).await?;
    Ok(returned_list(body).unwrap_or_default())
}

pub async fn add_address(api: &ApiClient, token: &str, form: AddressForm) -> Result<Vec<AddressForm>> {
    form.validate()?;
    let payload = ApiAddress {
        id: None,
        ..ApiAddress::from(&form)
    };

    let body: Value = api.post("/user/addresses", &payload, Some(token)).await?;
    tracing::info!("Address added");

    refreshed(api, token, body).await
}

pub async fn update_address(
    api: &ApiClient,
    token: &str,
    id: &str,
    form: AddressForm,
) -> Result<Vec<AddressForm>> {
    let id = path_segment(id)?;
    form.validate()?;
    let payload = ApiAddress {
        id: None,
        ..ApiAddress::from(&form)
    };

    let body: Value = api
        .put(&format!("/user/addresses/{}", id), &payload, Some(token))
        .await?;
    tracing::info!("Address {} updated", id);

    refreshed(api, token, body).await
}

pub async fn delete_address(api: &ApiClient, token: &str, id: &str) -> Result<Vec<AddressForm>> {
    let id = path_segment(id)?;
    let body: Value = api
        .delete(&format!("/user/addresses/{}", id), Some(token))
        .await?;
    tracing::info!("Address {} deleted", id);

    refreshed(api, token, body).await
}

pub async fn set_default_address(
    api: &ApiClient,
    token: &str,
    id: &str,
) -> Result<Vec<AddressForm>> {
    let id = path_segment(id)?;
    let body: Value = api
        .put(
            &format!("/user/addresses/{}/default", id),
            &serde_json::json!({}),
            Some(token),
        )
        .await?;
    tracing::info!("Address {} set as default", id);

    refreshed(api, token, body).await
}

/// Uses the list the mutation returned, or fetches it again.
async fn refreshed(api: &ApiClient, token: &str, body: Value) -> Result<Vec<AddressForm>> {
    match returned_list(body) {
        Some(list) => Ok(list),
        None => {
            tracing::debug!("Mutation returned no address list, re-fetching");
            list_addresses(api, token).await
        }
    }
}

/// An address list is either the body itself or its `addresses` field.
fn returned_list(body: Value) -> Option<Vec<AddressForm>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("addresses") {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };

    Some(
        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<ApiAddress>(item) {
                Ok(address) => Some(AddressForm::from(address)),
                Err(e) => {
                    tracing::warn!("Skipping unreadable address entry: {}", e);
                    None
                }
            })
            .collect(),
    )
}

fn user_from(body: Value) -> Result<User> {
    let body = match body {
        Value::Object(mut obj) if obj.contains_key("user") => {
            obj.remove("user").unwrap_or(Value::Null)
        }
        other => other,
    };

    serde_json::from_value(body)
        .map_err(|e| AppError::InternalError(format!("Malformed profile: {}", e)))
}
