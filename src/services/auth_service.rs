use serde_json::{Value, json};

use crate::{
    error::{AppError, Result},
    models::AuthResponse,
    services::api_client::ApiClient,
    utils::phone,
};

pub async fn send_otp(api: &ApiClient, raw_phone: &str) -> Result<String> {
    let phone = phone::to_e164(raw_phone)
        .ok_or_else(|| AppError::BadRequest("Enter a valid 10-digit mobile number".to_string()))?;

    let _: Value = api
        .post("/auth/otp/send", &json!({ "phone": phone }), None)
        .await?;

    tracing::info!("OTP requested for {}", mask(&phone));

    Ok(phone)
}

pub async fn verify_otp(api: &ApiClient, raw_phone: &str, code: &str) -> Result<AuthResponse> {
    let phone = phone::to_e164(raw_phone)
        .ok_or_else(|| AppError::BadRequest("Enter a valid 10-digit mobile number".to_string()))?;

    let code = code.trim();
    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest("OTP must be 6 digits".to_string()));
    }

    let auth: AuthResponse = api
        .post("/auth/otp/verify", &json!({ "phone": phone, "code": code }), None)
        .await?;

    tracing::info!("Phone sign-in succeeded for {}", mask(&phone));

    Ok(auth)
}

pub async fn google_sign_in(api: &ApiClient, id_token: &str) -> Result<AuthResponse> {
    if id_token.trim().is_empty() {
        return Err(AppError::BadRequest("Missing Google credential".to_string()));
    }

    let auth: AuthResponse = api
        .post("/auth/google", &json!({ "idToken": id_token }), None)
        .await?;

    tracing::info!("Google sign-in succeeded");

    Ok(auth)
}

fn mask(phone: &str) -> String {
    let visible = phone.len().saturating_sub(4);
    format!("{}{}", "*".repeat(visible), &phone[visible..])
}
