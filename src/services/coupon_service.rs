use rust_decimal::Decimal;
use serde_json::json;

use crate::{
    error::{AppError, Result},
    models::{CouponResponse, CouponValidation},
    pricing::format_price,
    services::api_client::ApiClient,
};

pub async fn validate_coupon(
    api: &ApiClient,
    token: Option<&str>,
    code: &str,
    subtotal: Decimal,
) -> Result<CouponResponse> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(AppError::BadRequest("Enter a coupon code".to_string()));
    }

    if subtotal.is_sign_negative() {
        return Err(AppError::BadRequest("Invalid cart subtotal".to_string()));
    }

    let verdict: CouponValidation = api
        .post(
            "/coupons/validate",
            &json!({ "code": code, "subtotal": subtotal }),
            token,
        )
        .await?;

    Ok(apply(code, subtotal, verdict))
}

/// The discount can never exceed the subtotal nor go below zero.
fn apply(code: String, subtotal: Decimal, verdict: CouponValidation) -> CouponResponse {
    let discount = if verdict.valid {
        verdict.discount.unwrap_or(Decimal::ZERO).clamp(Decimal::ZERO, subtotal)
    } else {
        Decimal::ZERO
    };

    CouponResponse {
        code,
        valid: verdict.valid,
        message: verdict.message,
        discount: format_price(discount),
        total: format_price(subtotal - discount),
    }
}
