use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::lenient;

#[derive(Debug, Deserialize)]
pub struct CouponRequest {
    pub code: String,
    pub subtotal: Decimal,
}

/// Verdict returned by the commerce API.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CouponValidation {
    pub valid: bool,
    #[serde(deserialize_with = "lenient::decimal")]
    pub discount: Option<Decimal>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub code: String,
    pub valid: bool,
    pub message: Option<String>,
    pub discount: String,
    pub total: String,
}
