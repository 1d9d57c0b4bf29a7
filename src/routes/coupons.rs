use axum::{Json, extract::State, http::HeaderMap};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    error::Result,
    models::{CouponRequest, CouponResponse},
    services::coupon_service,
    utils::session,
};

pub async fn validate_coupon(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(payload): Json<CouponRequest>,
) -> Result<Json<CouponResponse>> {
    // Guests may check coupons too; signed-in shoppers get per-user limits.
    let token = session::token_from(&headers, &jar, &state.session);

    let response = coupon_service::validate_coupon(
        &state.api,
        token.as_deref(),
        &payload.code,
        payload.subtotal,
    )
    .await?;

    Ok(Json(response))
}
