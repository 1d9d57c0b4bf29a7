use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        AuthResponse, GoogleAuthRequest, LoginResponse, OtpSentResponse, RedirectTargetRequest,
        SendOtpRequest, VerifyOtpRequest,
    },
    services::auth_service,
    utils::session::{self, DEFAULT_REDIRECT, REDIRECT_COOKIE},
};

pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> Result<Json<OtpSentResponse>> {
    let phone = auth_service::send_otp(&state.api, &payload.phone).await?;

    Ok(Json(OtpSentResponse { phone }))
}

pub async fn verify_otp(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<VerifyOtpRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let auth = auth_service::verify_otp(&state.api, &payload.phone, &payload.code).await?;

    Ok(complete_login(&state, jar, auth))
}

pub async fn google_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<GoogleAuthRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let auth = auth_service::google_sign_in(&state.api, &payload.id_token).await?;

    Ok(complete_login(&state, jar, auth))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(session::session_removal(&state.session)),
        StatusCode::NO_CONTENT,
    )
}

pub async fn set_redirect_target(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<RedirectTargetRequest>,
) -> Result<(CookieJar, StatusCode)> {
    let path = payload.path.trim();
    if !session::is_safe_redirect(path) {
        return Err(AppError::BadRequest("Invalid redirect path".to_string()));
    }

    Ok((
        jar.add(session::redirect_cookie(&state.session, path.to_string())),
        StatusCode::NO_CONTENT,
    ))
}

fn complete_login(
    state: &AppState,
    jar: CookieJar,
    auth: AuthResponse,
) -> (CookieJar, Json<LoginResponse>) {
    let redirect_to = jar
        .get(REDIRECT_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|p| session::is_safe_redirect(p))
        .unwrap_or_else(|| DEFAULT_REDIRECT.to_string());

    let jar = jar
        .add(session::session_cookie(&state.session, auth.token))
        .remove(session::redirect_removal());

    (
        jar,
        Json(LoginResponse {
            user: auth.user,
            redirect_to,
        }),
    )
}
