use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    error::AppError,
    utils::session::{self, Session},
};

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(req.headers());

    let token = session::token_from(req.headers(), &jar, &state.session)
        .ok_or_else(|| AppError::Unauthorized("Please sign in to continue".to_string()))?;

    req.extensions_mut().insert(Session { token });

    Ok(next.run(req).await)
}
