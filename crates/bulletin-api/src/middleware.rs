use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use crate::auth::AppState;
use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "token";
pub const USERNAME_COOKIE: &str = "username";

/// The authenticated identity, inserted into request extensions by
/// [`require_auth`] for downstream handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

/// Resolve the session cookie against the session directory.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(req.headers()).ok_or(ApiError::Unauthorized)?;
    let username = state.sessions.resolve(&token).ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(CurrentUser { username });
    Ok(next.run(req).await)
}

pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_value(raw, SESSION_COOKIE)
}

fn cookie_value(raw: &str, name: &str) -> Option<String> {
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
