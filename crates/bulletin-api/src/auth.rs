use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Redirect},
};

use bulletin_auth::{password, session::SessionDirectory};
use bulletin_db::Database;
use bulletin_types::api::CredentialsRequest;

use crate::error::{ApiError, join_error};
use crate::middleware::{SESSION_COOKIE, USERNAME_COOKIE, session_token};
use crate::validate::{require_alphanumeric, require_min_length};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub sessions: SessionDirectory,
}

const MIN_PASSWORD_LEN: usize = 8;
// 1 week in number of seconds, matching the session directory TTL
const COOKIE_MAX_AGE: i64 = 60 * 60 * 24 * 7;

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_alphanumeric("username", &req.username)?;
    require_min_length("password", &req.password, MIN_PASSWORD_LEN)?;

    // Check if username is taken
    let db = state.clone();
    let username = req.username.clone();
    let existing = tokio::task::spawn_blocking(move || db.db.get_user_by_username(&username))
        .await
        .map_err(join_error)??;
    if existing.is_some() {
        return Err(ApiError::Conflict(format!(
            "username {} already exists",
            req.username
        )));
    }

    let salt = password::generate_salt();
    let hash = password::hash_password(&req.password, &salt)?;

    let db = state.clone();
    let username = req.username.clone();
    tokio::task::spawn_blocking(move || db.db.create_user(&username, &salt, &hash))
        .await
        .map_err(join_error)??;

    Ok(Json(format!("user {} signed up", req.username)))
}

pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_alphanumeric("username", &req.username)?;
    require_min_length("password", &req.password, MIN_PASSWORD_LEN)?;

    let db = state.clone();
    let username = req.username.clone();
    let user = tokio::task::spawn_blocking(move || db.db.get_user_by_username(&username))
        .await
        .map_err(join_error)??
        .ok_or(ApiError::Unauthorized)?;

    if !password::verify_password(&req.password, &user.salt, &user.pass_hash)? {
        return Err(ApiError::Unauthorized);
    }

    let token = state.sessions.create(&user.username);

    let mut headers = HeaderMap::new();
    // The token cookie carries the session and never reaches page scripts.
    // The username cookie is a client-side UI convenience, not trust-bearing.
    append_cookie(
        &mut headers,
        &format!(
            "{SESSION_COOKIE}={token}; Path=/; Max-Age={COOKIE_MAX_AGE}; HttpOnly; SameSite=Strict"
        ),
    )?;
    append_cookie(
        &mut headers,
        &format!(
            "{USERNAME_COOKIE}={}; Path=/; Max-Age={COOKIE_MAX_AGE}; SameSite=Strict",
            user.username
        ),
    )?;

    Ok((headers, Json(format!("user {} signed in", user.username))))
}

pub async fn signout(
    State(state): State<AppState>,
    req_headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = session_token(&req_headers) {
        state.sessions.destroy(&token);
    }

    let mut headers = HeaderMap::new();
    append_cookie(
        &mut headers,
        &format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Strict"),
    )?;
    append_cookie(
        &mut headers,
        &format!("{USERNAME_COOKIE}=; Path=/; Max-Age=0; SameSite=Strict"),
    )?;

    Ok((headers, Redirect::to("/")))
}

fn append_cookie(headers: &mut HeaderMap, cookie: &str) -> Result<(), ApiError> {
    let value = HeaderValue::from_str(cookie).map_err(|e| ApiError::Internal(e.into()))?;
    headers.append(header::SET_COOKIE, value);
    Ok(())
}
