use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::SecondsFormat;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use bulletin_db::models::MessageRow;
use bulletin_types::api::{MessageResponse, PostMessageRequest, VoteAction, VoteRequest};

use crate::auth::AppState;
use crate::error::{ApiError, join_error};
use crate::middleware::CurrentUser;
use crate::validate::escape_for_display;

pub const PAGE_SIZE: u32 = 8;

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    #[serde(default)]
    pub page: u32,
}

pub async fn post_message(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<PostMessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let row = MessageRow {
        id: Uuid::new_v4().to_string(),
        content: escape_for_display(&req.content),
        username: user.username,
        // fixed-width fractional seconds so lexicographic order is time order
        created_at: chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        upvotes: 0,
        downvotes: 0,
    };

    let db = state.clone();
    let stored = row_to_response(&row);
    tokio::task::spawn_blocking(move || db.db.insert_message(&row))
        .await
        .map_err(join_error)??;

    Ok(Json(stored))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let db = state.clone();
    let offset = query.page.saturating_mul(PAGE_SIZE);
    let rows = tokio::task::spawn_blocking(move || db.db.list_recent(PAGE_SIZE, offset))
        .await
        .map_err(join_error)??;

    Ok(Json(rows.iter().map(row_to_response).collect()))
}

pub async fn vote_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(_user): Extension<CurrentUser>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    // Any authenticated user may vote, any number of times, own messages
    // included.
    let action: VoteAction = req
        .action
        .parse()
        .map_err(|_| ApiError::BadInput(format!("unknown action {}", req.action)))?;

    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.vote_message(&id.to_string(), action))
        .await
        .map_err(join_error)??
        .ok_or_else(|| ApiError::NotFound(format!("message {id} does not exist")))?;

    Ok(Json(row_to_response(&row)))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<MessageResponse>, ApiError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_message(&id.to_string()))
        .await
        .map_err(join_error)??
        .ok_or_else(|| ApiError::NotFound(format!("message {id} does not exist")))?;

    if row.username != user.username {
        return Err(ApiError::Forbidden);
    }

    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.delete_message(&id.to_string()))
        .await
        .map_err(join_error)??;

    Ok(Json(row_to_response(&row)))
}

fn row_to_response(row: &MessageRow) -> MessageResponse {
    MessageResponse {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt message id '{}': {}", row.id, e);
            Uuid::default()
        }),
        content: row.content.clone(),
        username: row.username.clone(),
        created_at: row.created_at.parse().unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on message '{}': {}", row.created_at, row.id, e);
            chrono::DateTime::default()
        }),
        upvotes: row.upvotes,
        downvotes: row.downvotes,
    }
}
