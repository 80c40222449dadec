pub mod auth;
pub mod error;
pub mod messages;
pub mod middleware;
pub mod validate;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::auth::AppState;
use crate::middleware::require_auth;

/// Build the full HTTP surface. Reading messages needs no session; every
/// mutating message route goes through the auth middleware.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/signup/", post(auth::signup))
        .route("/signin/", post(auth::signin))
        .route("/signout/", get(auth::signout))
        .route("/api/messages/", get(messages::list_messages))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/api/messages/", post(messages::post_message))
        .route(
            "/api/messages/{id}/",
            patch(messages::vote_message).delete(messages::delete_message),
        )
        .layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    public.merge(protected)
}
