//! User, post, follow, and like endpoints (social domain).

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use turnstile_core::types::{Post, User, UserUpdate};
use turnstile_core::CoreError;
use turnstile_graph::{PostRecord, UserRecord};

use crate::error::{require_any, require_found, ApiError};
use crate::state::AppState;

/// POST /users — create a User node. No duplicate-id check.
pub async fn create(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<Json<UserRecord>, ApiError> {
    let created = state.graph.create_user(&user).await?;
    Ok(Json(created))
}

/// GET /users — all users. An empty list is a legitimate success here.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>, ApiError> {
    Ok(Json(state.graph.list_users().await?))
}

/// GET /users/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>, ApiError> {
    let user = require_found(state.graph.get_user(&id).await?, "User not found")?;
    Ok(Json(user))
}

/// PUT /users/:id — partial update; only fields present in the body are
/// written. An empty body is rejected before the store is touched.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UserUpdate>,
) -> Result<Json<UserRecord>, ApiError> {
    if body.is_empty() {
        return Err(CoreError::Validation("No fields to update".to_string()).into());
    }
    let user = require_found(state.graph.update_user(&id, &body).await?, "User not found")?;
    Ok(Json(user))
}

/// DELETE /users/:id — 404 when the id matched nothing.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.graph.delete_user(&id).await?;
    if removed == 0 {
        return Err(CoreError::NotFound("User not found".to_string()).into());
    }
    Ok(Json(json!({
        "message": format!("User {id} has been deleted")
    })))
}

/// POST /posts — create a Post node; content and timestamp are opaque.
pub async fn create_post(
    State(state): State<AppState>,
    Json(post): Json<Post>,
) -> Result<Json<PostRecord>, ApiError> {
    let created = state.graph.create_post(&post).await?;
    Ok(Json(created))
}

/// POST /users/:follower_id/follow/:followee_id — create a FOLLOW edge.
///
/// Reports success even when either user is missing and the zero-row MATCH
/// created nothing; the miss is only logged.
pub async fn follow(
    State(state): State<AppState>,
    Path((follower_id, followee_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let created = state.graph.create_follow(&follower_id, &followee_id).await?;
    if !created {
        tracing::debug!(%follower_id, %followee_id, "follow matched no users, no edge created");
    }
    Ok(Json(json!({ "message": "Follow relationship created" })))
}

/// POST /users/:user_id/like/:post_id — create a LIKE edge; same
/// success-on-miss behavior as follow.
pub async fn like(
    State(state): State<AppState>,
    Path((user_id, post_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let created = state.graph.create_like(&user_id, &post_id).await?;
    if !created {
        tracing::debug!(%user_id, %post_id, "like matched no nodes, no edge created");
    }
    Ok(Json(json!({ "message": "Like relationship created" })))
}

/// GET /users/:id/followers — zero followers is a 404 on this endpoint.
pub async fn followers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let list = require_any(
        state.graph.followers(&id).await?,
        "No followers found for this user",
    )?;
    Ok(Json(list))
}

/// GET /users/:id/following
pub async fn following(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let list = require_any(
        state.graph.following(&id).await?,
        "This user is not following anyone",
    )?;
    Ok(Json(list))
}

/// GET /posts/:id/likes
pub async fn likes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let list = require_any(state.graph.likers(&id).await?, "No users liked this post")?;
    Ok(Json(list))
}
