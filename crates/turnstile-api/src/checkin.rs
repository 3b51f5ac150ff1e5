//! Check-in and checkout endpoints: the organization-agnostic batch/bulk
//! variants. The hours-gated flows live in [`crate::organization`].

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use turnstile_core::types::Person;
use turnstile_graph::PersonRecord;

use crate::error::{require_any, ApiError};
use crate::state::AppState;

/// One entry in a batch check-in request.
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub user_id: String,
    pub org_id: String,
}

/// Per-user outcome of a batch check-in.
#[derive(Debug, Serialize)]
pub struct CheckInStatus {
    pub user_id: String,
    pub status: String,
}

/// Query parameter carrying the organization id.
#[derive(Debug, Deserialize)]
pub struct OrgQuery {
    pub org_id: String,
}

/// POST /checkin — check in a batch of users, one by one. Each entry gets
/// its own status; a missing person or organization is reported per entry,
/// not as a request-level failure.
pub async fn check_in_many(
    State(state): State<AppState>,
    Json(batch): Json<Vec<CheckInRequest>>,
) -> Result<Json<Value>, ApiError> {
    let mut results = Vec::with_capacity(batch.len());
    for entry in batch {
        let checked_in = state.graph.check_in(&entry.user_id, &entry.org_id).await?;
        let status = if checked_in {
            "Checked in successfully"
        } else {
            "User or Organization not found"
        };
        results.push(CheckInStatus {
            user_id: entry.user_id,
            status: status.to_string(),
        });
    }
    Ok(Json(json!({ "results": results })))
}

/// GET /checkin/active-users — everyone checked in anywhere, grouped by
/// role. Zero groups is a 404 here, not an empty success.
pub async fn active_users(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let groups = state.graph.active_by_role(None).await?;
    let groups = require_any(groups, "No active users found")?;
    Ok(Json(json!({ "active_users": groups })))
}

/// POST /checkout?org_id= — check out every non-admin. Bulk delete is
/// idempotent: zero matches is still a success.
pub async fn checkout_all(
    State(state): State<AppState>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.graph.checkout_non_admin(&params.org_id).await?;
    tracing::debug!(org_id = %params.org_id, removed, "bulk checkout");
    Ok(Json(json!({
        "message": "All non-admin users have been checked out"
    })))
}

/// POST /checkout/admin?org_id= — check out the admin. Always reports
/// success even when the admin held no CHECKED_IN edge; the strict variant
/// is POST /organization/admin-checkout.
pub async fn checkout_admin_legacy(
    State(state): State<AppState>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.graph.checkout_admin(&params.org_id).await?;
    tracing::debug!(org_id = %params.org_id, removed, "admin checkout");
    Ok(Json(json!({ "message": "Admin has been checked out" })))
}

/// POST /persons — create a Person node for the check-in domain. Role
/// defaults to "member" so the bulk-checkout admin guard applies cleanly.
pub async fn create_person(
    State(state): State<AppState>,
    Json(person): Json<Person>,
) -> Result<Json<PersonRecord>, ApiError> {
    let created = state.graph.create_person(&person).await?;
    Ok(Json(created))
}
