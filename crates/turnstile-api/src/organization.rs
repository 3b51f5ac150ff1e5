//! Organization endpoints: hours configuration and the hours-gated check-in,
//! listing, and checkout flows.
//!
//! Gated flows read the organization's hours first and then conditionally
//! mutate. The two steps are not atomic: a concurrent set-times call can land
//! between them. Accepted limitation; the store's own per-query guarantees
//! are the only coordination.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Local, Timelike};
use serde::Deserialize;
use serde_json::{json, Value};

use turnstile_core::hours::{OperatingHours, TimeOfDay};
use turnstile_core::types::Organization;
use turnstile_core::CoreError;
use turnstile_graph::{OrganizationRecord, RoleGroup};

use crate::checkin::OrgQuery;
use crate::error::{require_any, require_found, ApiError};
use crate::state::AppState;

/// Current wall-clock time at minute granularity.
fn now() -> TimeOfDay {
    let local = Local::now();
    TimeOfDay::from_hm(local.hour(), local.minute())
}

/// Fetch an organization and its configured hours, mapping absence and unset
/// times to their distinct failure modes (404 vs 400).
async fn org_hours(
    state: &AppState,
    org_id: &str,
) -> Result<(OrganizationRecord, OperatingHours), ApiError> {
    let org = require_found(
        state.graph.organization(org_id).await?,
        "Organization not found",
    )?;
    let (opening, closing) = match (&org.opening_time, &org.closing_time) {
        (Some(o), Some(c)) => (o.clone(), c.clone()),
        _ => {
            return Err(CoreError::HoursNotSet(format!(
                "Organization {org_id} has no opening/closing times configured"
            ))
            .into())
        }
    };
    let hours = OperatingHours::from_strings(&opening, &closing)?;
    Ok((org, hours))
}

/// POST /organizations — create an Organization node.
pub async fn create(
    State(state): State<AppState>,
    Json(org): Json<Organization>,
) -> Result<Json<OrganizationRecord>, ApiError> {
    let created = state.graph.create_organization(&org).await?;
    Ok(Json(created))
}

/// Body of POST /organization/set-times.
#[derive(Debug, Deserialize)]
pub struct SetTimesRequest {
    pub org_id: String,
    pub opening_time: String,
    pub closing_time: String,
}

/// POST /organization/set-times — configure the operating window.
///
/// Both boundaries are validated (strict HH:MM, opening <= closing) before
/// the store is touched. An unknown organization id is a silent no-op: the
/// update matches nothing and the endpoint still answers 200, so callers
/// cannot take success as proof the update landed.
pub async fn set_times(
    State(state): State<AppState>,
    Json(req): Json<SetTimesRequest>,
) -> Result<Json<Value>, ApiError> {
    let hours = OperatingHours::from_strings(&req.opening_time, &req.closing_time)?;
    let updated = state.graph.set_organization_hours(&req.org_id, &hours).await?;
    if updated.is_none() {
        tracing::debug!(org_id = %req.org_id, "set-times matched no organization");
    }
    Ok(Json(json!({ "message": "Operating hours updated" })))
}

/// Body of POST /organization/checkin.
#[derive(Debug, Deserialize)]
pub struct GatedCheckInRequest {
    pub user_id: String,
    pub org_id: String,
}

/// POST /organization/checkin — check-in gated by the operating window:
/// 404 when the organization or person is absent, 400 when hours are unset,
/// 403 outside the window.
pub async fn gated_check_in(
    State(state): State<AppState>,
    Json(req): Json<GatedCheckInRequest>,
) -> Result<Json<Value>, ApiError> {
    let (_, hours) = org_hours(&state, &req.org_id).await?;
    if !hours.is_open(now()) {
        return Err(CoreError::OutsideHours(format!(
            "Organization {} is outside operating hours",
            req.org_id
        ))
        .into());
    }

    let checked_in = state.graph.check_in(&req.user_id, &req.org_id).await?;
    if !checked_in {
        return Err(CoreError::NotFound("User not found".to_string()).into());
    }
    Ok(Json(json!({ "message": "Checked in successfully" })))
}

/// GET /organization/active-users?org_id= — checked-in people grouped by
/// role. Outside the operating window only admin groups are listed.
pub async fn active_users(
    State(state): State<AppState>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<Value>, ApiError> {
    let (_, hours) = org_hours(&state, &params.org_id).await?;

    let mut groups: Vec<RoleGroup> = state.graph.active_by_role(Some(&params.org_id)).await?;
    if !hours.is_open(now()) {
        groups.retain(|g| g.role == "admin");
    }
    let groups = require_any(groups, "No active users found")?;
    Ok(Json(json!({ "active_users": groups })))
}

/// POST /organization/auto-checkout?org_id= — bulk non-admin checkout, but
/// only once the window has fully elapsed. Exactly at closing time nothing
/// happens; one minute past, it fires.
pub async fn auto_checkout(
    State(state): State<AppState>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<Value>, ApiError> {
    let (_, hours) = org_hours(&state, &params.org_id).await?;
    if !hours.is_past_closing(now()) {
        return Ok(Json(json!({
            "message": "Organization is still within operating hours"
        })));
    }

    let removed = state.graph.checkout_non_admin(&params.org_id).await?;
    Ok(Json(json!({
        "message": format!("Checked out {removed} users past closing time")
    })))
}

/// POST /organization/admin-checkout?org_id= — check out the admin,
/// reporting 404 when no admin edge existed (unlike the legacy
/// /checkout/admin, which always succeeds).
pub async fn admin_checkout(
    State(state): State<AppState>,
    Query(params): Query<OrgQuery>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.graph.checkout_admin(&params.org_id).await?;
    if removed == 0 {
        return Err(CoreError::NotFound(
            "Admin is not checked in to this organization".to_string(),
        )
        .into());
    }
    Ok(Json(json!({ "message": "Admin has been checked out" })))
}
