//! Route table for the Turnstile HTTP API.

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;
use crate::{checkin, organization, relationships, users};

/// Assemble the full router with shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Batch check-in and bulk checkout (organization-agnostic variants).
        .route("/checkin", post(checkin::check_in_many))
        .route("/checkin/active-users", get(checkin::active_users))
        .route("/checkout", post(checkin::checkout_all))
        .route("/checkout/admin", post(checkin::checkout_admin_legacy))
        // Organizations and the hours-gated flows.
        .route("/organizations", post(organization::create))
        .route("/organization/set-times", post(organization::set_times))
        .route("/organization/checkin", post(organization::gated_check_in))
        .route(
            "/organization/active-users",
            get(organization::active_users),
        )
        .route(
            "/organization/auto-checkout",
            post(organization::auto_checkout),
        )
        .route(
            "/organization/admin-checkout",
            post(organization::admin_checkout),
        )
        // People and the social domain.
        .route("/persons", post(checkin::create_person))
        .route("/users", post(users::create).get(users::list))
        .route(
            "/users/:id",
            get(users::get_by_id).put(users::update).delete(users::remove),
        )
        .route("/posts", post(users::create_post))
        .route("/users/:follower_id/follow/:followee_id", post(users::follow))
        .route("/users/:user_id/like/:post_id", post(users::like))
        .route("/users/:id/followers", get(users::followers))
        .route("/users/:id/following", get(users::following))
        .route("/posts/:id/likes", get(users::likes))
        // Caller-typed relationships.
        .route(
            "/relationships",
            post(relationships::create)
                .get(relationships::find)
                .put(relationships::retype)
                .delete(relationships::remove),
        )
        .with_state(state)
}
