//! Generic caller-typed relationship endpoints.
//!
//! The relationship type is the one piece of caller input that ends up in
//! query text (Cypher cannot parameterize relationship types), so every
//! handler here parses it through the allow-list first; a rejected name
//! never reaches the store.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use turnstile_core::types::RelationshipType;
use turnstile_core::CoreError;
use turnstile_graph::RelationshipRecord;

use crate::error::{require_any, require_found, ApiError};
use crate::state::AppState;

/// Body of POST/DELETE /relationships, and the query of GET /relationships.
#[derive(Debug, Deserialize)]
pub struct RelationshipRequest {
    pub source_id: String,
    pub target_id: String,
    pub relationship_type: String,
}

/// Body of PUT /relationships.
#[derive(Debug, Deserialize)]
pub struct RetypeRequest {
    pub source_id: String,
    pub target_id: String,
    pub relationship_type: String,
    pub new_relationship_type: String,
}

/// POST /relationships — create an edge of the given type between any two
/// nodes. 404 when either node is absent.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<RelationshipRequest>,
) -> Result<Json<Value>, ApiError> {
    let rel_type = RelationshipType::parse(&req.relationship_type)?;
    let created = state
        .graph
        .create_relationship(&req.source_id, &req.target_id, &rel_type)
        .await?;
    let relationship_id = require_found(created, "Nodes not found or relationship creation failed")?;
    Ok(Json(json!({ "relationship_id": relationship_id })))
}

/// GET /relationships?source_id=&target_id=&relationship_type= — look up
/// edges of the given type between two nodes; 404 when none match.
pub async fn find(
    State(state): State<AppState>,
    Query(req): Query<RelationshipRequest>,
) -> Result<Json<Vec<RelationshipRecord>>, ApiError> {
    let rel_type = RelationshipType::parse(&req.relationship_type)?;
    let found = state
        .graph
        .find_relationships(&req.source_id, &req.target_id, &rel_type)
        .await?;
    let found = require_any(found, "Relationship not found")?;
    Ok(Json(found))
}

/// PUT /relationships — replace the type of an existing edge; 404 when no
/// edge of the old type exists between the nodes.
pub async fn retype(
    State(state): State<AppState>,
    Json(req): Json<RetypeRequest>,
) -> Result<Json<Value>, ApiError> {
    let old_type = RelationshipType::parse(&req.relationship_type)?;
    let new_type = RelationshipType::parse(&req.new_relationship_type)?;
    let retyped = state
        .graph
        .retype_relationship(&req.source_id, &req.target_id, &old_type, &new_type)
        .await?;
    if retyped == 0 {
        return Err(CoreError::NotFound("Relationship not found".to_string()).into());
    }
    Ok(Json(json!({
        "message": format!(
            "Relationship between nodes {} and {} is now '{new_type}'",
            req.source_id, req.target_id
        )
    })))
}

/// DELETE /relationships — remove edges of the given type between two
/// nodes; 404 when the delete matched nothing.
pub async fn remove(
    State(state): State<AppState>,
    Json(req): Json<RelationshipRequest>,
) -> Result<Json<Value>, ApiError> {
    let rel_type = RelationshipType::parse(&req.relationship_type)?;
    let removed = state
        .graph
        .delete_relationship(&req.source_id, &req.target_id, &rel_type)
        .await?;
    if removed == 0 {
        return Err(CoreError::NotFound("Relationship not found".to_string()).into());
    }
    Ok(Json(json!({
        "message": format!(
            "Relationship of type '{rel_type}' between nodes {} and {} has been deleted",
            req.source_id, req.target_id
        )
    })))
}
