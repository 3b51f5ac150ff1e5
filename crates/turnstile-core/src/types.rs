//! Core domain types for the Turnstile check-in graph.
//!
//! Every node carries a caller-supplied string `id` property; the graph layer
//! matches by property, never by Neo4j-internal node id. Creation performs no
//! duplicate-id check: two creates with the same id produce two distinct
//! nodes.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Longest accepted relationship-type name, in bytes.
pub const MAX_RELATIONSHIP_TYPE_LEN: usize = 64;

// ── Nodes ─────────────────────────────────────────────────────────

/// A person in the check-in domain. `role` separates the admin from ordinary
/// members; bulk checkout spares anyone whose role is "admin".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "member".to_string()
}

/// A user in the social domain. Profile fields are optional at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
}

/// Partial update for a user: only fields present in the request are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
}

impl UserUpdate {
    /// True when the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none() && self.gender.is_none()
    }
}

/// An organization people check in to. Opening/closing times stay unset until
/// explicitly configured; hours-gated operations fail distinctly while unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: Option<String>,
}

/// A post. Content and timestamp are opaque strings, stored as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub timestamp: String,
}

// ── Relationship types ────────────────────────────────────────────

/// A validated relationship-type name for caller-typed edges.
///
/// Cypher has no parameter syntax for relationship types, so the name is
/// woven into the query text. This newtype is the only path to doing that:
/// ASCII letters, digits, and underscores, starting with a letter, at most
/// [`MAX_RELATIONSHIP_TYPE_LEN`] bytes. Everything else is rejected before
/// any store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipType(String);

impl RelationshipType {
    /// Validate a caller-supplied type name against the allow-list.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.is_empty() {
            return Err(CoreError::InvalidRelationshipType(
                "relationship type must not be empty".to_string(),
            ));
        }
        if raw.len() > MAX_RELATIONSHIP_TYPE_LEN {
            return Err(CoreError::InvalidRelationshipType(format!(
                "relationship type exceeds {MAX_RELATIONSHIP_TYPE_LEN} bytes"
            )));
        }
        let bytes = raw.as_bytes();
        if !bytes[0].is_ascii_alphabetic() {
            return Err(CoreError::InvalidRelationshipType(format!(
                "relationship type '{raw}' must start with a letter"
            )));
        }
        if !bytes[1..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            return Err(CoreError::InvalidRelationshipType(format!(
                "relationship type '{raw}' may only contain letters, digits, and underscores"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
