//! Read operations for the Turnstile graph.

use std::collections::BTreeMap;

use neo4rs::query;

use turnstile_core::types::RelationshipType;

use crate::client::{GraphClient, GraphError};

/// A person projection returned from check-in queries.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PersonRecord {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// A user projection with profile fields. Fields omitted at creation read
/// back as their defaults (empty string, zero).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub gender: String,
}

/// An organization projection; times stay `None` until configured.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OrganizationRecord {
    pub id: String,
    pub name: String,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
}

/// A post projection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub content: String,
    pub timestamp: String,
}

/// One member of a role group in the active-users listing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ActiveMember {
    pub id: String,
    pub name: String,
}

/// Everyone checked in under one role.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RoleGroup {
    pub role: String,
    pub users: Vec<ActiveMember>,
}

/// A caller-typed relationship projection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RelationshipRecord {
    pub id: String,
    pub relationship_type: String,
    pub source_id: String,
    pub target_id: String,
}

impl GraphClient {
    // ── Single Node Lookups ──────────────────────────────────────

    /// Get a user by id.
    pub async fn get_user(&self, id: &str) -> Result<Option<UserRecord>, GraphError> {
        let q = query("MATCH (u:User {id: $id}) RETURN u").param("id", id.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(Some(node_to_user(&get_node(&row, "u")?))),
            None => Ok(None),
        }
    }

    /// Get an organization by id, with whatever hours it has configured.
    pub async fn organization(&self, id: &str) -> Result<Option<OrganizationRecord>, GraphError> {
        let q = query("MATCH (o:Organization {id: $id}) RETURN o").param("id", id.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(Some(node_to_organization(&get_node(&row, "o")?))),
            None => Ok(None),
        }
    }

    // ── List Queries ─────────────────────────────────────────────

    /// List all users. An empty graph yields an empty list, not an error.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, GraphError> {
        let q = query("MATCH (u:User) RETURN u ORDER BY u.id");

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(node_to_user(&get_node(&row, "u")?));
        }
        Ok(results)
    }

    // ── One-Hop Traversals ───────────────────────────────────────

    /// Users following the given user. Parallel FOLLOW edges are not
    /// deduplicated, so a double-follower appears twice.
    pub async fn followers(&self, user_id: &str) -> Result<Vec<UserRecord>, GraphError> {
        let q = query(
            "MATCH (follower:User)-[:FOLLOW]->(u:User {id: $id})
             RETURN follower",
        )
        .param("id", user_id.to_string());

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(node_to_user(&get_node(&row, "follower")?));
        }
        Ok(results)
    }

    /// Users the given user follows, duplicates included.
    pub async fn following(&self, user_id: &str) -> Result<Vec<UserRecord>, GraphError> {
        let q = query(
            "MATCH (u:User {id: $id})-[:FOLLOW]->(followee:User)
             RETURN followee",
        )
        .param("id", user_id.to_string());

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(node_to_user(&get_node(&row, "followee")?));
        }
        Ok(results)
    }

    /// Users who liked the given post, duplicates included.
    pub async fn likers(&self, post_id: &str) -> Result<Vec<UserRecord>, GraphError> {
        let q = query(
            "MATCH (u:User)-[:LIKE]->(p:Post {id: $id})
             RETURN u",
        )
        .param("id", post_id.to_string());

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(node_to_user(&get_node(&row, "u")?));
        }
        Ok(results)
    }

    // ── Check-In Listings ────────────────────────────────────────

    /// Every checked-in person, grouped by role, optionally scoped to one
    /// organization. Rows come back flat and are grouped here; groups are
    /// ordered by role name.
    pub async fn active_by_role(&self, org_id: Option<&str>) -> Result<Vec<RoleGroup>, GraphError> {
        let q = match org_id {
            Some(id) => query(
                "MATCH (p:Person)-[:CHECKED_IN]->(o:Organization {id: $org_id})
                 RETURN p.role AS role, p.id AS id, p.name AS name
                 ORDER BY p.role, p.id",
            )
            .param("org_id", id.to_string()),
            None => query(
                "MATCH (p:Person)-[:CHECKED_IN]->(:Organization)
                 RETURN p.role AS role, p.id AS id, p.name AS name
                 ORDER BY p.role, p.id",
            ),
        };

        let rows = self.query_rows(q).await?;
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let role: String = row.get("role").unwrap_or_default();
            let member = ActiveMember {
                id: row.get("id").unwrap_or_default(),
                name: row.get("name").unwrap_or_default(),
            };
            entries.push((role, member));
        }
        Ok(group_by_role(entries))
    }

    // ── Caller-Typed Relationships ───────────────────────────────

    /// Find relationships of the given (validated) type between two nodes.
    pub async fn find_relationships(
        &self,
        source_id: &str,
        target_id: &str,
        rel_type: &RelationshipType,
    ) -> Result<Vec<RelationshipRecord>, GraphError> {
        let cypher = format!(
            "MATCH (source {{id: $source_id}})-[r:{rel_type}]->(target {{id: $target_id}})
             RETURN r.id AS id, type(r) AS relationship_type,
                    source.id AS source_id, target.id AS target_id"
        );

        let q = query(&cypher)
            .param("source_id", source_id.to_string())
            .param("target_id", target_id.to_string());

        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(RelationshipRecord {
                id: row.get("id").unwrap_or_default(),
                relationship_type: row.get("relationship_type").unwrap_or_default(),
                source_id: row.get("source_id").unwrap_or_default(),
                target_id: row.get("target_id").unwrap_or_default(),
            });
        }
        Ok(results)
    }
}

// ── Row/Node Conversion ──────────────────────────────────────────

pub(crate) fn get_node(row: &neo4rs::Row, alias: &str) -> Result<neo4rs::Node, GraphError> {
    row.get(alias)
        .map_err(|e| GraphError::Deserialization(format!("failed to read node '{alias}': {e}")))
}

pub(crate) fn node_to_person(node: &neo4rs::Node) -> PersonRecord {
    PersonRecord {
        id: node.get("id").unwrap_or_default(),
        name: node.get("name").unwrap_or_default(),
        role: node.get("role").unwrap_or_default(),
    }
}

pub(crate) fn node_to_user(node: &neo4rs::Node) -> UserRecord {
    UserRecord {
        id: node.get("id").unwrap_or_default(),
        name: node.get("name").unwrap_or_default(),
        email: node.get("email").unwrap_or_default(),
        age: node.get("age").unwrap_or_default(),
        gender: node.get("gender").unwrap_or_default(),
    }
}

pub(crate) fn node_to_organization(node: &neo4rs::Node) -> OrganizationRecord {
    OrganizationRecord {
        id: node.get("id").unwrap_or_default(),
        name: node.get("name").unwrap_or_default(),
        opening_time: node.get::<String>("opening_time").ok(),
        closing_time: node.get::<String>("closing_time").ok(),
    }
}

pub(crate) fn node_to_post(node: &neo4rs::Node) -> PostRecord {
    PostRecord {
        id: node.get("id").unwrap_or_default(),
        content: node.get("content").unwrap_or_default(),
        timestamp: node.get("timestamp").unwrap_or_default(),
    }
}

/// Group flat (role, member) rows into role-ordered groups, preserving the
/// per-role row order (including duplicates).
fn group_by_role(entries: Vec<(String, ActiveMember)>) -> Vec<RoleGroup> {
    let mut grouped: BTreeMap<String, Vec<ActiveMember>> = BTreeMap::new();
    for (role, member) in entries {
        grouped.entry(role).or_default().push(member);
    }
    grouped
        .into_iter()
        .map(|(role, users)| RoleGroup { role, users })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, name: &str) -> ActiveMember {
        ActiveMember {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_group_by_role_orders_roles() {
        let groups = group_by_role(vec![
            ("member".to_string(), member("3", "Cal")),
            ("admin".to_string(), member("1", "Ada")),
            ("member".to_string(), member("2", "Bo")),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].role, "admin");
        assert_eq!(groups[0].users.len(), 1);
        assert_eq!(groups[1].role, "member");
        assert_eq!(groups[1].users.len(), 2);
        assert_eq!(groups[1].users[0].id, "3");
        assert_eq!(groups[1].users[1].id, "2");
    }

    #[test]
    fn test_group_by_role_empty() {
        assert!(group_by_role(Vec::new()).is_empty());
    }

    #[test]
    fn test_group_by_role_preserves_duplicates() {
        let groups = group_by_role(vec![
            ("member".to_string(), member("1", "Ada")),
            ("member".to_string(), member("1", "Ada")),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].users.len(), 2);
    }
}
