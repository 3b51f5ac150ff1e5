//! Write operations for the Turnstile graph.
//!
//! CHECKED_IN uses MERGE so a (person, organization) pair never holds more
//! than one edge; FOLLOW and LIKE use plain CREATE and accumulate duplicates
//! on repeated calls. Deletes return their affected-edge count so callers can
//! tell a no-op from a match.

use neo4rs::query;
use uuid::Uuid;

use turnstile_core::hours::OperatingHours;
use turnstile_core::types::{Organization, Person, Post, RelationshipType, User, UserUpdate};

use crate::client::{GraphClient, GraphError};
use crate::queries::{
    get_node, node_to_organization, node_to_person, node_to_post, node_to_user,
    OrganizationRecord, PersonRecord, PostRecord, UserRecord,
};

impl GraphClient {
    // ── Node Creation ────────────────────────────────────────────

    /// Create a Person node. No duplicate-id check: a second create with the
    /// same id produces a second node.
    pub async fn create_person(&self, person: &Person) -> Result<PersonRecord, GraphError> {
        let q = query(
            "CREATE (p:Person {id: $id, name: $name, role: $role})
             RETURN p",
        )
        .param("id", person.id.clone())
        .param("name", person.name.clone())
        .param("role", person.role.clone());

        let row = created_row(self.query_one(q).await?)?;
        Ok(node_to_person(&get_node(&row, "p")?))
    }

    /// Create a User node. Omitted profile fields are stored as defaults.
    pub async fn create_user(&self, user: &User) -> Result<UserRecord, GraphError> {
        let q = query(
            "CREATE (u:User {id: $id, name: $name, email: $email, age: $age, gender: $gender})
             RETURN u",
        )
        .param("id", user.id.clone())
        .param("name", user.name.clone())
        .param("email", opt_string(&user.email))
        .param("age", user.age.unwrap_or_default())
        .param("gender", opt_string(&user.gender));

        let row = created_row(self.query_one(q).await?)?;
        Ok(node_to_user(&get_node(&row, "u")?))
    }

    /// Create an Organization node. Hours stay unset until configured.
    pub async fn create_organization(
        &self,
        org: &Organization,
    ) -> Result<OrganizationRecord, GraphError> {
        let q = query(
            "CREATE (o:Organization {id: $id, name: $name})
             RETURN o",
        )
        .param("id", org.id.clone())
        .param("name", opt_string(&org.name));

        let row = created_row(self.query_one(q).await?)?;
        Ok(node_to_organization(&get_node(&row, "o")?))
    }

    /// Create a Post node. Content and timestamp are stored as given.
    pub async fn create_post(&self, post: &Post) -> Result<PostRecord, GraphError> {
        let q = query(
            "CREATE (p:Post {id: $id, content: $content, timestamp: $timestamp})
             RETURN p",
        )
        .param("id", post.id.clone())
        .param("content", post.content.clone())
        .param("timestamp", post.timestamp.clone());

        let row = created_row(self.query_one(q).await?)?;
        Ok(node_to_post(&get_node(&row, "p")?))
    }

    // ── Organization Hours ───────────────────────────────────────

    /// Set the operating window on an existing organization. Returns `None`
    /// when the id matched nothing; the legacy endpoint treats that as a
    /// silent no-op, so callers must not assume the update landed.
    pub async fn set_organization_hours(
        &self,
        org_id: &str,
        hours: &OperatingHours,
    ) -> Result<Option<OrganizationRecord>, GraphError> {
        let q = query(
            "MATCH (o:Organization {id: $id})
             SET o.opening_time = $opening, o.closing_time = $closing
             RETURN o",
        )
        .param("id", org_id.to_string())
        .param("opening", hours.opening().to_string())
        .param("closing", hours.closing().to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(Some(node_to_organization(&get_node(&row, "o")?))),
            None => Ok(None),
        }
    }

    // ── Check-In / Checkout ──────────────────────────────────────

    /// Check a person in to an organization via idempotent MERGE. Returns
    /// false when either node is absent (nothing matched, no edge created).
    pub async fn check_in(&self, person_id: &str, org_id: &str) -> Result<bool, GraphError> {
        let q = query(
            "MATCH (p:Person {id: $person_id}), (o:Organization {id: $org_id})
             MERGE (p)-[r:CHECKED_IN]->(o)
             RETURN p.id AS person_id",
        )
        .param("person_id", person_id.to_string())
        .param("org_id", org_id.to_string());

        Ok(self.query_one(q).await?.is_some())
    }

    /// Remove the CHECKED_IN edges of every non-admin person in the
    /// organization. The admin's edge is never touched. Returns the count of
    /// removed edges; zero is a legitimate outcome.
    pub async fn checkout_non_admin(&self, org_id: &str) -> Result<i64, GraphError> {
        let q = query(
            "MATCH (p:Person)-[r:CHECKED_IN]->(o:Organization {id: $org_id})
             WHERE p.role <> 'admin'
             DELETE r
             RETURN count(r) AS removed",
        )
        .param("org_id", org_id.to_string());

        self.run_counted(q, "removed").await
    }

    /// Remove the admin's CHECKED_IN edge for the organization. Returns the
    /// removed count so strict callers can report not-found on zero.
    pub async fn checkout_admin(&self, org_id: &str) -> Result<i64, GraphError> {
        let q = query(
            "MATCH (p:Person {role: 'admin'})-[r:CHECKED_IN]->(o:Organization {id: $org_id})
             DELETE r
             RETURN count(r) AS removed",
        )
        .param("org_id", org_id.to_string());

        self.run_counted(q, "removed").await
    }

    // ── Social Edges ─────────────────────────────────────────────

    /// Create a FOLLOW edge, unconditionally: repeated calls create parallel
    /// edges. Returns false when either user is absent and no edge was
    /// created.
    pub async fn create_follow(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<bool, GraphError> {
        let q = query(
            "MATCH (follower:User {id: $follower_id}), (followee:User {id: $followee_id})
             CREATE (follower)-[:FOLLOW]->(followee)
             RETURN follower.id AS follower_id",
        )
        .param("follower_id", follower_id.to_string())
        .param("followee_id", followee_id.to_string());

        Ok(self.query_one(q).await?.is_some())
    }

    /// Create a LIKE edge, unconditionally; duplicates accumulate.
    pub async fn create_like(&self, user_id: &str, post_id: &str) -> Result<bool, GraphError> {
        let q = query(
            "MATCH (u:User {id: $user_id}), (p:Post {id: $post_id})
             CREATE (u)-[:LIKE]->(p)
             RETURN u.id AS user_id",
        )
        .param("user_id", user_id.to_string())
        .param("post_id", post_id.to_string());

        Ok(self.query_one(q).await?.is_some())
    }

    // ── User Updates ─────────────────────────────────────────────

    /// Update only the fields present in the request. The SET clause is
    /// assembled from the typed struct's fields, never from caller strings.
    /// Returns `None` when the user does not exist.
    pub async fn update_user(
        &self,
        id: &str,
        update: &UserUpdate,
    ) -> Result<Option<UserRecord>, GraphError> {
        let mut assignments = Vec::new();
        if update.name.is_some() {
            assignments.push("u.name = $name");
        }
        if update.email.is_some() {
            assignments.push("u.email = $email");
        }
        if update.age.is_some() {
            assignments.push("u.age = $age");
        }
        if update.gender.is_some() {
            assignments.push("u.gender = $gender");
        }
        if assignments.is_empty() {
            return self.get_user(id).await;
        }

        let cypher = format!(
            "MATCH (u:User {{id: $id}})
             SET {}
             RETURN u",
            assignments.join(", ")
        );

        let mut q = query(&cypher).param("id", id.to_string());
        if let Some(name) = &update.name {
            q = q.param("name", name.clone());
        }
        if let Some(email) = &update.email {
            q = q.param("email", email.clone());
        }
        if let Some(age) = update.age {
            q = q.param("age", age);
        }
        if let Some(gender) = &update.gender {
            q = q.param("gender", gender.clone());
        }

        match self.query_one(q).await? {
            Some(row) => Ok(Some(node_to_user(&get_node(&row, "u")?))),
            None => Ok(None),
        }
    }

    /// Delete a user and any edges hanging off it. Returns the deleted-node
    /// count; zero means the id matched nothing.
    pub async fn delete_user(&self, id: &str) -> Result<i64, GraphError> {
        let q = query(
            "MATCH (u:User {id: $id})
             DETACH DELETE u
             RETURN count(u) AS removed",
        )
        .param("id", id.to_string());

        self.run_counted(q, "removed").await
    }

    // ── Caller-Typed Relationships ───────────────────────────────

    /// Create a relationship of a validated caller-supplied type between any
    /// two nodes. The type name is the only non-parameter input woven into
    /// the query text, and it has already passed the allow-list. The new edge
    /// gets a generated UUID id, returned on success; `None` means one of the
    /// nodes was absent.
    pub async fn create_relationship(
        &self,
        source_id: &str,
        target_id: &str,
        rel_type: &RelationshipType,
    ) -> Result<Option<String>, GraphError> {
        let cypher = format!(
            "MATCH (source {{id: $source_id}}), (target {{id: $target_id}})
             CREATE (source)-[r:{rel_type} {{id: $rel_id}}]->(target)
             RETURN r.id AS relationship_id"
        );

        let q = query(&cypher)
            .param("source_id", source_id.to_string())
            .param("target_id", target_id.to_string())
            .param("rel_id", Uuid::new_v4().to_string());

        match self.query_one(q).await? {
            Some(row) => {
                let id = row.get::<String>("relationship_id").map_err(|e| {
                    GraphError::Deserialization(format!("failed to read relationship id: {e}"))
                })?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Replace the type of an existing relationship: the old typed edge is
    /// deleted and an edge of the new type created in one query. Returns the
    /// count of retyped edges; zero means no old edge matched.
    pub async fn retype_relationship(
        &self,
        source_id: &str,
        target_id: &str,
        old_type: &RelationshipType,
        new_type: &RelationshipType,
    ) -> Result<i64, GraphError> {
        let cypher = format!(
            "MATCH (source {{id: $source_id}})-[r:{old_type}]->(target {{id: $target_id}})
             CREATE (source)-[n:{new_type} {{id: $rel_id}}]->(target)
             DELETE r
             RETURN count(r) AS retyped"
        );

        let q = query(&cypher)
            .param("source_id", source_id.to_string())
            .param("target_id", target_id.to_string())
            .param("rel_id", Uuid::new_v4().to_string());

        self.run_counted(q, "retyped").await
    }

    /// Delete relationships of the given type between two nodes. Returns the
    /// removed count; zero lets the caller report not-found.
    pub async fn delete_relationship(
        &self,
        source_id: &str,
        target_id: &str,
        rel_type: &RelationshipType,
    ) -> Result<i64, GraphError> {
        let cypher = format!(
            "MATCH (source {{id: $source_id}})-[r:{rel_type}]->(target {{id: $target_id}})
             DELETE r
             RETURN count(r) AS removed"
        );

        let q = query(&cypher)
            .param("source_id", source_id.to_string())
            .param("target_id", target_id.to_string());

        self.run_counted(q, "removed").await
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn created_row(row: Option<neo4rs::Row>) -> Result<neo4rs::Row, GraphError> {
    row.ok_or_else(|| GraphError::Deserialization("CREATE returned no row".to_string()))
}

fn opt_string(opt: &Option<String>) -> String {
    opt.clone().unwrap_or_default()
}
