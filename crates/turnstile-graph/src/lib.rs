//! turnstile-graph — Neo4j client for the Turnstile check-in graph.
//!
//! This crate is the single mutation point for the graph. All reads and
//! writes flow through [`GraphClient`] so parameter binding stays uniform and
//! relationship-type names reach query text only after validation.

pub mod client;
pub mod mutations;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use queries::{
    ActiveMember, OrganizationRecord, PersonRecord, PostRecord, RelationshipRecord, RoleGroup,
    UserRecord,
};
