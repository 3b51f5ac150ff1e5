//! turnstile-core: Shared types, error taxonomy, and the operating-hours gate
//! for the Turnstile check-in graph service.
//!
//! This crate provides the foundational pieces used across all Turnstile
//! components:
//! - Node types (Person, User, Organization, Post) for the graph
//! - The validated relationship-type name for caller-typed edges
//! - The operating-hours gate controlling check-in and auto-checkout
//! - Common error types

pub mod error;
pub mod hours;
pub mod types;

pub use error::CoreError;
pub use hours::{OperatingHours, TimeOfDay};
pub use types::{Organization, Person, Post, RelationshipType, User, UserUpdate};
