//! turnstile-api — HTTP surface for the Turnstile check-in graph service.
//!
//! Each handler deserializes and validates its input, calls exactly one
//! builder operation on the shared [`state::AppState`] graph client (the
//! hours-gated flows first look the hours up, then conditionally mutate),
//! and maps the outcome to an HTTP status via [`error::ApiError`].

pub mod checkin;
pub mod config;
pub mod error;
pub mod organization;
pub mod relationships;
pub mod routes;
pub mod state;
pub mod users;
