//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod auth;
pub mod catalog;
pub mod health;
pub mod pagination;
pub mod recipes;
pub mod short_link;
pub mod subscriptions;
pub mod users;
