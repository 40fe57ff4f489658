//! HTTP request handlers for all API endpoints.
//!
//! Each handler is responsible for:
//! - Request validation (presence checks produce 400 with a readable message)
//! - Business logic execution via database repositories
//! - Response serialization into the DTOs of [`crate::api::models`]
//!
//! Handlers return [`crate::errors::Error`], which converts to the right
//! HTTP status code and a JSON error body.

pub mod attendance;
pub mod groups;
pub mod students;
pub mod transactions;
