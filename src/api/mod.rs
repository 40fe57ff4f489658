//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all endpoints
//! - **[`models`]**: Request/response data structures defining the wire format
//!
//! All endpoints live under `/api/v1` and are documented with OpenAPI
//! annotations via `utoipa`; the rendered docs are served at `/docs`.

pub mod handlers;
pub mod models;
