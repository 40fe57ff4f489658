//! Database record models matching table schemas.
//!
//! These structs map directly onto query results via `sqlx::FromRow` and are
//! distinct from the API models in [`crate::api::models`], so the wire format
//! and the storage format can evolve independently.

pub mod attendance;
pub mod groups;
pub mod students;
pub mod transactions;
pub mod users;
