//! API request and response data models.
//!
//! These structures define the public API contract and are distinct from the
//! database models in [`crate::db::models`]. Required fields arrive as
//! `Option` and are checked in the handlers so that a missing field produces
//! a 400 with a readable message rather than a deserialization rejection.

pub mod attendance;
pub mod groups;
pub mod students;
pub mod transactions;
