//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over
//! database operations:
//!
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Transactions
//!
//! Repositories wrap a `&mut PgConnection`, so they compose with SQLx
//! transactions. Multi-statement write paths (attendance sweeps, payments,
//! student onboarding) begin a transaction on their connection and commit
//! once every statement succeeded; a mid-sequence failure rolls everything
//! back.
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/`
//! directory. The [`crate::migrator`] function provides access to the
//! migrator:
//!
//! ```ignore
//! sambokid::migrator().run(&pool).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
