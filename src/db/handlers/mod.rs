//! Repository implementations for database access.
//!
//! Each repository wraps a `&mut PgConnection`, provides strongly-typed
//! operations for one entity, and returns models from
//! [`crate::db::models`]. Because repositories borrow a plain connection,
//! they compose with SQLx transactions: build one from `&mut tx` to run its
//! queries inside that transaction.
//!
//! - [`Groups`]: training group creation and overview listing
//! - [`Students`]: student onboarding (user + profile in one transaction)
//!   and roster listing with attendance counters
//! - [`Attendance`]: per-session roster sweeps and attendance history
//! - [`Ledger`]: payment recording and transaction history
//!
//! [`Groups`] and [`Students`] implement the common [`Repository`] trait;
//! [`Attendance`] and [`Ledger`] expose bespoke multi-statement operations
//! that do not fit the generic shape.

pub mod attendance;
pub mod groups;
pub mod ledger;
pub mod repository;
pub mod students;

pub use attendance::Attendance;
pub use groups::Groups;
pub use ledger::Ledger;
pub use repository::Repository;
pub use students::Students;
