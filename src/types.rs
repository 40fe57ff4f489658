//! Common type definitions.
//!
//! All entity identifiers are `SERIAL` integers in PostgreSQL, wrapped in
//! type aliases so signatures say which table they point at:
//!
//! - [`UserId`]: identity record (admins, trainers, student logins)
//! - [`StudentId`]: student profile
//! - [`GroupId`]: training group
//! - [`AttendanceId`]: attendance row for (student, group, date)
//! - [`TransactionId`]: ledger entry

pub type UserId = i32;
pub type StudentId = i32;
pub type GroupId = i32;
pub type AttendanceId = i32;
pub type TransactionId = i32;
