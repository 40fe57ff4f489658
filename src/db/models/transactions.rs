//! Database models for the transaction ledger.

use crate::types::{StudentId, TransactionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Transaction type stored as TEXT in the `transactions` table.
///
/// `charge` rows carry negative amounts (attendance deductions); `payment`
/// rows carry the signed amount as submitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Charge,
    Payment,
}

/// Database request for appending a payment to the ledger.
#[derive(Debug, Clone)]
pub struct PaymentCreateDBRequest {
    pub student_id: StudentId,
    pub amount: i32,
    pub description: String,
    pub created_by: Option<UserId>,
}

/// Database response for one ledger row.
///
/// `student_name` and `created_by_name` are populated only by the listing
/// queries that join them.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionDBResponse {
    pub id: TransactionId,
    pub student_id: StudentId,
    pub amount: i32,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub student_name: Option<String>,
    #[sqlx(default)]
    pub created_by_name: Option<String>,
}
