//! API request/response models for ledger transactions.

use crate::{
    db::models::transactions::{TransactionDBResponse, TransactionType},
    types::{StudentId, TransactionId, UserId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionCreate {
    /// Student whose balance the payment applies to (required)
    pub student_id: Option<StudentId>,
    /// Signed amount in whole currency units (required); negative values
    /// are manual corrections
    pub amount: Option<i32>,
    #[serde(default)]
    pub description: String,
    /// User submitting the payment
    pub created_by: Option<UserId>,
}

/// Query parameters for listing transactions
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct TransactionsQuery {
    pub student_id: Option<StudentId>,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: TransactionId,
    pub student_id: StudentId,
    pub amount: i32,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionCreatedResponse {
    pub success: bool,
    pub transaction_id: TransactionId,
    /// Student balance after the payment was applied
    pub new_balance: i32,
}

impl From<TransactionDBResponse> for TransactionResponse {
    fn from(db: TransactionDBResponse) -> Self {
        Self {
            id: db.id,
            student_id: db.student_id,
            amount: db.amount,
            transaction_type: db.transaction_type,
            description: db.description,
            created_by: db.created_by,
            created_at: db.created_at,
            student_name: db.student_name,
            created_by_name: db.created_by_name,
        }
    }
}
