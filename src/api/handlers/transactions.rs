//! HTTP handlers for ledger transaction endpoints.

use crate::{
    AppState,
    api::models::transactions::{
        TransactionCreate, TransactionCreatedResponse, TransactionListResponse, TransactionResponse, TransactionsQuery,
    },
    db::{
        handlers::{Ledger, Repository, Students},
        models::transactions::PaymentCreateDBRequest,
    },
    errors::{Error, Result},
};
use axum::{
    extract::{Query, State},
    response::Json,
};

/// Record a payment onto a student's balance
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    summary = "Record a payment",
    description = "Appends a payment to the ledger and applies the signed amount to the student's \
                   balance atomically",
    request_body = TransactionCreate,
    responses(
        (status = 200, description = "Payment recorded", body = TransactionCreatedResponse),
        (status = 400, description = "Bad request - student or amount missing"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(data): Json<TransactionCreate>,
) -> Result<Json<TransactionCreatedResponse>> {
    let (Some(student_id), Some(amount)) = (data.student_id, data.amount) else {
        return Err(Error::BadRequest {
            message: "Student and amount are required".to_string(),
        });
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if Students::new(&mut conn).get_by_id(student_id).await?.is_none() {
        return Err(Error::NotFound {
            resource: "Student".to_string(),
            id: student_id.to_string(),
        });
    }

    let description = Some(data.description.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or("Balance top-up")
        .to_string();

    let (transaction, new_balance) = Ledger::new(&mut conn)
        .record_payment(&PaymentCreateDBRequest {
            student_id,
            amount,
            description,
            created_by: data.created_by,
        })
        .await?;

    Ok(Json(TransactionCreatedResponse {
        success: true,
        transaction_id: transaction.id,
        new_balance,
    }))
}

/// List ledger transactions
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    summary = "List transactions",
    description = "Transaction history, newest first; optionally filtered to one student",
    params(TransactionsQuery),
    responses(
        (status = 200, description = "Transaction history", body = TransactionListResponse),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<TransactionListResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Ledger::new(&mut conn);

    let transactions = match query.student_id {
        Some(student_id) => repo.list_for_student(student_id).await?,
        None => repo.list_all().await?,
    };

    Ok(Json(TransactionListResponse {
        transactions: transactions.into_iter().map(TransactionResponse::from).collect(),
    }))
}
