//! Database repository for the transaction ledger.

use crate::db::{
    errors::Result,
    models::transactions::{PaymentCreateDBRequest, TransactionDBResponse, TransactionType},
};
use crate::types::StudentId;
use sqlx::{Connection, PgConnection};
use tracing::instrument;

pub struct Ledger<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Ledger<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Append a payment to the ledger and apply it to the student's cached
    /// balance in one transaction. Returns the created row and the balance
    /// after the payment.
    ///
    /// The amount is signed as submitted; negative payments are manual
    /// corrections.
    #[instrument(skip(self, request), fields(student_id = request.student_id, amount = request.amount), err)]
    pub async fn record_payment(&mut self, request: &PaymentCreateDBRequest) -> Result<(TransactionDBResponse, i32)> {
        let mut tx = self.db.begin().await?;

        let transaction = sqlx::query_as::<_, TransactionDBResponse>(
            r#"
            INSERT INTO transactions (student_id, amount, transaction_type, description, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, student_id, amount, transaction_type, description, created_by, created_at
            "#,
        )
        .bind(request.student_id)
        .bind(request.amount)
        .bind(TransactionType::Payment)
        .bind(&request.description)
        .bind(request.created_by)
        .fetch_one(&mut *tx)
        .await?;

        let new_balance: i32 = sqlx::query_scalar("UPDATE students SET balance = balance + $1 WHERE id = $2 RETURNING balance")
            .bind(request.amount)
            .bind(request.student_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((transaction, new_balance))
    }

    /// Transaction history for one student, newest first.
    #[instrument(skip(self), err)]
    pub async fn list_for_student(&mut self, student_id: StudentId) -> Result<Vec<TransactionDBResponse>> {
        let transactions = sqlx::query_as::<_, TransactionDBResponse>(
            r#"
            SELECT t.*, u.full_name AS created_by_name
            FROM transactions t
            LEFT JOIN users u ON t.created_by = u.id
            WHERE t.student_id = $1
            ORDER BY t.created_at DESC
            LIMIT 100
            "#,
        )
        .bind(student_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(transactions)
    }

    /// Transaction history across all students, newest first.
    #[instrument(skip(self), err)]
    pub async fn list_all(&mut self) -> Result<Vec<TransactionDBResponse>> {
        let transactions = sqlx::query_as::<_, TransactionDBResponse>(
            r#"
            SELECT t.*, u1.full_name AS student_name, u2.full_name AS created_by_name
            FROM transactions t
            JOIN students s ON t.student_id = s.id
            JOIN users u1 ON s.user_id = u1.id
            LEFT JOIN users u2 ON t.created_by = u2.id
            ORDER BY t.created_at DESC
            LIMIT 100
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(transactions)
    }
}
