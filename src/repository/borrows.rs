//! Borrows repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::BorrowStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::BorrowSummaryRow,
        Borrow, BorrowSummary, NewBorrow,
    },
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowStore for BorrowsRepository {
    async fn create(&self, borrow: &NewBorrow) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        // SET expressions read the pre-update row, so `available` reflects
        // the decremented count.
        let decremented = sqlx::query(
            r#"
            UPDATE books
            SET copies = copies - $2,
                available = copies - $2 > 0,
                updated_at = NOW()
            WHERE id = $1 AND available AND copies >= $2
            "#,
        )
        .bind(borrow.book_id)
        .bind(borrow.quantity)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                    .bind(borrow.book_id)
                    .fetch_one(&mut *tx)
                    .await?;
            tx.rollback().await?;

            return Err(if exists {
                AppError::not_enough_copies()
            } else {
                AppError::book_not_found()
            });
        }

        let created = sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrows (id, book_id, quantity, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, quantity, due_date, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(borrow.book_id)
        .bind(borrow.quantity)
        .bind(borrow.due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn summary(&self) -> AppResult<Vec<BorrowSummary>> {
        let rows = sqlx::query_as::<_, BorrowSummaryRow>(
            r#"
            SELECT b.title, b.isbn, SUM(br.quantity)::BIGINT AS total_quantity
            FROM borrows br
            JOIN books b ON b.id = br.book_id
            GROUP BY b.id, b.title, b.isbn
            ORDER BY b.title, b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BorrowSummary::from).collect())
    }
}
