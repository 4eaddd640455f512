//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::BookStore;
use crate::{
    error::AppResult,
    models::{Book, BookChanges, BookQuery, NewBook},
};

const BOOK_COLUMNS: &str =
    "id, title, author, genre, isbn, description, copies, available, created_at, updated_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// SELECT for one page of books. Sort column and direction come from closed
/// enums, never from raw input.
fn list_sql(query: &BookQuery) -> String {
    format!(
        r#"
        SELECT {BOOK_COLUMNS}
        FROM books
        WHERE ($1::book_genre IS NULL OR genre = $1)
        ORDER BY {} {}, id ASC
        LIMIT $2 OFFSET $3
        "#,
        query.sort_by.column(),
        query.sort.as_sql(),
    )
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let sql = list_sql(query);
        let page = sqlx::query_as::<_, Book>(&sql)
            .bind(query.filter)
            .bind(query.limit)
            .bind(query.offset())
            .fetch_all(&self.pool);

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM books WHERE ($1::book_genre IS NULL OR genre = $1)",
        )
        .bind(query.filter)
        .fetch_one(&self.pool);

        let (books, total) = tokio::try_join!(page, total)?;
        Ok((books, total))
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (id, title, author, genre, isbn, description, copies, available)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.genre)
        .bind(&book.isbn)
        .bind(&book.description)
        .bind(book.copies)
        .bind(book.available)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: &BookChanges) -> AppResult<Option<Book>> {
        let updated = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                genre = COALESCE($4, genre),
                isbn = COALESCE($5, isbn),
                description = COALESCE($6, description),
                copies = COALESCE($7, copies),
                available = COALESCE($8, available),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(changes.genre)
        .bind(&changes.isbn)
        .bind(&changes.description)
        .bind(changes.copies)
        .bind(changes.available)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
