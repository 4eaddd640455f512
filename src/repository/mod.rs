//! Repository layer for database operations

pub mod books;
pub mod borrows;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, BookChanges, BookQuery, Borrow, BorrowSummary, NewBook, NewBorrow},
};

/// Persistence operations on the book catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// One page of books matching `query`, plus the total match count
    async fn list(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)>;

    async fn get(&self, id: Uuid) -> AppResult<Option<Book>>;

    async fn create(&self, book: &NewBook) -> AppResult<Book>;

    /// Apply `changes`, returning `None` when the book does not exist
    async fn update(&self, id: Uuid, changes: &BookChanges) -> AppResult<Option<Book>>;

    /// Returns whether a book was deleted
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Check that the backing store answers
    async fn ping(&self) -> AppResult<()>;
}

/// Persistence operations on borrow records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowStore: Send + Sync {
    /// Record a borrow and take its copies off the book.
    ///
    /// Both writes succeed together or not at all. Fails with
    /// `UnprocessableEntity` when the book can no longer cover `quantity`
    /// and with `NotFound` when it has disappeared.
    async fn create(&self, borrow: &NewBorrow) -> AppResult<Borrow>;

    /// Borrowed quantities summed per existing book
    async fn summary(&self) -> AppResult<Vec<BorrowSummary>>;
}

/// Main repository struct holding the stores
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub borrows: Arc<dyn BorrowStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            borrows: Arc::new(borrows::BorrowsRepository::new(pool)),
        }
    }

    /// Build a repository over arbitrary store implementations
    pub fn from_stores(books: Arc<dyn BookStore>, borrows: Arc<dyn BorrowStore>) -> Self {
        Self { books, borrows }
    }
}
