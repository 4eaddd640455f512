//! Borrowing service

use crate::{
    error::{AppError, AppResult},
    models::{Borrow, BorrowSummary, NewBorrow},
    repository::Repository,
    response::ApiResponse,
};

#[derive(Clone)]
pub struct BorrowService {
    repository: Repository,
}

impl BorrowService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrowed quantities per book
    pub async fn borrowed_summary(&self) -> AppResult<ApiResponse<Vec<BorrowSummary>>> {
        let summary = self
            .repository
            .borrows
            .summary()
            .await
            .map_err(|e| e.or_internal("Failed to get borrowed book summary."))?;

        Ok(ApiResponse::ok()
            .with_data(summary)
            .with_message("Borrowed books summary retrieved successfully"))
    }

    /// Lend `borrow.quantity` copies of a book.
    ///
    /// The early availability check gives precise errors; the store repeats it
    /// atomically while recording the borrow.
    pub async fn borrow_book(&self, borrow: NewBorrow) -> AppResult<ApiResponse<Borrow>> {
        let book = self
            .repository
            .books
            .get(borrow.book_id)
            .await
            .map_err(|e| e.or_internal("Failed to borrow a book"))?
            .ok_or_else(AppError::book_not_found)?;

        if !book.can_lend(borrow.quantity) {
            return Err(AppError::not_enough_copies());
        }

        let created = self
            .repository
            .borrows
            .create(&borrow)
            .await
            .map_err(|e| e.or_internal("Failed to borrow a book"))?;

        tracing::info!(
            borrow_id = %created.id,
            book_id = %created.book,
            quantity = created.quantity,
            "Book borrowed"
        );

        Ok(ApiResponse::created()
            .with_data(created)
            .with_message("Book borrowed successfully"))
    }
}
