//! Catalog management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookChanges, BookQuery, CreateBook, NewBook, UpdateBook},
    repository::Repository,
    response::ApiResponse,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List one page of books
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<ApiResponse<Vec<Book>>> {
        let (books, total) = self
            .repository
            .books
            .list(query)
            .await
            .map_err(|e| e.or_internal("Failed to get books"))?;

        Ok(ApiResponse::ok()
            .with_data(books)
            .with_metadata(query.page_metadata(total))
            .with_message("Books retrieved successfully"))
    }

    /// Get book by ID
    pub async fn get_book(&self, id: Uuid) -> AppResult<ApiResponse<Book>> {
        let book = self
            .repository
            .books
            .get(id)
            .await
            .map_err(|e| e.or_internal("Failed to get a book"))?
            .ok_or_else(AppError::book_not_found)?;

        Ok(ApiResponse::ok()
            .with_data(book)
            .with_message("Book retrieved successfully"))
    }

    /// Create a new book; availability is derived from the copy count
    pub async fn create_book(&self, book: CreateBook) -> AppResult<ApiResponse<Book>> {
        let book = NewBook::from(book);
        let created = self
            .repository
            .books
            .create(&book)
            .await
            .map_err(|e| e.or_internal("Failed to create a book"))?;

        tracing::info!(book_id = %created.id, copies = created.copies, "Book created");

        Ok(ApiResponse::created()
            .with_data(created)
            .with_message("Book created successfully"))
    }

    /// Apply a partial update to an existing book
    pub async fn update_book(&self, id: Uuid, update: UpdateBook) -> AppResult<ApiResponse<Book>> {
        let changes = BookChanges::from(update);
        let updated = self
            .repository
            .books
            .update(id, &changes)
            .await
            .map_err(|e| e.or_internal("Failed to update a book"))?
            .ok_or_else(AppError::book_not_found)?;

        Ok(ApiResponse::ok()
            .with_data(updated)
            .with_message("Book updated successfully"))
    }

    /// Delete a book
    pub async fn delete_book(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        let deleted = self
            .repository
            .books
            .delete(id)
            .await
            .map_err(|e| e.or_internal("Failed to delete a book"))?;

        if !deleted {
            return Err(AppError::book_not_found());
        }

        tracing::info!(book_id = %id, "Book deleted");

        Ok(ApiResponse::ok().with_message("Book deleted successfully"))
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.repository
            .books
            .ping()
            .await
            .map_err(|e| e.or_internal("Database unavailable"))
    }
}
