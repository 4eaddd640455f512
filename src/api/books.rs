//! Book (catalog) endpoints

use axum::extract::State;

use super::{
    extract::{RecordId, ValidatedJson, ValidatedQuery},
    openapi::ResponseEnvelope,
};
use crate::{
    error::AppResult,
    models::{Book, BookQuery, CreateBook, UpdateBook},
    response::ApiResponse,
    AppState,
};

/// List books with genre filter, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Page of books; metadata carries total and pageCount", body = ResponseEnvelope),
        (status = 400, description = "Invalid query parameters", body = ResponseEnvelope)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BookQuery>,
) -> AppResult<ApiResponse<Vec<Book>>> {
    state.services.catalog.list_books(&query).await
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = ResponseEnvelope),
        (status = 400, description = "Malformed ID", body = ResponseEnvelope),
        (status = 404, description = "Book not found", body = ResponseEnvelope)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<ApiResponse<Book>> {
    state.services.catalog.get_book(id).await
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = ResponseEnvelope),
        (status = 400, description = "Invalid input", body = ResponseEnvelope)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(book): ValidatedJson<CreateBook>,
) -> AppResult<ApiResponse<Book>> {
    state.services.catalog.create_book(book).await
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = ResponseEnvelope),
        (status = 400, description = "Invalid input", body = ResponseEnvelope),
        (status = 404, description = "Book not found", body = ResponseEnvelope)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidatedJson(update): ValidatedJson<UpdateBook>,
) -> AppResult<ApiResponse<Book>> {
    state.services.catalog.update_book(id, update).await
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted; data is null", body = ResponseEnvelope),
        (status = 404, description = "Book not found", body = ResponseEnvelope)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<ApiResponse<()>> {
    state.services.catalog.delete_book(id).await
}
