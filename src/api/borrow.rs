//! Borrowing endpoints

use axum::extract::State;

use super::{extract::ValidatedJson, openapi::ResponseEnvelope};
use crate::{
    error::AppResult,
    models::{Borrow, BorrowSummary, CreateBorrow, NewBorrow},
    response::ApiResponse,
    AppState,
};

/// Total borrowed quantity per book
#[utoipa::path(
    get,
    path = "/api/borrow",
    tag = "borrow",
    responses(
        (status = 200, description = "Borrowed quantities grouped by book", body = ResponseEnvelope)
    )
)]
pub async fn borrowed_summary(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<BorrowSummary>>> {
    state.services.borrows.borrowed_summary().await
}

/// Borrow copies of a book
#[utoipa::path(
    post,
    path = "/api/borrow",
    tag = "borrow",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Borrow recorded", body = ResponseEnvelope),
        (status = 400, description = "Invalid request", body = ResponseEnvelope),
        (status = 404, description = "Book not found", body = ResponseEnvelope),
        (status = 422, description = "Not enough copies available", body = ResponseEnvelope)
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateBorrow>,
) -> AppResult<ApiResponse<Borrow>> {
    let borrow = NewBorrow::try_from(request)?;
    state.services.borrows.borrow_book(borrow).await
}
