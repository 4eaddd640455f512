//! Borrow (lending transaction) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::AppResult;

/// Borrow model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    pub id: Uuid,
    /// Borrowed book
    #[sqlx(rename = "book_id")]
    pub book: Uuid,
    pub quantity: i32,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(value).is_ok() {
        return Ok(());
    }
    let mut error = ValidationError::new("invalid_id");
    error.message = Some("Invalid ID".into());
    Err(error)
}

/// Create borrow request
#[serde_as]
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBorrow {
    /// ID of the book to borrow
    #[validate(custom(function = "validate_object_id"))]
    pub book: String,
    /// Number of copies; numeric strings are accepted
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[validate(range(min = 1, message = "Quantity must be a positive integer."))]
    #[schema(value_type = i32)]
    pub quantity: i32,
    /// ISO 8601 date-time
    pub due_date: DateTime<Utc>,
}

/// Borrow ready to be recorded
#[derive(Debug, Clone, PartialEq)]
pub struct NewBorrow {
    pub book_id: Uuid,
    pub quantity: i32,
    pub due_date: DateTime<Utc>,
}

impl TryFrom<CreateBorrow> for NewBorrow {
    type Error = crate::error::AppError;

    fn try_from(borrow: CreateBorrow) -> AppResult<Self> {
        Ok(Self {
            book_id: super::parse_id(&borrow.book, "book")?,
            quantity: borrow.quantity,
            due_date: borrow.due_date,
        })
    }
}

/// Title and ISBN of a borrowed book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BorrowedBook {
    pub title: String,
    pub isbn: String,
}

/// Total quantity borrowed for one book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowSummary {
    pub book: BorrowedBook,
    pub total_quantity: i64,
}

/// Flat row returned by the summary aggregation
#[derive(Debug, FromRow)]
pub struct BorrowSummaryRow {
    pub title: String,
    pub isbn: String,
    pub total_quantity: i64,
}

impl From<BorrowSummaryRow> for BorrowSummary {
    fn from(row: BorrowSummaryRow) -> Self {
        Self {
            book: BorrowedBook {
                title: row.title,
                isbn: row.isbn,
            },
            total_quantity: row.total_quantity,
        }
    }
}
