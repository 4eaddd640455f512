//! Book (catalog entry) model and related request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::{Genre, SortField, SortOrder};
use crate::response::PageMetadata;

/// Book model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub isbn: String,
    pub description: Option<String>,
    /// Number of lendable copies the library holds
    pub copies: i32,
    /// Whether at least one copy can be lent
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Whether `quantity` copies can be lent right now
    pub fn can_lend(&self, quantity: i32) -> bool {
        self.available && self.copies >= quantity
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, message = "A book title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Author's name is required."))]
    pub author: String,
    pub genre: Genre,
    #[validate(length(min = 1, message = "ISBN is required."))]
    pub isbn: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Number of copies must be a non-negative integer."))]
    pub copies: i32,
    /// Accepted for compatibility; the stored value is always derived from `copies`
    pub available: Option<bool>,
}

/// Book ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub isbn: String,
    pub description: Option<String>,
    pub copies: i32,
    pub available: bool,
}

impl From<CreateBook> for NewBook {
    fn from(book: CreateBook) -> Self {
        Self {
            available: book.copies > 0,
            title: book.title,
            author: book.author,
            genre: book.genre,
            isbn: book.isbn,
            description: book.description,
            copies: book.copies,
        }
    }
}

/// Update book request (every field optional)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "A book title is required."))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author's name is required."))]
    pub author: Option<String>,
    pub genre: Option<Genre>,
    #[validate(length(min = 1, message = "ISBN is required."))]
    pub isbn: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Number of copies must be a non-negative integer."))]
    pub copies: Option<i32>,
    pub available: Option<bool>,
}

/// Field changes applied by an update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<Genre>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub copies: Option<i32>,
    pub available: Option<bool>,
}

impl From<UpdateBook> for BookChanges {
    fn from(update: UpdateBook) -> Self {
        // A new copy count always decides availability.
        let available = match update.copies {
            Some(copies) => Some(copies > 0),
            None => update.available,
        };

        Self {
            title: update.title,
            author: update.author,
            genre: update.genre,
            isbn: update.isbn,
            description: update.description,
            copies: update.copies,
            available,
        }
    }
}

/// Largest page that keeps `(page - 1) * limit` inside `i64` for any valid limit
pub const MAX_PAGE: i64 = i64::MAX / MAX_LIMIT;

/// Largest page size
pub const MAX_LIMIT: i64 = 100;

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// Book listing query parameters
#[serde_as]
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Only list books of this genre
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    #[param(value_type = Option<Genre>)]
    pub filter: Option<Genre>,
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = MAX_PAGE, message = "Page must be a positive integer."))]
    pub page: i64,
    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = MAX_LIMIT, message = "Limit must be between 1 and 100."))]
    pub limit: i64,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort: SortOrder,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            filter: None,
            page: default_page(),
            limit: default_limit(),
            sort_by: SortField::default(),
            sort: SortOrder::default(),
        }
    }
}

impl BookQuery {
    /// Number of records skipped before this page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn page_metadata(&self, total: i64) -> PageMetadata {
        PageMetadata::new(total, self.limit)
    }
}
