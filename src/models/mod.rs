//! Data models for the library API

pub mod book;
pub mod borrow;
pub mod enums;

use uuid::Uuid;

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use book::{Book, BookChanges, BookQuery, CreateBook, NewBook, UpdateBook};
pub use borrow::{Borrow, BorrowSummary, CreateBorrow, NewBorrow};
pub use enums::{Genre, SortField, SortOrder};

/// Parse a record identifier, reporting failures against `path`
pub fn parse_id(raw: &str, path: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid(path, "invalid_id", "Invalid ID"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "id").unwrap(), id);

        match parse_id("64b7f0c2e1d3a9b8c7d6e5f4", "id") {
            Err(AppError::Validation(issues)) => {
                assert_eq!(issues[0].path, "id");
                assert_eq!(issues[0].message, "Invalid ID");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
