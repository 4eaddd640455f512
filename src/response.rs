//! Uniform response envelope
//!
//! Every endpoint, successful or not, answers with the same six keys:
//! `success`, `statusCode`, `message`, `metadata`, `data` and `error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, ValidationIssue};

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Total number of matching records
    pub total: i64,
    /// Number of pages at the requested page size
    pub page_count: i64,
}

impl PageMetadata {
    pub fn new(total: i64, limit: i64) -> Self {
        let page_count = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self { total, page_count }
    }
}

/// Error details carried by a failed response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub success: bool,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<ValidationIssue>>,
}

/// Response envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub metadata: Option<PageMetadata>,
    pub data: Option<T>,
    pub error: Option<ErrorPayload>,
}

impl<T> ApiResponse<T> {
    pub fn success(status: StatusCode) -> Self {
        Self {
            success: true,
            status_code: status.as_u16(),
            message: String::new(),
            metadata: None,
            data: None,
            error: None,
        }
    }

    pub fn ok() -> Self {
        Self::success(StatusCode::OK)
    }

    pub fn created() -> Self {
        Self::success(StatusCode::CREATED)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_metadata(mut self, metadata: PageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl ApiResponse<()> {
    /// Failed response, defaulting to a generic internal error until
    /// [`ApiResponse::with_error`] fills it in.
    pub fn error() -> Self {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        Self {
            success: false,
            status_code: status.as_u16(),
            message: "Internal Server Error".to_string(),
            metadata: None,
            data: None,
            error: Some(ErrorPayload {
                success: false,
                status_code: status.as_u16(),
                message: Some("Internal Server Error".to_string()),
                issues: None,
            }),
        }
    }

    pub fn with_error(mut self, error: &AppError) -> Self {
        let status = error.status_code();
        let (message, issues) = match error {
            AppError::Validation(issues) => ("Validation Error!".to_string(), Some(issues.clone())),
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::MethodNotAllowed(msg)
            | AppError::UnprocessableEntity(msg)
            | AppError::Internal(msg) => (msg.clone(), None),
            AppError::Database(_) => ("Internal Server Error".to_string(), None),
        };

        self.status_code = status.as_u16();
        self.error = Some(ErrorPayload {
            success: false,
            status_code: status.as_u16(),
            message: issues.is_none().then(|| message.clone()),
            issues,
        });
        self.message = message;
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn keys(value: &Value) -> Vec<String> {
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    const ENVELOPE_KEYS: [&str; 6] = ["data", "error", "message", "metadata", "statusCode", "success"];

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(PageMetadata::new(0, 10).page_count, 0);
        assert_eq!(PageMetadata::new(10, 10).page_count, 1);
        assert_eq!(PageMetadata::new(11, 10).page_count, 2);
        assert_eq!(PageMetadata::new(25, 10), PageMetadata { total: 25, page_count: 3 });
    }

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::created()
            .with_data(json!({"title": "T"}))
            .with_message("Book created successfully");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(keys(&value), ENVELOPE_KEYS);
        assert_eq!(value["success"], true);
        assert_eq!(value["statusCode"], 201);
        assert_eq!(value["data"]["title"], "T");
        assert!(value["metadata"].is_null());
        assert!(value["error"].is_null());
    }

    #[test]
    fn test_empty_data_serializes_as_null() {
        let response: ApiResponse<()> = ApiResponse::ok().with_message("Book deleted successfully");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(keys(&value), ENVELOPE_KEYS);
        assert!(value["data"].is_null());
    }

    #[test]
    fn test_domain_error_envelope() {
        let response = ApiResponse::error().with_error(&AppError::not_enough_copies());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(keys(&value), ENVELOPE_KEYS);
        assert_eq!(value["success"], false);
        assert_eq!(value["statusCode"], 422);
        assert_eq!(value["message"], "Not enough copies available!");
        assert_eq!(
            value["error"],
            json!({"success": false, "statusCode": 422, "message": "Not enough copies available!"})
        );
    }

    #[test]
    fn test_validation_error_envelope() {
        let response =
            ApiResponse::error().with_error(&AppError::invalid("id", "invalid_id", "Invalid ID"));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 400);
        assert_eq!(value["message"], "Validation Error!");
        assert_eq!(value["error"]["statusCode"], 400);
        assert_eq!(value["error"]["issues"][0]["path"], "id");
        assert_eq!(value["error"]["issues"][0]["message"], "Invalid ID");
        assert!(value["error"].get("message").is_none());
    }

    #[test]
    fn test_database_error_is_not_echoed() {
        let response =
            ApiResponse::error().with_error(&AppError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.message, "Internal Server Error");
    }
}
