//! OpenAPI documentation

use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrow, health};

/// Shape shared by every response body
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub metadata: Option<crate::response::PageMetadata>,
    /// Endpoint specific payload, `null` on failure
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
    pub error: Option<crate::response::ErrorPayload>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "0.1.0",
        description = "Library catalog and borrowing REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrowing
        borrow::borrowed_summary,
        borrow::borrow_book,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::enums::Genre,
            crate::models::enums::SortField,
            crate::models::enums::SortOrder,
            // Borrowing
            crate::models::borrow::Borrow,
            crate::models::borrow::CreateBorrow,
            crate::models::borrow::BorrowSummary,
            crate::models::borrow::BorrowedBook,
            // Envelope
            ResponseEnvelope,
            crate::response::PageMetadata,
            crate::response::ErrorPayload,
            crate::error::ValidationIssue,
            // Health
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "borrow", description = "Borrowing")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
