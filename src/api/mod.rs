//! API handlers for the library REST endpoints

pub mod books;
pub mod borrow;
pub mod extract;
pub mod health;
pub mod openapi;

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books (catalog)
        .route("/api/books", get(books::list_books).post(books::create_book))
        .route(
            "/api/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Borrowing
        .route("/api/borrow", get(borrow::borrowed_summary).post(borrow::borrow_book))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CatchPanicLayer::custom(panic_response))
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method not allowed".to_string())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);

    AppError::Internal("Internal Server Error".to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{
        config::AppConfig,
        models::{Book, Genre},
        repository::{MockBookStore, MockBorrowStore, Repository},
        services::Services,
    };

    fn app(books: MockBookStore, borrows: MockBorrowStore) -> Router {
        let repository = Repository::from_stores(Arc::new(books), Arc::new(borrows));
        create_router(AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(repository)),
        })
    }

    fn book(id: Uuid, copies: i32) -> Book {
        let now = Utc::now();
        Book {
            id,
            title: "T".into(),
            author: "A".into(),
            genre: Genre::Fiction,
            isbn: "123".into(),
            description: None,
            copies,
            available: copies > 0,
            created_at: now,
            updated_at: now,
        }
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn assert_envelope(body: &Value) {
        let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["data", "error", "message", "metadata", "statusCode", "success"]);
    }

    #[tokio::test]
    async fn test_create_book() {
        let mut books = MockBookStore::new();
        books.expect_create().times(1).returning(|new| {
            let mut created = book(Uuid::new_v4(), new.copies);
            created.available = new.available;
            Ok(created)
        });

        let (status, body) = send(
            app(books, MockBorrowStore::new()),
            Method::POST,
            "/api/books",
            Some(json!({"title": "T", "author": "A", "genre": "FICTION", "isbn": "123", "copies": 3})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_envelope(&body);
        assert_eq!(body["success"], true);
        assert_eq!(body["statusCode"], 201);
        assert_eq!(body["data"]["available"], true);
        assert_eq!(body["data"]["copies"], 3);
    }

    #[tokio::test]
    async fn test_create_book_with_invalid_payload() {
        let mut books = MockBookStore::new();
        books.expect_create().times(0);

        let (status, body) = send(
            app(books, MockBorrowStore::new()),
            Method::POST,
            "/api/books",
            Some(json!({"title": "T", "author": "A", "genre": "FICTION", "isbn": "123", "copies": -1})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_envelope(&body);
        assert_eq!(body["message"], "Validation Error!");
        assert_eq!(body["error"]["issues"][0]["path"], "copies");
    }

    #[tokio::test]
    async fn test_create_book_with_missing_field() {
        let (status, body) = send(
            app(MockBookStore::new(), MockBorrowStore::new()),
            Method::POST,
            "/api/books",
            Some(json!({"title": "T", "genre": "FICTION", "isbn": "123", "copies": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_envelope(&body);
        assert_eq!(body["error"]["issues"][0]["path"], "body");
    }

    #[tokio::test]
    async fn test_get_book_with_malformed_id() {
        let (status, body) = send(
            app(MockBookStore::new(), MockBorrowStore::new()),
            Method::GET,
            "/api/books/not-an-id",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_envelope(&body);
        assert_eq!(body["error"]["issues"][0]["message"], "Invalid ID");
    }

    #[tokio::test]
    async fn test_get_missing_book() {
        let mut books = MockBookStore::new();
        books.expect_get().returning(|_| Ok(None));

        let uri = format!("/api/books/{}", Uuid::new_v4());
        let (status, body) = send(app(books, MockBorrowStore::new()), Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_envelope(&body);
        assert_eq!(body["message"], "Book not found!");
        assert_eq!(body["error"]["statusCode"], 404);
    }

    #[tokio::test]
    async fn test_list_books_parses_query() {
        let mut books = MockBookStore::new();
        books
            .expect_list()
            .withf(|query| query.filter == Some(Genre::History) && query.offset() == 10)
            .returning(|_| Ok((vec![book(Uuid::new_v4(), 1)], 11)));

        let (status, body) = send(
            app(books, MockBorrowStore::new()),
            Method::GET,
            "/api/books?filter=HISTORY&page=2&limit=10&sortBy=title&sort=desc",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_envelope(&body);
        assert_eq!(body["metadata"], json!({"total": 11, "pageCount": 2}));
    }

    #[tokio::test]
    async fn test_list_books_rejects_unknown_sort_field() {
        let (status, body) = send(
            app(MockBookStore::new(), MockBorrowStore::new()),
            Method::GET,
            "/api/books?sortBy=password",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_envelope(&body);
        assert_eq!(body["error"]["issues"][0]["path"], "query");
    }

    #[tokio::test]
    async fn test_delete_book_returns_null_data() {
        let mut books = MockBookStore::new();
        books.expect_delete().returning(|_| Ok(true));

        let uri = format!("/api/books/{}", Uuid::new_v4());
        let (status, body) = send(app(books, MockBorrowStore::new()), Method::DELETE, &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_envelope(&body);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_borrow_more_than_available() {
        let id = Uuid::new_v4();
        let mut books = MockBookStore::new();
        books.expect_get().returning(move |_| Ok(Some(book(id, 3))));
        let mut borrows = MockBorrowStore::new();
        borrows.expect_create().times(0);

        let (status, body) = send(
            app(books, borrows),
            Method::POST,
            "/api/borrow",
            Some(json!({"book": id, "quantity": 5, "dueDate": "2025-07-18T00:00:00.000Z"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_envelope(&body);
        assert_eq!(body["message"], "Not enough copies available!");
    }

    #[tokio::test]
    async fn test_borrow_with_invalid_book_reference() {
        let mut borrows = MockBorrowStore::new();
        borrows.expect_create().times(0);

        let (status, body) = send(
            app(MockBookStore::new(), borrows),
            Method::POST,
            "/api/borrow",
            Some(json!({"book": "123", "quantity": 1, "dueDate": "2025-07-18T00:00:00Z"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["issues"][0]["path"], "book");
        assert_eq!(body["error"]["issues"][0]["message"], "Invalid ID");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send(
            app(MockBookStore::new(), MockBorrowStore::new()),
            Method::GET,
            "/api/authors",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_envelope(&body);
        assert_eq!(body["message"], "Route not found");
    }

    #[tokio::test]
    async fn test_unsupported_method_on_known_route() {
        for (method, uri) in [
            (Method::DELETE, "/api/borrow".to_string()),
            (Method::PATCH, format!("/api/books/{}", Uuid::new_v4())),
            (Method::POST, format!("/api/books/{}", Uuid::new_v4())),
        ] {
            let (status, body) = send(
                app(MockBookStore::new(), MockBorrowStore::new()),
                method,
                &uri,
                None,
            )
            .await;

            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_envelope(&body);
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Method not allowed");
            assert_eq!(body["error"]["statusCode"], 405);
        }
    }

    #[tokio::test]
    async fn test_list_books_rejects_out_of_range_page() {
        let mut books = MockBookStore::new();
        books.expect_list().times(0);

        let (status, body) = send(
            app(books, MockBorrowStore::new()),
            Method::GET,
            "/api/books?page=9223372036854775807&limit=10",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_envelope(&body);
        assert_eq!(body["message"], "Validation Error!");
        assert_eq!(body["error"]["issues"][0]["path"], "page");
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = send(
            app(MockBookStore::new(), MockBorrowStore::new()),
            Method::GET,
            "/health",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_envelope(&body);
        assert_eq!(body["data"]["status"], "healthy");
    }

    #[test]
    fn test_panic_response_is_an_envelope() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
