//! HTTP routes for waitlist endpoints.

use axum::{routing::post, Router};

use super::handlers::{book_from_waitlist, create_waitlist_entry, WaitlistHandlers};

/// Creates the waitlist router with all endpoints.
pub fn waitlist_routes(handlers: WaitlistHandlers) -> Router {
    Router::new()
        .route("/", post(create_waitlist_entry))
        .route("/:id/book", post(book_from_waitlist))
        .with_state(handlers)
}
