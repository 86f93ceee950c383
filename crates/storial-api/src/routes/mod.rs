//! Route definitions
//!
//! API routes are mounted under /api/v1; health probes live at the root.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, categories, chapters, health, stories};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(story_routes())
        .merge(chapter_routes())
        // Catch-all category listing; static segments above take precedence
        .route("/:category_slug", get(stories::filter_stories_by_category))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Story and category routes
fn story_routes() -> Router<AppState> {
    Router::new()
        .route("/books/categories", get(categories::get_categories))
        .route("/add-book", post(stories::create_story))
        .route(
            "/edit-book/:slug",
            put(stories::update_story).patch(stories::update_story),
        )
        .route("/writers/book/:id/delete", delete(stories::delete_story))
        .route("/user/books", get(stories::get_own_stories))
        .route("/book/:slug", get(stories::get_story))
        .route("/book-list", get(stories::filter_stories))
        .route("/book_front/:filename", get(stories::get_cover))
}

/// Chapter routes
fn chapter_routes() -> Router<AppState> {
    Router::new()
        .route("/add-chapter/:story_slug", post(chapters::create_chapter))
        .route(
            "/edit-chapter/:story_slug/:chapter_slug",
            put(chapters::update_chapter).patch(chapters::update_chapter),
        )
        // Shares the `:slug` segment with the story page route
        .route("/book/:slug/:chapter_slug", get(chapters::get_chapter))
        .route(
            "/writers/chapter/:chapter_id/delete",
            delete(chapters::delete_chapter),
        )
        .route("/books/:story_id/chapters", get(chapters::get_chapters))
        .route(
            "/books/:story_id/chapters/:chapter_id/votes/up",
            post(chapters::like_chapter),
        )
}
