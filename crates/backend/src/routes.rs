use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // C001 Content type handlers
        .route(
            "/api/content_type",
            get(handlers::c001_content_type::list_all).post(handlers::c001_content_type::upsert),
        )
        .route(
            "/api/content_type/:id",
            get(handlers::c001_content_type::get_by_id)
                .delete(handlers::c001_content_type::delete),
        )
        // C002 Entry handlers
        .route(
            "/api/entry",
            get(handlers::c002_entry::list).post(handlers::c002_entry::upsert),
        )
        .route(
            "/api/entry/:id",
            get(handlers::c002_entry::get_by_id).delete(handlers::c002_entry::delete),
        )
        // C003 Destination hierarchy handlers
        .route(
            "/api/destination",
            get(handlers::c003_destination::tree).post(handlers::c003_destination::create),
        )
        .route(
            "/api/destination/:id",
            axum::routing::delete(handlers::c003_destination::delete),
        )
        .route(
            "/api/destination/testdata",
            post(handlers::c003_destination::insert_test_data),
        )
        // Media upload
        .route("/api/media", post(handlers::media::upload))
}
