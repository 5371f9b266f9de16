//! HTTP handlers and router for the catalog

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod rate_limit;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use mongodb::bson::oid::ObjectId;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use self::rate_limit::ClientLimiter;
use crate::{
    error::{AppError, AppResult, ErrorReport},
    views, AppState,
};

/// Scripts may only come from this site and the two CDNs the layout uses
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    script-src 'self' code.jquery.com cdn.jsdelivr.net; \
    style-src 'self' cdn.jsdelivr.net 'unsafe-inline'; \
    img-src 'self' data:; object-src 'none'; frame-ancestors 'self'";

/// Parse a route identifier, rejecting anything that is not an ObjectId
pub(crate) fn parse_id(raw: &str, entity: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid {} ID", entity)))
}

/// Build the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Genres
        .route("/genres", get(genres::genre_list))
        .route(
            "/genre/create",
            get(genres::genre_create_get).post(genres::genre_create_post),
        )
        .route("/genre/:id", get(genres::genre_detail))
        .route(
            "/genre/:id/delete",
            get(genres::genre_delete_get).post(genres::genre_delete_post),
        )
        .route(
            "/genre/:id/update",
            get(genres::genre_update_get).post(genres::genre_update_post),
        )
        // Authors
        .route("/authors", get(authors::author_list))
        .route(
            "/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/author/:id", get(authors::author_detail))
        .route(
            "/author/:id/delete",
            get(authors::author_delete_get).post(authors::author_delete_post),
        )
        .route(
            "/author/:id/update",
            get(authors::author_update_get).post(authors::author_update_post),
        )
        // Books
        .route("/books", get(books::book_list))
        .route(
            "/book/create",
            get(books::book_create_get).post(books::book_create_post),
        )
        .route("/book/:id", get(books::book_detail))
        .route(
            "/book/:id/delete",
            get(books::book_delete_get).post(books::book_delete_post),
        )
        .route(
            "/book/:id/update",
            get(books::book_update_get).post(books::book_update_post),
        )
        // Book instances
        .route("/bookinstances", get(book_instances::bookinstance_list))
        .route(
            "/bookinstance/create",
            get(book_instances::bookinstance_create_get)
                .post(book_instances::bookinstance_create_post),
        )
        .route("/bookinstance/:id", get(book_instances::bookinstance_detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::bookinstance_delete_get)
                .post(book_instances::bookinstance_delete_post),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::bookinstance_update_get)
                .post(book_instances::bookinstance_update_post),
        );

    let static_files = ServeDir::new(&state.config.server.static_dir);
    let quota = &state.config.rate_limit;
    let limiter = quota
        .enabled
        .then(|| ClientLimiter::per_minute(quota.requests_per_minute));

    let mut app = Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .nest("/catalog", catalog)
        .fallback(not_found)
        .with_state(state.clone())
        .nest_service("/public", static_files);

    if let Some(limiter) = limiter {
        app = app.layer(middleware::from_fn_with_state(limiter, rate_limit::limit));
    }

    app.layer(middleware::from_fn_with_state(state, render_errors))
        .layer(CompressionLayer::new())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

/// Turn an `ErrorReport` left by a failed handler into the HTML error page.
/// Internal detail is only shown when running in development mode.
async fn render_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let detail = if state.config.server.is_development() {
        report.detail.as_deref()
    } else {
        None
    };
    (report.status, views::error::page(&report, detail)).into_response()
}
