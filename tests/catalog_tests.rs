//! Router tests against the in-memory repository

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use local_library::{api, config::AppConfig, repository::Repository, AppState};

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.rate_limit.enabled = false;
    config
}

fn app() -> Router {
    api::router(AppState::new(config(), Repository::in_memory()))
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post(app: &Router, uri: &str, form: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

/// Hex id at the end of a `/catalog/<entity>/<id>` url
fn id_of(url: &str) -> String {
    url.rsplit('/').next().unwrap().to_string()
}

async fn create(app: &Router, entity: &str, form: &str) -> String {
    let response = post(app, &format!("/catalog/{}/create", entity), form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "creating {}", entity);
    location(&response)
}

/// Author, genre and one book by that author in that genre
async fn seed_book(app: &Router) -> (String, String, String) {
    let author = create(app, "author", "first_name=Jane&family_name=Austen").await;
    let genre = create(app, "genre", "name=Romance").await;
    let book = create(
        app,
        "book",
        &format!(
            "title=Emma&summary=Matchmaking&isbn=9780141439587&author={}&genre={}",
            id_of(&author),
            id_of(&genre)
        ),
    )
    .await;
    (author, genre, book)
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let response = get(&app(), "/").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/catalog");
}

#[tokio::test]
async fn test_health_check() {
    let response = get(&app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_catalog_home_shows_counts() {
    let app = app();
    seed_book(&app).await;

    let page = text(get(&app, "/catalog").await).await;
    assert!(page.contains("<strong>Books:</strong> 1"));
    assert!(page.contains("<strong>Authors:</strong> 1"));
    assert!(page.contains("<strong>Genres:</strong> 1"));
}

#[tokio::test]
async fn test_security_headers() {
    let response = get(&app(), "/catalog/genres").await;
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "SAMEORIGIN");
    assert!(response.headers().contains_key(header::CONTENT_SECURITY_POLICY));
}

#[tokio::test]
async fn test_genre_create_and_detail() {
    let app = app();
    let url = create(&app, "genre", "name=++Fantasy++").await;
    assert!(url.starts_with("/catalog/genre/"));

    let response = get(&app, &url).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = text(response).await;
    assert!(page.contains("Genre: Fantasy"));

    let list = text(get(&app, "/catalog/genres").await).await;
    assert!(list.contains(&url));
}

#[tokio::test]
async fn test_genre_create_is_case_insensitive_dedup() {
    let app = app();
    let first = create(&app, "genre", "name=Fantasy").await;
    let second = create(&app, "genre", "name=fantasy").await;
    assert_eq!(first, second);

    let list = text(get(&app, "/catalog/genres").await).await;
    assert_eq!(list.matches("Fantasy").count(), 1);
}

#[tokio::test]
async fn test_author_create_dedups_on_full_name() {
    let app = app();
    let first = create(&app, "author", "first_name=Jane&family_name=Austen").await;
    let second = create(&app, "author", "first_name=JANE&family_name=austen").await;
    assert_eq!(first, second);

    let other = create(&app, "author", "first_name=Cassandra&family_name=Austen").await;
    assert_ne!(first, other);
}

#[tokio::test]
async fn test_invalid_create_rerenders_form() {
    let app = app();
    let response = post(&app, "/catalog/genre/create", "name=ab").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = text(response).await;
    assert!(page.contains("Genre name must contain at least 3 characters"));
    assert!(page.contains(r#"value="ab""#));

    let list = text(get(&app, "/catalog/genres").await).await;
    assert!(list.contains("There are no genres."));
}

#[tokio::test]
async fn test_author_form_errors_in_field_order() {
    let page = text(
        post(
            &app(),
            "/catalog/author/create",
            "first_name=&family_name=&date_of_birth=yesterday",
        )
        .await,
    )
    .await;

    let first = page.find("First name must be specified.").unwrap();
    let family = page.find("Family name must be specified.").unwrap();
    let birth = page.find("Invalid date of birth").unwrap();
    assert!(first < family && family < birth);
}

#[tokio::test]
async fn test_submitted_markup_is_escaped() {
    let app = app();
    let url = create(&app, "genre", "name=%3Cscript%3Ealert(1)%3C%2Fscript%3E").await;

    let page = text(get(&app, &url).await).await;
    assert!(!page.contains("<script>alert(1)"));
    assert!(page.contains("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"));
}

#[tokio::test]
async fn test_invalid_update_leaves_record_unchanged() {
    let app = app();
    let url = create(&app, "genre", "name=Mystery").await;

    let response = post(&app, &format!("{}/update", url), "name=x").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = text(response).await;
    assert!(page.contains("Update Genre"));
    assert!(page.contains(r#"value="x""#));

    let detail = text(get(&app, &url).await).await;
    assert!(detail.contains("Genre: Mystery"));
}

#[tokio::test]
async fn test_book_form_lists_authors_and_genres() {
    let app = app();
    let (author, genre, book) = seed_book(&app).await;

    let page = text(get(&app, "/catalog/book/create").await).await;
    assert!(page.contains(&id_of(&author)));
    assert!(page.contains(&id_of(&genre)));

    let update = text(get(&app, &format!("{}/update", book)).await).await;
    assert!(update.contains("Emma"));
    assert!(update.contains("checked"));
}

#[tokio::test]
async fn test_book_detail_shows_author_and_genre() {
    let app = app();
    let (author, genre, book) = seed_book(&app).await;

    let page = text(get(&app, &book).await).await;
    assert!(page.contains("Title: Emma"));
    assert!(page.contains(&author));
    assert!(page.contains(&genre));
}

#[tokio::test]
async fn test_book_with_unknown_author_is_rejected() {
    let app = app();
    let response = post(
        &app,
        "/catalog/book/create",
        "title=Emma&summary=x&isbn=1&author=not-an-id",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.contains("Author must be a valid selection."));
}

#[tokio::test]
async fn test_delete_blocked_by_dependents() {
    let app = app();
    let (author, genre, book) = seed_book(&app).await;

    let response = post(&app, &format!("{}/delete", author), "").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = text(response).await;
    assert!(page.contains("Delete the following books"));
    assert!(page.contains(&book));

    let response = post(&app, &format!("{}/delete", genre), "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.contains("Delete the following books"));

    assert_eq!(get(&app, &author).await.status(), StatusCode::OK);
    assert_eq!(get(&app, &genre).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_book_delete_blocked_by_copies() {
    let app = app();
    let (_, _, book) = seed_book(&app).await;
    let copy = create(
        &app,
        "bookinstance",
        &format!("book={}&imprint=Penguin&status=Available", id_of(&book)),
    )
    .await;

    let response = post(&app, &format!("{}/delete", book), "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.contains("Delete the following copies"));

    let response = post(&app, &format!("{}/delete", copy), "").await;
    assert_eq!(location(&response), "/catalog/bookinstances");

    let response = post(&app, &format!("{}/delete", book), "").await;
    assert_eq!(location(&response), "/catalog/books");
    assert_eq!(get(&app, &book).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_dependents_then_404() {
    let app = app();
    let url = create(&app, "genre", "name=Horror").await;

    let confirm = text(get(&app, &format!("{}/delete", url)).await).await;
    assert!(confirm.contains("Do you really want to delete this Genre?"));

    let response = post(&app, &format!("{}/delete", url), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/genres");

    let response = get(&app, &url).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(text(response).await.contains("Genre not found"));
}

#[tokio::test]
async fn test_genre_rename_onto_existing_merges() {
    let app = app();
    let author = create(&app, "author", "first_name=Iain&family_name=Banks").await;
    let scifi = create(&app, "genre", "name=SciFi").await;
    let target = create(&app, "genre", "name=Science+Fiction").await;

    let mut books = Vec::new();
    for (title, isbn) in [("Excession", "111"), ("Inversions", "222")] {
        let book = create(
            &app,
            "book",
            &format!(
                "title={}&summary=Culture&isbn={}&author={}&genre={}",
                title,
                isbn,
                id_of(&author),
                id_of(&scifi)
            ),
        )
        .await;
        books.push(book);
    }

    let response = post(&app, &format!("{}/update", scifi), "name=science+fiction").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), target);

    assert_eq!(get(&app, &scifi).await.status(), StatusCode::NOT_FOUND);
    let page = text(get(&app, &target).await).await;
    for book in &books {
        assert!(page.contains(book.as_str()));
    }
}

#[tokio::test]
async fn test_bookinstance_lifecycle() {
    let app = app();
    let (_, _, book) = seed_book(&app).await;

    let copy = create(
        &app,
        "bookinstance",
        &format!(
            "book={}&imprint=Penguin+2003&status=Loaned&due_back=2030-01-15",
            id_of(&book)
        ),
    )
    .await;

    let page = text(get(&app, &copy).await).await;
    assert!(page.contains("Penguin 2003"));
    assert!(page.contains("Loaned"));
    assert!(page.contains("Jan 15, 2030"));

    let response = post(
        &app,
        &format!("{}/update", copy),
        &format!("book={}&imprint=Penguin+2003&status=Available", id_of(&book)),
    )
    .await;
    assert_eq!(location(&response), copy);
    assert!(text(get(&app, &copy).await).await.contains("Available"));

    let list = text(get(&app, "/catalog/bookinstances").await).await;
    assert!(list.contains("Emma"));
}

#[tokio::test]
async fn test_bookinstance_requires_book_and_imprint() {
    let page = text(post(&app(), "/catalog/bookinstance/create", "status=Available").await).await;
    assert!(page.contains("Book must be specified"));
    assert!(page.contains("Imprint must be specified"));
}

#[tokio::test]
async fn test_malformed_ids_are_bad_requests() {
    let app = app();
    for entity in ["genre", "author", "book", "bookinstance"] {
        for suffix in ["", "/delete", "/update"] {
            let uri = format!("/catalog/{}/not-an-id{}", entity, suffix);
            assert_eq!(get(&app, &uri).await.status(), StatusCode::BAD_REQUEST, "GET {}", uri);
        }
        for suffix in ["/delete", "/update"] {
            let uri = format!("/catalog/{}/not-an-id{}", entity, suffix);
            assert_eq!(post(&app, &uri, "").await.status(), StatusCode::BAD_REQUEST, "POST {}", uri);
        }
    }
}

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let response = get(&app(), "/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let page = text(response).await;
    assert!(page.contains("<h1>Not Found</h1>"));
}

#[tokio::test]
async fn test_error_detail_hidden_outside_development() {
    let mut config = config();
    config.server.environment = "production".to_string();
    let app = api::router(AppState::new(config, Repository::in_memory()));

    let response = get(&app, "/catalog/genre/000000000000000000000000").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(!text(response).await.contains("<pre>"));
}

#[tokio::test]
async fn test_rate_limit_rejects_excess_requests() {
    let mut config = config();
    config.rate_limit.enabled = true;
    config.rate_limit.requests_per_minute = 2;
    let app = api::router(AppState::new(config, Repository::in_memory()));

    assert_eq!(get(&app, "/health").await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/health").await.status(), StatusCode::OK);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(text(response).await.contains("Too many requests"));
}

#[tokio::test]
async fn test_bookinstance_delete_missing_is_404() {
    let app = app();
    let (_, _, book) = seed_book(&app).await;
    let copy = create(
        &app,
        "bookinstance",
        &format!("book={}&imprint=Penguin&status=Available", id_of(&book)),
    )
    .await;

    let response = post(&app, &format!("{}/delete", copy), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = post(&app, &format!("{}/delete", copy), "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(text(response).await.contains("Book copy not found"));
}
