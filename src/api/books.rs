//! Book endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use super::parse_id;
use crate::{
    error::AppResult,
    models::BookForm,
    services::Deletion,
    validation::{self, Rejected},
    views::{self, Page},
    AppState,
};

pub async fn book_list(State(state): State<AppState>) -> AppResult<Page> {
    let books = state.services.books.list().await?;
    Ok(views::books::list(&books))
}

pub async fn book_detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let id = parse_id(&id, "Book")?;
    let detail = state.services.books.detail(id).await?;
    Ok(views::books::detail(&detail))
}

/// Display book create form with every author and genre to pick from
pub async fn book_create_get(State(state): State<AppState>) -> AppResult<Page> {
    let (authors, genres) = state.services.books.form_options().await?;
    Ok(views::books::form(
        "Create Book",
        &BookForm::default(),
        &authors,
        &genres,
        &[],
    ))
}

pub async fn book_create_post(
    State(state): State<AppState>,
    Form(input): Form<BookForm>,
) -> AppResult<Response> {
    let input = match validation::check(input) {
        Ok(input) => input,
        Err(Rejected { input, errors }) => {
            let (authors, genres) = state.services.books.form_options().await?;
            let page = views::books::form("Create Book", &input, &authors, &genres, &errors);
            return Ok(page.into_response());
        }
    };

    let book = state.services.books.create(&input).await?.into_inner();
    Ok(Redirect::to(&book.url()).into_response())
}

pub async fn book_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "Book")?;
    let (book, instances) = state.services.books.with_instances(id).await?;
    Ok(views::books::delete(&book, &instances))
}

/// Handle book delete; refused while copies of the book exist
pub async fn book_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book")?;
    match state.services.books.delete(id).await? {
        Deletion::Deleted => Ok(Redirect::to("/catalog/books").into_response()),
        Deletion::Blocked { record, dependents } => {
            Ok(views::books::delete(&record, &dependents).into_response())
        }
    }
}

pub async fn book_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "Book")?;
    let (book, (authors, genres)) = tokio::try_join!(
        state.services.books.get(id),
        state.services.books.form_options(),
    )?;
    Ok(views::books::form(
        "Update Book",
        &BookForm::from(&book),
        &authors,
        &genres,
        &[],
    ))
}

pub async fn book_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<BookForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book")?;
    let input = match validation::check(input) {
        Ok(input) => input,
        Err(Rejected { input, errors }) => {
            let (authors, genres) = state.services.books.form_options().await?;
            let page = views::books::form("Update Book", &input, &authors, &genres, &errors);
            return Ok(page.into_response());
        }
    };

    let book = state.services.books.update(id, &input).await?.into_inner();
    Ok(Redirect::to(&book.url()).into_response())
}
