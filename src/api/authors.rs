//! Author endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use super::parse_id;
use crate::{
    error::AppResult,
    models::AuthorForm,
    services::Deletion,
    validation::{self, Rejected},
    views::{self, Page},
    AppState,
};

/// Display list of all authors
pub async fn author_list(State(state): State<AppState>) -> AppResult<Page> {
    let authors = state.services.authors.list().await?;
    Ok(views::authors::list(&authors))
}

/// Display detail page for a specific author
pub async fn author_detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let id = parse_id(&id, "Author")?;
    let (author, books) = state.services.authors.detail(id).await?;
    Ok(views::authors::detail(&author, &books))
}

pub async fn author_create_get() -> Page {
    views::authors::form("Create Author", &AuthorForm::default(), &[])
}

pub async fn author_create_post(
    State(state): State<AppState>,
    Form(input): Form<AuthorForm>,
) -> AppResult<Response> {
    let input = match validation::check(input) {
        Ok(input) => input,
        Err(Rejected { input, errors }) => {
            return Ok(views::authors::form("Create Author", &input, &errors).into_response());
        }
    };

    let author = state.services.authors.create(&input).await?.into_inner();
    Ok(Redirect::to(&author.url()).into_response())
}

pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "Author")?;
    let (author, books) = state.services.authors.detail(id).await?;
    Ok(views::authors::delete(&author, &books))
}

/// Handle author delete; refused while the author still has books
pub async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Author")?;
    match state.services.authors.delete(id).await? {
        Deletion::Deleted => Ok(Redirect::to("/catalog/authors").into_response()),
        Deletion::Blocked { record, dependents } => {
            Ok(views::authors::delete(&record, &dependents).into_response())
        }
    }
}

pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "Author")?;
    let author = state.services.authors.get(id).await?;
    Ok(views::authors::form("Update Author", &AuthorForm::from(&author), &[]))
}

pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<AuthorForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Author")?;
    let input = match validation::check(input) {
        Ok(input) => input,
        Err(Rejected { input, errors }) => {
            return Ok(views::authors::form("Update Author", &input, &errors).into_response());
        }
    };

    let author = state.services.authors.update(id, &input).await?.into_inner();
    Ok(Redirect::to(&author.url()).into_response())
}
