//! Genre endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use super::parse_id;
use crate::{
    error::AppResult,
    models::GenreForm,
    services::Deletion,
    validation::{self, Rejected},
    views::{self, Page},
    AppState,
};

/// Display list of all genres
pub async fn genre_list(State(state): State<AppState>) -> AppResult<Page> {
    let genres = state.services.genres.list().await?;
    Ok(views::genres::list(&genres))
}

/// Display detail page for a specific genre
pub async fn genre_detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let id = parse_id(&id, "Genre")?;
    let (genre, books) = state.services.genres.detail(id).await?;
    Ok(views::genres::detail(&genre, &books))
}

/// Display genre create form
pub async fn genre_create_get() -> Page {
    views::genres::form("Create Genre", &GenreForm::default(), &[])
}

/// Handle genre create
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(input): Form<GenreForm>,
) -> AppResult<Response> {
    let input = match validation::check(input) {
        Ok(input) => input,
        Err(Rejected { input, errors }) => {
            return Ok(views::genres::form("Create Genre", &input, &errors).into_response());
        }
    };

    let genre = state.services.genres.create(&input).await?.into_inner();
    Ok(Redirect::to(&genre.url()).into_response())
}

/// Display genre delete confirmation
pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "Genre")?;
    let (genre, books) = state.services.genres.detail(id).await?;
    Ok(views::genres::delete(&genre, &books))
}

/// Handle genre delete; refused while books still use the genre
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Genre")?;
    match state.services.genres.delete(id).await? {
        Deletion::Deleted => Ok(Redirect::to("/catalog/genres").into_response()),
        Deletion::Blocked { record, dependents } => {
            Ok(views::genres::delete(&record, &dependents).into_response())
        }
    }
}

/// Display genre update form
pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "Genre")?;
    let genre = state.services.genres.get(id).await?;
    Ok(views::genres::form("Update Genre", &GenreForm::from(&genre), &[]))
}

/// Handle genre update; renaming onto an existing genre merges the two
pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<GenreForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Genre")?;
    let input = match validation::check(input) {
        Ok(input) => input,
        Err(Rejected { input, errors }) => {
            return Ok(views::genres::form("Update Genre", &input, &errors).into_response());
        }
    };

    let genre = state.services.genres.update(id, &input).await?.into_inner();
    Ok(Redirect::to(&genre.url()).into_response())
}
