//! Book instance endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use super::parse_id;
use crate::{
    error::AppResult,
    models::BookInstanceForm,
    validation::{self, Rejected},
    views::{self, Page},
    AppState,
};

pub async fn bookinstance_list(State(state): State<AppState>) -> AppResult<Page> {
    let instances = state.services.book_instances.list().await?;
    Ok(views::book_instances::list(&instances))
}

pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "BookInstance")?;
    let (instance, book) = state.services.book_instances.detail(id).await?;
    Ok(views::book_instances::detail(&instance, book.as_ref()))
}

pub async fn bookinstance_create_get(State(state): State<AppState>) -> AppResult<Page> {
    let books = state.services.book_instances.form_options().await?;
    Ok(views::book_instances::form(
        "Create BookInstance",
        &BookInstanceForm::default(),
        &books,
        &[],
    ))
}

pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    Form(input): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let input = match validation::check(input) {
        Ok(input) => input,
        Err(Rejected { input, errors }) => {
            let books = state.services.book_instances.form_options().await?;
            let page = views::book_instances::form("Create BookInstance", &input, &books, &errors);
            return Ok(page.into_response());
        }
    };

    let instance = state.services.book_instances.create(&input).await?.into_inner();
    Ok(Redirect::to(&instance.url()).into_response())
}

pub async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "BookInstance")?;
    let (instance, book) = state.services.book_instances.detail(id).await?;
    Ok(views::book_instances::delete(&instance, book.as_ref()))
}

pub async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let id = parse_id(&id, "BookInstance")?;
    state.services.book_instances.delete(id).await?;
    Ok(Redirect::to("/catalog/bookinstances"))
}

pub async fn bookinstance_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id, "BookInstance")?;
    let (instance, books) = tokio::try_join!(
        state.services.book_instances.get(id),
        state.services.book_instances.form_options(),
    )?;
    Ok(views::book_instances::form(
        "Update BookInstance",
        &BookInstanceForm::from(&instance),
        &books,
        &[],
    ))
}

pub async fn bookinstance_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "BookInstance")?;
    let input = match validation::check(input) {
        Ok(input) => input,
        Err(Rejected { input, errors }) => {
            let books = state.services.book_instances.form_options().await?;
            let page = views::book_instances::form("Update BookInstance", &input, &books, &errors);
            return Ok(page.into_response());
        }
    };

    let instance = state
        .services
        .book_instances
        .update(id, &input)
        .await?
        .into_inner();
    Ok(Redirect::to(&instance.url()).into_response())
}
