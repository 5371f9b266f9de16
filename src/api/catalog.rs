//! Catalog home page

use axum::extract::State;

use crate::{
    error::AppResult,
    views::{self, Page},
    AppState,
};

/// Display record counts for every collection
pub async fn index(State(state): State<AppState>) -> AppResult<Page> {
    let counts = state.services.catalog.counts().await?;
    Ok(views::catalog::index(&counts))
}
