use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use catalog::{FilterOptions, MergedFilm};

use crate::{error::AppError, state::AppState};

pub async fn list_films(State(state): State<Arc<AppState>>) -> Json<Vec<MergedFilm>> {
    Json(state.catalog.read().unwrap().merged.clone())
}

pub async fn get_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MergedFilm>, AppError> {
    state
        .catalog
        .read()
        .unwrap()
        .merged_film(&id)
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn filter_options(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(state.catalog.read().unwrap().catalog.filter_options())
}
