use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use catalog::MergedFilm;

use crate::{error::AppError, session::CurrentUser, state::AppState};

/// Merged films on the current user's watchlist.
///
/// Ids whose film has since been deleted are skipped rather than erroring:
/// the watchlist entry is the user's data, the film is the admin's.
pub async fn list(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Json<Vec<MergedFilm>> {
    let catalog = state.catalog.read().unwrap();

    let films = state
        .users
        .watchlist(&user.username)
        .iter()
        .filter_map(|id| catalog.merged_film(id))
        .collect();

    Json(films)
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(film_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.catalog.read().unwrap().contains(&film_id) {
        return Err(AppError::NotFound);
    }

    state.users.add_to_watchlist(&user.username, &film_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(film_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.users.remove_from_watchlist(&user.username, &film_id)?;
    Ok(StatusCode::NO_CONTENT)
}
