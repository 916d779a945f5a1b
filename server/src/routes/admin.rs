//! Development-only admin surface.
//!
//! Every handler checks the config flag first; with admin disabled the
//! response is 403 before any file or lock is touched.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use catalog::{Edition, FestivalGroup, FilmPatch, MergedFilm};
use serde::Serialize;
use tracing::info;

use crate::{error::AppError, state::AppState};

#[derive(Serialize)]
pub struct Deleted {
    pub id: String,
    pub removed_from: Vec<Edition>,
}

fn ensure_enabled(state: &AppState) -> Result<(), AppError> {
    if state.config.admin_enabled {
        Ok(())
    } else {
        Err(AppError::AdminDisabled)
    }
}

pub async fn festival_groupings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FestivalGroup>>, AppError> {
    ensure_enabled(&state)?;

    Ok(Json(state.catalog.read().unwrap().catalog.groupings()))
}

pub async fn update_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<FilmPatch>,
) -> Result<Json<MergedFilm>, AppError> {
    ensure_enabled(&state)?;

    state.store.update_film(&id, &patch)?;
    state.refresh_catalog()?;

    info!("Updated film {id}");

    state
        .catalog
        .read()
        .unwrap()
        .merged_film(&id)
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn delete_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, AppError> {
    ensure_enabled(&state)?;

    let outcome = state.store.delete_film(&id)?;
    state.refresh_catalog()?;

    info!(
        "Deleted film {id}, removed from {} appearance files",
        outcome.removed_from.len()
    );

    Ok(Json(Deleted {
        id,
        removed_from: outcome.removed_from,
    }))
}
