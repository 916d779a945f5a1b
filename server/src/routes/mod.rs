use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod films;
pub mod watchlist;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/films", get(films::list_films))
        .route("/api/films/{id}", get(films::get_film))
        .route("/api/filters", get(films::filter_options))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/watchlist", get(watchlist::list))
        .route(
            "/api/watchlist/{film_id}",
            put(watchlist::add).delete(watchlist::remove),
        )
        .route("/api/admin/festivals", get(admin::festival_groupings))
        .route(
            "/api/admin/films/{id}",
            put(admin::update_film).delete(admin::delete_film),
        )
}
