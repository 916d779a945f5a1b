use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    session::{clear_session_cookie, session_cookie, token_from_headers, CurrentUser},
    state::AppState,
};

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct Me {
    pub username: String,
    pub watchlist: Vec<String>,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    state
        .users
        .register(&credentials.username, &credentials.password)?;

    let token = state.sessions.create(&credentials.username);

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(SET_COOKIE, session_cookie(token))]),
        Json(Me {
            username: credentials.username,
            watchlist: Vec::new(),
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    if !state
        .users
        .verify(&credentials.username, &credentials.password)
    {
        return Err(AppError::Unauthorized);
    }

    let token = state.sessions.create(&credentials.username);

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(token))]),
        Json(Me {
            watchlist: state.users.watchlist(&credentials.username),
            username: credentials.username,
        }),
    ))
}

/// Always succeeds: a logout with no (or a stale) session still clears
/// the cookie.
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = token_from_headers(&headers) {
        state.sessions.revoke(token);
    }

    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
    )
}

pub async fn me(State(state): State<Arc<AppState>>, user: CurrentUser) -> Json<Me> {
    Json(Me {
        watchlist: state.users.watchlist(&user.username),
        username: user.username,
    })
}
