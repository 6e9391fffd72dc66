use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use sea_orm::Value;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    AppState,
    entities::{NamedTable, movie},
    error::{AppError, AppResult},
    models::{MovieRecord, NamedInput, first_input},
};

type IdPath = Result<Path<i32>, PathRejection>;
type NamedBody = Result<Json<Vec<NamedInput>>, JsonRejection>;

/// Raw filter values. Kept as strings: an empty value counts as absent.
#[derive(Debug, Deserialize)]
pub struct MovieFilter {
    director_id: Option<String>,
    genre_id: Option<String>,
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MovieFilter>,
) -> AppResult<Json<Vec<MovieRecord>>> {
    let mut predicates: Vec<(movie::Column, Value)> = Vec::new();

    for (column, raw) in [
        (movie::Column::DirectorId, filter.director_id),
        (movie::Column::GenreId, filter.genre_id),
    ] {
        let Some(raw) = raw.filter(|v| !v.is_empty()) else {
            continue;
        };
        // a non-numeric value can never equal an integer column
        let Ok(id) = raw.parse::<i32>() else {
            debug!(column = ?column, value = %raw, "filter value is not an integer");
            return Ok(Json(Vec::new()));
        };
        predicates.push((column, id.into()));
    }

    let movies = if predicates.is_empty() {
        state.store.find_all::<movie::Entity>().await?
    } else {
        state.store.find_by_equality::<movie::Entity>(predicates).await?
    };

    debug!(count = movies.len(), "listed movies");
    Ok(Json(movies.into_iter().map(MovieRecord::from).collect()))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    path: IdPath,
) -> AppResult<Json<MovieRecord>> {
    let Path(id) = path?;
    let movie = state
        .store
        .find_by_id::<movie::Entity>(id)
        .await?
        .ok_or(AppError::NotFound { entity: "movie", id })?;
    Ok(Json(movie.into()))
}

pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    path: IdPath,
    body: NamedBody,
) -> AppResult<StatusCode> {
    let (Path(id), Json(body)) = (path?, body?);
    create_named(&state, NamedTable::Genre, id, body).await
}

pub async fn update_genre(
    State(state): State<Arc<AppState>>,
    path: IdPath,
    body: NamedBody,
) -> AppResult<StatusCode> {
    let (Path(id), Json(body)) = (path?, body?);
    update_named(&state, NamedTable::Genre, id, body).await
}

pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    path: IdPath,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    delete_named(&state, NamedTable::Genre, id).await
}

pub async fn create_director(
    State(state): State<Arc<AppState>>,
    path: IdPath,
    body: NamedBody,
) -> AppResult<StatusCode> {
    let (Path(id), Json(body)) = (path?, body?);
    create_named(&state, NamedTable::Director, id, body).await
}

pub async fn update_director(
    State(state): State<Arc<AppState>>,
    path: IdPath,
    body: NamedBody,
) -> AppResult<StatusCode> {
    let (Path(id), Json(body)) = (path?, body?);
    update_named(&state, NamedTable::Director, id, body).await
}

pub async fn delete_director(
    State(state): State<Arc<AppState>>,
    path: IdPath,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    delete_named(&state, NamedTable::Director, id).await
}

/// The row's identity comes from the body; the path id is not used.
async fn create_named(
    state: &AppState,
    table: NamedTable,
    path_id: i32,
    body: Vec<NamedInput>,
) -> AppResult<StatusCode> {
    let (id, name) = first_input(body)?.into_new()?;
    if id != path_id {
        debug!(table = table.as_str(), path_id, body_id = id, "path id differs from body id");
    }

    state.store.insert_named(table, id, name).await?;
    info!(table = table.as_str(), id, "created");
    Ok(StatusCode::NO_CONTENT)
}

async fn update_named(
    state: &AppState,
    table: NamedTable,
    id: i32,
    body: Vec<NamedInput>,
) -> AppResult<StatusCode> {
    let name = first_input(body)?.into_name()?;

    if !state.store.rename_named(table, id, name).await? {
        return Err(AppError::NotFound { entity: table.as_str(), id });
    }
    info!(table = table.as_str(), id, "renamed");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_named(state: &AppState, table: NamedTable, id: i32) -> AppResult<StatusCode> {
    if !state.store.delete_named(table, id).await? {
        return Err(AppError::NotFound { entity: table.as_str(), id });
    }
    info!(table = table.as_str(), id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}
