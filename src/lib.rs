pub mod config;
pub mod db;
pub mod docs;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(docs::swagger_ui))
        .route("/swagger.json", get(docs::openapi_spec))
        .route("/movies", get(routes::list_movies))
        .route("/movies/", get(routes::list_movies))
        .route("/movies/{id}", get(routes::get_movie))
        .route(
            "/genres/{id}",
            axum::routing::post(routes::create_genre)
                .put(routes::update_genre)
                .delete(routes::delete_genre),
        )
        .route(
            "/directors/{id}",
            axum::routing::post(routes::create_director)
                .put(routes::update_director)
                .delete(routes::delete_director),
        )
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
